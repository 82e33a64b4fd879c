pub mod camera;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod surface;
