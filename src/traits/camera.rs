use std::cell::RefCell;
use std::rc::Rc;

use crate::traits::surface::SurfaceId;

/// Abstraction over the host's dedicated off-screen capture camera.
///
/// The pipeline points the camera at the target's world center, sets the
/// orthographic half-height from the target bounds, and binds its output to
/// the capture render surface for the duration of one request.
pub trait OffscreenCamera {
    fn set_ortho_half_height(&mut self, half_height: f32);

    fn set_world_position(&mut self, x: f32, y: f32, z: f32);

    /// Bind or unbind the camera's output render target.
    fn set_render_target(&mut self, target: Option<SurfaceId>);

    /// An inactive camera must not render; the pipeline deactivates it after
    /// every readback so an off-screen camera is never left rendering.
    fn set_active(&mut self, active: bool);
}

// Shared handles work as collaborators in the single-threaded model.
impl<T: OffscreenCamera + ?Sized> OffscreenCamera for Rc<RefCell<T>> {
    fn set_ortho_half_height(&mut self, half_height: f32) {
        self.borrow_mut().set_ortho_half_height(half_height);
    }

    fn set_world_position(&mut self, x: f32, y: f32, z: f32) {
        self.borrow_mut().set_world_position(x, y, z);
    }

    fn set_render_target(&mut self, target: Option<SurfaceId>) {
        self.borrow_mut().set_render_target(target);
    }

    fn set_active(&mut self, active: bool) {
        self.borrow_mut().set_active(active);
    }
}
