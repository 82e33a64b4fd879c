pub mod capture;
pub mod error;
pub mod geometry;
pub mod persist;
pub mod pixels;
pub mod sprite;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use capture::{CompletionCallback, Snapshot};
pub use error::CaptureError;
pub use geometry::{CaptureFraming, WorldRect};
pub use persist::{CaptureResult, ImageSize, PersistenceStrategy, StrategyKind};
pub use pixels::PixelBuffer;
pub use sprite::CapturedImage;
