//! Platform persistence: three mutually exclusive save strategies behind one
//! completion contract.

mod canvas;
mod miniapp;
mod native;

pub use canvas::{CanvasStrategy, PixelCanvas};
pub use miniapp::{MiniAppExporter, MiniAppStrategy};
pub use native::{ImageFileIo, NativeSaveConfig, NativeStrategy, PngFileIo};

use std::path::PathBuf;

use crate::pixels::PixelBuffer;
use crate::sprite::CapturedImage;
use crate::traits::platform::PlatformInfo;

/// Pixel dimensions of a produced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Image decoded back from a file, RGBA8888 row-major top-down.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one capture request, produced exactly once and delivered
/// through the completion callback.
#[derive(Debug)]
pub struct CaptureResult {
    pub success: bool,
    pub file_path: Option<PathBuf>,
    pub image: Option<CapturedImage>,
    pub size: Option<ImageSize>,
}

impl CaptureResult {
    pub fn succeeded(
        size: ImageSize,
        file_path: Option<PathBuf>,
        image: Option<CapturedImage>,
    ) -> Self {
        Self {
            success: true,
            file_path,
            image,
            size: Some(size),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            file_path: None,
            image: None,
            size: None,
        }
    }
}

/// One save strategy, chosen once at construction from the platform probe.
///
/// `persist` consumes the readback buffer of a single request and must
/// resolve to exactly one result; strategy-internal failures are logged and
/// folded into the result rather than escaping.
pub trait PersistenceStrategy {
    fn persist(&mut self, frame: &PixelBuffer, name: &str) -> CaptureResult;
}

/// Which strategy fits an environment. Probed once; there is no runtime
/// switching mid-capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Display canvas present: encode in-process, persistence delegated.
    Canvas,
    /// Native filesystem: write then verify by reloading.
    Native,
    /// Sandboxed mini-app: temp-file export plus photo-album save.
    MiniApp,
}

impl StrategyKind {
    pub fn detect(platform: &PlatformInfo) -> Self {
        if platform.mini_app {
            StrategyKind::MiniApp
        } else if platform.native {
            StrategyKind::Native
        } else {
            StrategyKind::Canvas
        }
    }
}
