use crate::persist::LoadedImage;
use crate::pixels::PixelBuffer;

/// Displayable image built from a capture, for immediate preview use.
///
/// Captured content is dynamic, so the image must remain a standalone
/// texture; `packable` stays false so it is never merged into a shared atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Texture V axis is flipped; consumed as a flag by the display path
    /// rather than by transforming bytes.
    pub flip_v: bool,
    pub packable: bool,
}

impl CapturedImage {
    /// Wrap a raw readback buffer. Readback rows arrive bottom-up relative
    /// to the display convention, declared via `flip_v` instead of a byte
    /// transform.
    pub fn from_raw_capture(buffer: &PixelBuffer) -> Self {
        Self {
            data: buffer.data.clone(),
            width: buffer.width,
            height: buffer.height,
            flip_v: true,
            packable: false,
        }
    }

    /// Wrap an image decoded from a file, which is already in display row
    /// order.
    pub fn from_loaded(loaded: LoadedImage) -> Self {
        Self {
            data: loaded.data,
            width: loaded.width,
            height: loaded.height,
            flip_v: false,
            packable: false,
        }
    }
}
