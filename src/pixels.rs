//! Raw RGBA8888 buffer operations: row-order transforms and extraction
//! rectangle handling for render-surface readback.

use crate::geometry::WorldRect;
use crate::traits::platform::PlatformInfo;

pub const BYTES_PER_PIXEL: usize = 4;

/// One capture's worth of raw pixels, row-major RGBA8888.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * BYTES_PER_PIXEL
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A copy with scanlines in the opposite vertical order.
    pub fn flipped_rows(&self) -> Self {
        Self {
            data: flip_rows(&self.data, self.width, self.height),
            width: self.width,
            height: self.height,
        }
    }
}

/// Reorder scanlines top-to-bottom <-> bottom-to-top.
///
/// Applying this twice returns the original buffer.
pub fn flip_rows(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let mut out = vec![0u8; data.len()];
    for row in 0..height as usize {
        let src_row = height as usize - 1 - row;
        let src = src_row * row_bytes;
        let dst = row * row_bytes;
        out[dst..dst + row_bytes].copy_from_slice(&data[src..src + row_bytes]);
    }
    out
}

/// Integer extraction origin for reading a target's bounds back from a
/// render surface.
///
/// The origin is floored to whole pixels. On platforms whose readback
/// addresses the surface from the opposite vertical origin (native iOS),
/// the y coordinate is inverted against the surface height first.
pub fn extraction_origin(
    bounds: &WorldRect,
    surface_height: u32,
    platform: &PlatformInfo,
) -> (i64, i64) {
    let x = bounds.x;
    let mut y = bounds.y;
    if platform.inverted_readback_origin() {
        y = surface_height as f32 - y - bounds.height;
    }
    (x.floor() as i64, y.floor() as i64)
}
