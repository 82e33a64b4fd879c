use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow};

use crate::pixels::{BYTES_PER_PIXEL, PixelBuffer};

/// Handle for referencing a render surface when binding cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Abstraction over an off-screen render target readable back as pixels.
///
/// Implementations: `MemorySurface` (software), host GPU surfaces in the
/// embedding engine.
pub trait RenderSurface {
    fn id(&self) -> SurfaceId;

    /// Resize the surface. Called once per capture request, before the
    /// render is triggered; never mid-flight.
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Read back an RGBA8888 sub-rectangle, row-major from the surface's
    /// own origin convention.
    fn read_pixels(&mut self, x: i64, y: i64, width: u32, height: u32) -> Result<PixelBuffer>;
}

impl<T: RenderSurface + ?Sized> RenderSurface for Rc<RefCell<T>> {
    fn id(&self) -> SurfaceId {
        self.borrow().id()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.borrow_mut().resize(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.borrow().size()
    }

    fn read_pixels(&mut self, x: i64, y: i64, width: u32, height: u32) -> Result<PixelBuffer> {
        self.borrow_mut().read_pixels(x, y, width, height)
    }
}

/// CPU-backed render surface.
///
/// Serves as the readback target for hosts that composite in software, and
/// as a deterministic surface for tests.
pub struct MemorySurface {
    id: SurfaceId,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MemorySurface {
    pub fn new(id: SurfaceId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            data: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Raw backing pixels, row-major RGBA8888.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Fill every pixel of each row with the row index, truncated to a byte.
    /// Makes row-order properties directly observable in readback output.
    pub fn fill_row_indexed(&mut self) {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        for row in 0..self.height as usize {
            let start = row * row_bytes;
            self.data[start..start + row_bytes].fill(row as u8);
        }
    }
}

impl RenderSurface for MemorySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL];
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_pixels(&mut self, x: i64, y: i64, width: u32, height: u32) -> Result<PixelBuffer> {
        if x < 0
            || y < 0
            || x + width as i64 > self.width as i64
            || y + height as i64 > self.height as i64
        {
            return Err(anyhow!(
                "readback rect {width}x{height}+{x}+{y} outside surface {}x{}",
                self.width,
                self.height
            ));
        }

        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let surface_row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let mut out = Vec::with_capacity(height as usize * row_bytes);
        for row in 0..height as usize {
            let src = (y as usize + row) * surface_row_bytes + x as usize * BYTES_PER_PIXEL;
            out.extend_from_slice(&self.data[src..src + row_bytes]);
        }
        Ok(PixelBuffer::new(out, width, height))
    }
}
