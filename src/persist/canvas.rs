use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error};

use crate::persist::{CaptureResult, ImageSize, PersistenceStrategy};
use crate::pixels::{BYTES_PER_PIXEL, PixelBuffer};

/// Abstraction over the host's 2D software canvas and its PNG encoder.
///
/// The canvas is the one scratch resource reused across captures; the
/// strategy clears it before every repaint.
pub trait PixelCanvas {
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    fn clear(&mut self);

    /// Write one RGBA8888 scanline at row `y` (top-down canvas convention).
    fn put_row(&mut self, y: u32, rgba: &[u8]);

    /// Hand the canvas content to the encoder/writer collaborator, which
    /// owns persistence from here on.
    fn save_png(&mut self, name: &str) -> anyhow::Result<()>;
}

impl<T: PixelCanvas + ?Sized> PixelCanvas for Rc<RefCell<T>> {
    fn resize(&mut self, width: u32, height: u32) {
        self.borrow_mut().resize(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.borrow().size()
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn put_row(&mut self, y: u32, rgba: &[u8]) {
        self.borrow_mut().put_row(y, rgba);
    }

    fn save_png(&mut self, name: &str) -> anyhow::Result<()> {
        self.borrow_mut().save_png(name)
    }
}

/// Repaint the readback buffer into the canvas row by row, inverting row
/// order: readback rows are bottom-up relative to the canvas.
pub(crate) fn blit_rows_inverted(canvas: &mut dyn PixelCanvas, frame: &PixelBuffer) {
    if canvas.size() != (frame.width, frame.height) {
        canvas.resize(frame.width, frame.height);
    } else {
        canvas.clear();
    }

    let row_bytes = frame.width as usize * BYTES_PER_PIXEL;
    for row in 0..frame.height {
        let src_row = (frame.height - 1 - row) as usize;
        let start = src_row * row_bytes;
        canvas.put_row(row, &frame.data[start..start + row_bytes]);
    }
}

/// Canvas-based save: encode in-process and report success immediately.
/// The encoder collaborator owns persistence, so the result never carries a
/// file path.
pub struct CanvasStrategy {
    canvas: Box<dyn PixelCanvas>,
}

impl CanvasStrategy {
    pub fn new(canvas: Box<dyn PixelCanvas>) -> Self {
        Self { canvas }
    }
}

impl PersistenceStrategy for CanvasStrategy {
    fn persist(&mut self, frame: &PixelBuffer, name: &str) -> CaptureResult {
        blit_rows_inverted(self.canvas.as_mut(), frame);
        if let Err(e) = self.canvas.save_png(name) {
            // Persistence is delegated to the encoder; its failure does not
            // change the completion contract.
            error!("canvas PNG encode failed for {name}: {e}");
        }
        debug!("canvas capture {name} encoded at {}x{}", frame.width, frame.height);
        CaptureResult::succeeded(
            ImageSize {
                width: frame.width,
                height: frame.height,
            },
            None,
            None,
        )
    }
}
