use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use tracing::warn;

use crate::error::CaptureError;
use crate::persist::canvas::{PixelCanvas, blit_rows_inverted};
use crate::persist::{CaptureResult, ImageSize, PersistenceStrategy};
use crate::pixels::PixelBuffer;

/// Abstraction over the sandboxed mini-app host's image APIs: temp-file
/// export of the current canvas, photo-album save, and user-visible toasts.
pub trait MiniAppExporter {
    /// Export the current canvas content to a host-managed temp file.
    fn export_temp_file(&mut self) -> Result<PathBuf>;

    fn save_to_album(&mut self, path: &Path) -> Result<()>;

    fn show_toast(&mut self, message: &str);
}

impl<T: MiniAppExporter + ?Sized> MiniAppExporter for Rc<RefCell<T>> {
    fn export_temp_file(&mut self) -> Result<PathBuf> {
        self.borrow_mut().export_temp_file()
    }

    fn save_to_album(&mut self, path: &Path) -> Result<()> {
        self.borrow_mut().save_to_album(path)
    }

    fn show_toast(&mut self, message: &str) {
        self.borrow_mut().show_toast(message);
    }
}

/// Mini-app save: repaint the canvas, export to a temp file, then hand that
/// file to the photo album.
///
/// Completion is reported right after the export is requested; the album
/// leg runs detached and surfaces only through toasts.
pub struct MiniAppStrategy {
    canvas: Box<dyn PixelCanvas>,
    exporter: Box<dyn MiniAppExporter>,
}

impl MiniAppStrategy {
    pub fn new(canvas: Box<dyn PixelCanvas>, exporter: Box<dyn MiniAppExporter>) -> Self {
        Self { canvas, exporter }
    }

    fn export_and_save(&mut self) {
        match self.exporter.export_temp_file() {
            Ok(temp_path) => {
                self.exporter.show_toast("capture success");
                match self.exporter.save_to_album(&temp_path) {
                    Ok(()) => self.exporter.show_toast("capture saved to photo album"),
                    Err(e) => {
                        warn!("{}", CaptureError::AlbumSaveFailed(e.to_string()));
                        self.exporter.show_toast("capture album save failed");
                    }
                }
            }
            Err(e) => {
                warn!("{}", CaptureError::ExportFailed(e.to_string()));
                self.exporter.show_toast("capture failed");
            }
        }
    }
}

impl PersistenceStrategy for MiniAppStrategy {
    fn persist(&mut self, frame: &PixelBuffer, _name: &str) -> CaptureResult {
        blit_rows_inverted(self.canvas.as_mut(), frame);
        self.export_and_save();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mocks::{MockExporter, RecordingCanvas};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn frame_3x2() -> PixelBuffer {
        PixelBuffer::new(vec![7u8; 3 * 2 * 4], 3, 2)
    }

    fn strategy_with(exporter: Rc<RefCell<MockExporter>>) -> MiniAppStrategy {
        let canvas = Rc::new(RefCell::new(RecordingCanvas::new()));
        MiniAppStrategy::new(Box::new(canvas), Box::new(exporter))
    }

    #[test]
    fn test_export_and_album_success_toasts() {
        let exporter = Rc::new(RefCell::new(MockExporter::new()));
        let mut strategy = strategy_with(exporter.clone());

        let result = strategy.persist(&frame_3x2(), "shot");

        assert!(result.success);
        assert!(result.file_path.is_none());
        assert_eq!(
            exporter.borrow().toasts,
            vec!["capture success", "capture saved to photo album"]
        );
    }

    #[test]
    fn test_album_failure_only_affects_toasts() {
        let exporter = Rc::new(RefCell::new(MockExporter::new().fail_album()));
        let mut strategy = strategy_with(exporter.clone());

        let result = strategy.persist(&frame_3x2(), "shot");

        // The album leg is detached from the completion contract.
        assert!(result.success);
        assert_eq!(
            exporter.borrow().toasts,
            vec!["capture success", "capture album save failed"]
        );
    }

    #[test]
    fn test_export_failure_toasts_and_still_completes() {
        let exporter = Rc::new(RefCell::new(MockExporter::new().fail_export()));
        let mut strategy = strategy_with(exporter.clone());

        let result = strategy.persist(&frame_3x2(), "shot");

        assert!(result.success);
        assert_eq!(exporter.borrow().toasts, vec!["capture failed"]);
        assert_eq!(exporter.borrow().album_saves, 0);
    }

    #[test]
    fn test_result_carries_size() {
        let exporter = Rc::new(RefCell::new(MockExporter::new()));
        let mut strategy = strategy_with(exporter);

        let result = strategy.persist(&frame_3x2(), "shot");
        assert_eq!(
            result.size,
            Some(ImageSize {
                width: 3,
                height: 2
            })
        );
    }
}
