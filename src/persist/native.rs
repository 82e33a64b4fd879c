use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use image::{ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::CaptureError;
use crate::persist::{CaptureResult, ImageSize, LoadedImage, PersistenceStrategy};
use crate::pixels::PixelBuffer;
use crate::sprite::CapturedImage;
use crate::traits::platform::PlatformInfo;

/// Abstraction over the host's asynchronous binary image writer/loader pair.
/// Implementations: `PngFileIo` (image crate), host asset managers.
pub trait ImageFileIo {
    fn save_image_data(&mut self, path: &Path, rgba: &[u8], width: u32, height: u32)
    -> Result<()>;

    /// Reload a just-written file as a decoded image.
    fn load_image(&mut self, path: &Path) -> Result<LoadedImage>;
}

impl<T: ImageFileIo + ?Sized> ImageFileIo for Rc<RefCell<T>> {
    fn save_image_data(
        &mut self,
        path: &Path,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.borrow_mut().save_image_data(path, rgba, width, height)
    }

    fn load_image(&mut self, path: &Path) -> Result<LoadedImage> {
        self.borrow_mut().load_image(path)
    }
}

/// PNG file io backed by the image crate.
pub struct PngFileIo;

impl ImageFileIo for PngFileIo {
    fn save_image_data(
        &mut self,
        path: &Path,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> Result<()> {
        let img = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba.to_vec())
            .ok_or_else(|| anyhow!("buffer length does not match {width}x{height}"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        img.save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn load_image(&mut self, path: &Path) -> Result<LoadedImage> {
        let img = image::open(path)
            .with_context(|| format!("failed to reload {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(LoadedImage {
            data: img.into_raw(),
            width,
            height,
        })
    }
}

/// Where and how the native strategy writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeSaveConfig {
    /// Writable-storage root the `<name>.png` artifacts land under.
    pub storage_root: PathBuf,
}

/// Native save: write `<storage_root>/<name>.png`, then verify by reloading
/// the file before declaring success.
///
/// The write and the verification reload are two distinct steps with
/// distinct failure points; a reload failure is an overall capture failure
/// even though a valid file may remain on disk.
pub struct NativeStrategy {
    config: NativeSaveConfig,
    platform: PlatformInfo,
    io: Box<dyn ImageFileIo>,
}

impl NativeStrategy {
    pub fn new(config: NativeSaveConfig, platform: PlatformInfo, io: Box<dyn ImageFileIo>) -> Self {
        Self {
            config,
            platform,
            io,
        }
    }

    fn save_and_verify(&mut self, frame: &PixelBuffer, name: &str) -> Result<CaptureResult, CaptureError> {
        let path = self.config.storage_root.join(format!("{name}.png"));

        // The platform file writer on Android expects the opposite row order
        // from what the readback produced.
        let flipped;
        let bytes: &[u8] = if self.platform.flip_rows_before_write() {
            flipped = frame.flipped_rows();
            &flipped.data
        } else {
            &frame.data
        };

        self.io
            .save_image_data(&path, bytes, frame.width, frame.height)
            .map_err(|e| CaptureError::WriteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        info!("saved capture to {}", path.display());

        let loaded = self
            .io
            .load_image(&path)
            .map_err(|e| CaptureError::VerifyReloadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(CaptureResult::succeeded(
            ImageSize {
                width: frame.width,
                height: frame.height,
            },
            Some(path),
            Some(CapturedImage::from_loaded(loaded)),
        ))
    }
}

impl PersistenceStrategy for NativeStrategy {
    fn persist(&mut self, frame: &PixelBuffer, name: &str) -> CaptureResult {
        match self.save_and_verify(frame, name) {
            Ok(result) => result,
            Err(e) => {
                error!("native save failed: {e}");
                CaptureResult::failed()
            }
        }
    }
}
