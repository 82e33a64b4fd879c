use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of a capture request.
///
/// Every failure ends the request; nothing in the pipeline retries. Failures
/// that occur after `capture_node` has returned are reported through the
/// completion callback's success flag, with the variant logged for diagnosis.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture target has no measurable world bounds")]
    GeometryUnavailable,

    #[error("a capture request is already in flight")]
    CaptureInFlight,

    #[error("failed to read pixels back from the render surface: {0}")]
    ReadbackFailed(String),

    #[error("failed to write image file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("image file {path} written but could not be reloaded: {reason}")]
    VerifyReloadFailed { path: PathBuf, reason: String },

    #[error("mini-app temp-file export failed: {0}")]
    ExportFailed(String),

    #[error("photo album save failed: {0}")]
    AlbumSaveFailed(String),
}
