use serde::{Deserialize, Serialize};

/// Operating system reported by the host's capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Os {
    Ios,
    Android,
    Windows,
    MacOs,
    Linux,
    Other,
}

/// One-time environment probe describing where the host is running.
///
/// Probed once by the host and handed to the pipeline at construction; the
/// pipeline never re-probes mid-capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Browser-like environment with a display canvas.
    pub browser: bool,
    /// Native build with filesystem access.
    pub native: bool,
    pub os: Os,
    /// Sandboxed mini-app environment (no direct filesystem, album API).
    pub mini_app: bool,
}

impl PlatformInfo {
    pub fn browser() -> Self {
        Self {
            browser: true,
            native: false,
            os: Os::Other,
            mini_app: false,
        }
    }

    pub fn native(os: Os) -> Self {
        Self {
            browser: false,
            native: true,
            os,
            mini_app: false,
        }
    }

    pub fn mini_app() -> Self {
        Self {
            browser: false,
            native: false,
            os: Os::Other,
            mini_app: true,
        }
    }

    /// Readback on native iOS addresses the surface from the opposite
    /// vertical origin and needs its extraction rect inverted.
    pub fn inverted_readback_origin(&self) -> bool {
        self.native && self.os == Os::Ios
    }

    /// The native file writer on Android expects rows in the opposite order
    /// from what the readback produced.
    pub fn flip_rows_before_write(&self) -> bool {
        self.native && self.os == Os::Android
    }
}
