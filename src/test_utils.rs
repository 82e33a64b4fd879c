//! Mock collaborators for pipeline tests.
//!
//! These stand in for the host engine's scene node, camera and platform io
//! seams, recording every interaction for assertion.

#[cfg(test)]
pub mod mocks {
    use std::path::{Path, PathBuf};

    use anyhow::{Result, anyhow};

    use crate::geometry::WorldRect;
    use crate::persist::{ImageFileIo, LoadedImage, MiniAppExporter, PixelCanvas};
    use crate::traits::camera::OffscreenCamera;
    use crate::traits::scene::SceneNode;
    use crate::traits::surface::SurfaceId;

    /// Scene node with directly settable bounds and a visible active flag.
    pub struct MockNode {
        pub bounds: Option<WorldRect>,
        pub active: bool,
    }

    impl MockNode {
        pub fn with_bounds(bounds: WorldRect) -> Self {
            Self {
                bounds: Some(bounds),
                active: false,
            }
        }
    }

    impl SceneNode for MockNode {
        fn world_bounds(&self) -> Option<WorldRect> {
            self.bounds
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    /// One recorded camera interaction.
    #[derive(Debug, Clone, PartialEq)]
    pub enum CameraOp {
        OrthoHalfHeight(f32),
        Position(f32, f32, f32),
        Target(Option<SurfaceId>),
        Active(bool),
    }

    /// Off-screen camera that records every operation in order.
    #[derive(Default)]
    pub struct MockCamera {
        pub ops: Vec<CameraOp>,
    }

    impl MockCamera {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl OffscreenCamera for MockCamera {
        fn set_ortho_half_height(&mut self, half_height: f32) {
            self.ops.push(CameraOp::OrthoHalfHeight(half_height));
        }

        fn set_world_position(&mut self, x: f32, y: f32, z: f32) {
            self.ops.push(CameraOp::Position(x, y, z));
        }

        fn set_render_target(&mut self, target: Option<SurfaceId>) {
            self.ops.push(CameraOp::Target(target));
        }

        fn set_active(&mut self, active: bool) {
            self.ops.push(CameraOp::Active(active));
        }
    }

    /// Software canvas that keeps each written scanline for inspection.
    pub struct RecordingCanvas {
        width: u32,
        height: u32,
        pub rows: Vec<Vec<u8>>,
        pub clears: usize,
        pub resizes: usize,
        pub saved: Option<String>,
        fail_save: bool,
    }

    impl RecordingCanvas {
        pub fn new() -> Self {
            Self {
                width: 0,
                height: 0,
                rows: Vec::new(),
                clears: 0,
                resizes: 0,
                saved: None,
                fail_save: false,
            }
        }

        /// Canvas whose encoder collaborator always fails.
        pub fn failing() -> Self {
            Self {
                fail_save: true,
                ..Self::new()
            }
        }
    }

    impl PixelCanvas for RecordingCanvas {
        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
            self.rows = vec![Vec::new(); height as usize];
            self.resizes += 1;
        }

        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.rows = vec![Vec::new(); self.height as usize];
            self.clears += 1;
        }

        fn put_row(&mut self, y: u32, rgba: &[u8]) {
            self.rows[y as usize] = rgba.to_vec();
        }

        fn save_png(&mut self, name: &str) -> Result<()> {
            if self.fail_save {
                return Err(anyhow!("encoder unavailable"));
            }
            self.saved = Some(name.to_string());
            Ok(())
        }
    }

    /// One image handed to the mock file writer.
    pub struct WrittenImage {
        pub path: PathBuf,
        pub data: Vec<u8>,
        pub width: u32,
        pub height: u32,
    }

    /// File io seam with independently failable write and reload steps.
    pub struct MockFileIo {
        pub writes: Vec<WrittenImage>,
        pub loads: usize,
        fail_write: bool,
        fail_load: bool,
    }

    impl MockFileIo {
        pub fn new() -> Self {
            Self {
                writes: Vec::new(),
                loads: 0,
                fail_write: false,
                fail_load: false,
            }
        }

        pub fn fail_write(mut self) -> Self {
            self.fail_write = true;
            self
        }

        pub fn fail_load(mut self) -> Self {
            self.fail_load = true;
            self
        }
    }

    impl ImageFileIo for MockFileIo {
        fn save_image_data(
            &mut self,
            path: &Path,
            rgba: &[u8],
            width: u32,
            height: u32,
        ) -> Result<()> {
            if self.fail_write {
                return Err(anyhow!("write rejected"));
            }
            self.writes.push(WrittenImage {
                path: path.to_path_buf(),
                data: rgba.to_vec(),
                width,
                height,
            });
            Ok(())
        }

        fn load_image(&mut self, _path: &Path) -> Result<LoadedImage> {
            self.loads += 1;
            if self.fail_load {
                return Err(anyhow!("decode failed"));
            }
            match self.writes.last() {
                Some(written) => Ok(LoadedImage {
                    data: written.data.clone(),
                    width: written.width,
                    height: written.height,
                }),
                None => Ok(LoadedImage {
                    data: vec![0u8; 4],
                    width: 1,
                    height: 1,
                }),
            }
        }
    }

    /// Mini-app exporter recording toast order and album attempts.
    pub struct MockExporter {
        pub toasts: Vec<String>,
        pub album_saves: usize,
        fail_export: bool,
        fail_album: bool,
    }

    impl MockExporter {
        pub fn new() -> Self {
            Self {
                toasts: Vec::new(),
                album_saves: 0,
                fail_export: false,
                fail_album: false,
            }
        }

        pub fn fail_export(mut self) -> Self {
            self.fail_export = true;
            self
        }

        pub fn fail_album(mut self) -> Self {
            self.fail_album = true;
            self
        }
    }

    impl MiniAppExporter for MockExporter {
        fn export_temp_file(&mut self) -> Result<PathBuf> {
            if self.fail_export {
                return Err(anyhow!("export rejected"));
            }
            Ok(PathBuf::from("/tmp/uishot-export.png"))
        }

        fn save_to_album(&mut self, _path: &Path) -> Result<()> {
            self.album_saves += 1;
            if self.fail_album {
                return Err(anyhow!("album permission denied"));
            }
            Ok(())
        }

        fn show_toast(&mut self, message: &str) {
            self.toasts.push(message.to_string());
        }
    }
}
