//! The capture pipeline: frames a scene subtree with an off-screen camera,
//! awaits the render, reads the pixels back and hands them to the configured
//! persistence strategy.

use tracing::{debug, error};

use crate::error::CaptureError;
use crate::geometry::CaptureFraming;
use crate::persist::{CaptureResult, PersistenceStrategy};
use crate::pixels::{PixelBuffer, extraction_origin};
use crate::traits::camera::OffscreenCamera;
use crate::traits::platform::PlatformInfo;
use crate::traits::renderer::{RenderFence, RenderScheduler};
use crate::traits::scene::NodeHandle;
use crate::traits::surface::RenderSurface;

/// Completion callback: invoked exactly once per request, after all
/// platform-specific work for the request has resolved.
pub type CompletionCallback = Box<dyn FnOnce(CaptureResult)>;

/// One in-flight capture request.
struct PendingCapture {
    name: String,
    node: NodeHandle,
    fence: RenderFence,
    on_complete: Option<CompletionCallback>,
}

/// Off-screen snapshot pipeline for one capture target at a time.
///
/// Single-threaded and cooperative: `capture_node` returns immediately and
/// the deferred readback runs from [`Snapshot::update`] once the render
/// fence resolves. Overlapping requests are rejected rather than corrupting
/// the shared render surface. There is no cancellation; a request runs to
/// completion or failure.
pub struct Snapshot {
    camera: Box<dyn OffscreenCamera>,
    surface: Box<dyn RenderSurface>,
    scheduler: Box<dyn RenderScheduler>,
    strategy: Box<dyn PersistenceStrategy>,
    platform: PlatformInfo,
    default_target: NodeHandle,
    pending: Option<PendingCapture>,
}

impl Snapshot {
    pub fn new(
        camera: Box<dyn OffscreenCamera>,
        surface: Box<dyn RenderSurface>,
        scheduler: Box<dyn RenderScheduler>,
        strategy: Box<dyn PersistenceStrategy>,
        platform: PlatformInfo,
        default_target: NodeHandle,
    ) -> Self {
        Self {
            camera,
            surface,
            scheduler,
            strategy,
            platform,
            default_target,
            pending: None,
        }
    }

    /// Capture the default target configured at construction.
    pub fn capture(
        &mut self,
        name: &str,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), CaptureError> {
        self.capture_node(name, self.default_target.clone(), on_complete)
    }

    /// Start capturing `node` into an artifact named `name`.
    ///
    /// Fails fast with [`CaptureError::CaptureInFlight`] while a prior
    /// request is pending, and with [`CaptureError::GeometryUnavailable`]
    /// when the node has no measurable bounds. On success the outcome
    /// arrives later through `on_complete`; without a callback the result
    /// is dropped.
    pub fn capture_node(
        &mut self,
        name: &str,
        node: NodeHandle,
        on_complete: Option<CompletionCallback>,
    ) -> Result<(), CaptureError> {
        if self.pending.is_some() {
            return Err(CaptureError::CaptureInFlight);
        }

        let bounds = node
            .borrow()
            .world_bounds()
            .ok_or(CaptureError::GeometryUnavailable)?;
        let framing = CaptureFraming::resolve(&bounds)?;

        node.borrow_mut().set_active(true);
        self.surface
            .resize(framing.surface_width, framing.surface_height);
        self.camera
            .set_ortho_half_height(framing.ortho_half_height);
        let (x, y, z) = framing.camera_position;
        self.camera.set_world_position(x, y, z);
        self.camera.set_render_target(Some(self.surface.id()));
        self.camera.set_active(true);

        let fence = self.scheduler.request_render();
        debug!(
            "capture {name} framed at {}x{}",
            framing.surface_width, framing.surface_height
        );
        self.pending = Some(PendingCapture {
            name: name.to_string(),
            node,
            fence,
            on_complete,
        });
        Ok(())
    }

    pub fn is_capturing(&self) -> bool {
        self.pending.is_some()
    }

    /// Drive the pipeline one cooperative tick: if the in-flight request's
    /// render fence has resolved, read back, persist and complete it.
    pub fn update(&mut self) {
        if let Some(pending) = self.pending.take_if(|p| p.fence.is_signaled()) {
            self.finish(pending);
        }
    }

    fn finish(&mut self, pending: PendingCapture) {
        let readback = self.read_back(&pending);

        // Deactivate regardless of outcome so the off-screen camera never
        // keeps rendering past the request.
        pending.node.borrow_mut().set_active(false);
        self.camera.set_active(false);
        self.camera.set_render_target(None);

        let result = match readback {
            Ok(frame) => self.strategy.persist(&frame, &pending.name),
            Err(e) => {
                error!("capture {} failed: {e}", pending.name);
                CaptureResult::failed()
            }
        };

        if let Some(on_complete) = pending.on_complete {
            on_complete(result);
        }
    }

    /// Re-resolve the target bounds (layout may have shifted while the
    /// render settled) and read the covered sub-rectangle back.
    fn read_back(&mut self, pending: &PendingCapture) -> Result<PixelBuffer, CaptureError> {
        let bounds = pending
            .node
            .borrow()
            .world_bounds()
            .ok_or(CaptureError::GeometryUnavailable)?;
        let width = bounds.width.floor() as u32;
        let height = bounds.height.floor() as u32;
        if width == 0 || height == 0 {
            return Err(CaptureError::GeometryUnavailable);
        }

        let (_, surface_height) = self.surface.size();
        let (x, y) = extraction_origin(&bounds, surface_height, &self.platform);
        debug!("readback rect: {x} {y} {width} {height}");

        self.surface
            .read_pixels(x, y, width, height)
            .map_err(|e| CaptureError::ReadbackFailed(e.to_string()))
    }
}
