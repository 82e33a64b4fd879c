use crate::error::CaptureError;

/// Z coordinate of the capture plane the off-screen camera sits on.
pub const CAPTURE_PLANE_Z: f32 = 0.0;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the rectangle in world coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Render-target size and camera framing derived from a capture target's
/// world bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureFraming {
    pub surface_width: u32,
    pub surface_height: u32,
    pub ortho_half_height: f32,
    pub camera_position: (f32, f32, f32),
}

impl CaptureFraming {
    /// Derive framing for a target's world bounding rectangle.
    ///
    /// The surface covers the rectangle at one pixel per world unit, with
    /// fractional extents floored. Degenerate bounds fail fast rather than
    /// producing a zero-sized render target.
    pub fn resolve(bounds: &WorldRect) -> Result<Self, CaptureError> {
        let surface_width = bounds.width.floor() as u32;
        let surface_height = bounds.height.floor() as u32;
        if surface_width == 0 || surface_height == 0 {
            return Err(CaptureError::GeometryUnavailable);
        }

        let (cx, cy) = bounds.center();
        Ok(Self {
            surface_width,
            surface_height,
            ortho_half_height: bounds.height / 2.0,
            camera_position: (cx, cy, CAPTURE_PLANE_Z),
        })
    }
}
