use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::WorldRect;

/// Abstraction over the host scene graph's node, the capture target.
///
/// The pipeline never owns the node; it only toggles visibility for the
/// duration of a capture and queries the world bounds, which may shift
/// between the request and the deferred readback.
pub trait SceneNode {
    /// Axis-aligned world-space bounding rectangle, if the node currently
    /// has a measurable transform.
    fn world_bounds(&self) -> Option<WorldRect>;

    fn set_active(&mut self, active: bool);
}

/// Shared handle to a scene node, held across the deferred readback.
/// The pipeline is single-threaded and cooperative.
pub type NodeHandle = Rc<RefCell<dyn SceneNode>>;
