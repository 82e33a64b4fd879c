use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Single-shot signal resolved by the render collaborator once the frame
/// requested for a capture has actually been drawn into the render target.
///
/// Replaces a wall-clock settle delay: the pipeline polls the fence each
/// cooperative tick instead of guessing how long a render pass takes.
#[derive(Debug, Clone)]
pub struct RenderFence(Rc<Cell<bool>>);

/// Resolving end of a [`RenderFence`], kept by the render collaborator.
#[derive(Debug, Clone)]
pub struct FenceSignal(Rc<Cell<bool>>);

impl RenderFence {
    pub fn new() -> (RenderFence, FenceSignal) {
        let flag = Rc::new(Cell::new(false));
        (RenderFence(flag.clone()), FenceSignal(flag))
    }

    pub fn is_signaled(&self) -> bool {
        self.0.get()
    }
}

impl FenceSignal {
    pub fn signal(&self) {
        self.0.set(true);
    }
}

/// Abstraction over the host render pipeline's frame scheduling.
/// Implementations: `ManualRenderScheduler` (host-driven), engine render
/// queues in the embedding application.
pub trait RenderScheduler {
    /// Request that the next frame be rendered with the capture camera
    /// active, returning a fence resolved when that frame completes.
    fn request_render(&mut self) -> RenderFence;
}

/// Scheduler for hosts that drive frames themselves: the host calls
/// [`ManualRenderScheduler::frame_completed`] at the end of each render
/// frame, resolving every fence handed out since the last frame.
///
/// A host without a real render-complete notification can call
/// `frame_completed` from a timer instead, reproducing a fixed settle delay
/// at the integration layer.
#[derive(Default)]
pub struct ManualRenderScheduler {
    pending: Vec<FenceSignal>,
}

impl ManualRenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_completed(&mut self) {
        for signal in self.pending.drain(..) {
            signal.signal();
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl RenderScheduler for ManualRenderScheduler {
    fn request_render(&mut self) -> RenderFence {
        let (fence, signal) = RenderFence::new();
        self.pending.push(signal);
        fence
    }
}

impl<T: RenderScheduler + ?Sized> RenderScheduler for Rc<RefCell<T>> {
    fn request_render(&mut self) -> RenderFence {
        self.borrow_mut().request_render()
    }
}
