/// Coalesces preview updates so that at most one is applied per frame.
///
/// Scheduling while an update is already pending overwrites it; the caller
/// only needs to request a new frame when [`schedule`](Self::schedule)
/// returns `true`.
#[derive(Debug, Clone, Default)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Store `value` for the next frame. Returns `true` if no frame was
    /// outstanding yet.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    /// Take the pending value when the frame fires.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop any outstanding update.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
