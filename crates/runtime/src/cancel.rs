use std::cell::Cell;
use std::rc::Rc;

/// Single-threaded cancellation flag shared between a frame loop and its owner.
///
/// Cloning yields another handle to the same flag. Once cancelled it stays
/// cancelled; a restarted loop gets a fresh token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
