use crate::cancel::CancelToken;
use crate::frame::Frame;

/// Cooperative one-step-per-tick driver.
///
/// The host (a vsync callback in the browser, a plain loop headless) calls
/// [`TickLoop::step`] once per refresh and re-arms only while it returns
/// `true`. No step begins after the token is cancelled.
#[derive(Debug)]
pub struct TickLoop {
    frame: Frame,
    token: CancelToken,
}

impl TickLoop {
    pub fn new(first: Frame) -> Self {
        Self {
            frame: first,
            token: CancelToken::new(),
        }
    }

    /// Handle that stops this loop from the outside.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// The frame the next `step` will run.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Runs one tick. Returns whether the caller should schedule another.
    pub fn step<F>(&mut self, tick: F) -> bool
    where
        F: FnOnce(Frame),
    {
        if self.token.is_cancelled() {
            tracing::debug!(frame = self.frame.index, "tick loop cancelled");
            return false;
        }
        tick(self.frame);
        self.frame = self.frame.next();
        !self.token.is_cancelled()
    }

    /// Runs up to `frames` ticks back to back, stopping early on cancellation.
    /// Returns the number of ticks that ran.
    pub fn run_for<F>(&mut self, frames: u64, mut tick: F) -> u64
    where
        F: FnMut(Frame),
    {
        let mut ran = 0;
        while ran < frames && self.is_running() {
            self.step(&mut tick);
            ran += 1;
        }
        ran
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(Frame::first())
    }
}
