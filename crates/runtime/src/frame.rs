/// Deterministic frame counter.
///
/// Animation is advanced per frame, not per wall-clock second, so the index is
/// the only timebase the pipeline needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
}

impl Frame {
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    pub fn first() -> Self {
        Self::new(0)
    }

    pub fn next(self) -> Self {
        Self::new(self.index.wrapping_add(1))
    }
}
