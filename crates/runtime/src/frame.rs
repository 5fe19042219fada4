use foundation::time::Time;

/// Deterministic frame metadata.
///
/// This is the primary timebase for replay. It is intentionally small and
/// pure so it can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

/// Coalescing redraw flag.
///
/// Any number of requests between two frames collapse into a single redraw.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RedrawRequest {
    pending: bool,
    total: u64,
}

impl RedrawRequest {
    pub fn request(&mut self) {
        self.pending = true;
        self.total += 1;
    }

    pub fn is_requested(&self) -> bool {
        self.pending
    }

    /// Clears the flag, returning whether a redraw was pending.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Number of requests made over the lifetime of the flag.
    pub fn total_requests(&self) -> u64 {
        self.total
    }
}
