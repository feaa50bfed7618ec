use super::surface::Pivot;

/// Fixed length of the snap-back transition.
pub const BOUNCE_DURATION_MS: f64 = 300.0;

/// Snap-back sampler. A pure function of the caller's clock: the scheduler
/// (raf in the browser, a plain loop in tests) only decides when to sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounce {
    from: f64,
    pivot: Pivot,
    start_ms: f64,
}

impl Bounce {
    pub fn new(from: f64, pivot: Pivot, start_ms: f64) -> Self {
        Self {
            from: from.max(1.0),
            pivot,
            start_ms,
        }
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= BOUNCE_DURATION_MS
    }

    /// Interpolated scale at `now_ms`, converging on 1.0.
    pub fn sample(&self, now_ms: f64) -> f64 {
        let t = ((now_ms - self.start_ms) / BOUNCE_DURATION_MS).clamp(0.0, 1.0);
        self.from + (1.0 - self.from) * decelerate(t)
    }
}

/// Decelerating ease: steep start, zero slope at the end.
pub fn decelerate(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}
