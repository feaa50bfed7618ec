use super::bounce::Bounce;
use super::surface::{Pivot, ScrollMetrics, ScrollSurface, Stretch};

/// Pull distance at which the stretch saturates, in density-independent units.
pub const MAX_PULL_DIP: f64 = 100.0;
/// Stretch saturation: at most 15% visual distortion.
pub const MAX_STRETCH: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// Per-gesture bookkeeping carried by the Dragging / Overscrolling states.
#[derive(Clone, Copy, Debug, PartialEq)]
struct GestureSession {
    _start_y: f64,
    last_y: f64,
    total_delta: f64,
}

impl GestureSession {
    fn begin(y: f64) -> Self {
        Self {
            _start_y: y,
            last_y: y,
            total_delta: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    /// Pointer is down; no boundary pull has qualified yet.
    Dragging(GestureSession),
    /// At least one move qualified; the accumulator drives the stretch.
    Overscrolling(GestureSession),
    /// Pointer released while overscrolling; snap-back in flight.
    Animating(Bounce),
}

/// Elastic overscroll state machine.
///
/// Feed it the pointer stream via [`on_pointer`](Self::on_pointer) and, while
/// [`is_animating`](Self::is_animating), sample the snap-back once per frame
/// via [`tick`](Self::tick). Everything it knows about the scroller goes
/// through [`ScrollSurface`], so it never touches the DOM directly.
#[derive(Clone, Debug)]
pub struct ElasticOverscroll {
    max_pull_px: f64,
    phase: Phase,
}

impl ElasticOverscroll {
    /// `density` converts the design constant into physical pixels once, at
    /// construction. A degenerate factor falls back to 1.0.
    pub fn new(density: f64) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        Self {
            max_pull_px: MAX_PULL_DIP * density,
            phase: Phase::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    /// Feeds one pointer event. Returns whether the event was claimed;
    /// claimed events must be withheld from the native scroller.
    pub fn on_pointer(
        &mut self,
        surface: &impl ScrollSurface,
        action: PointerAction,
        y: f64,
        now_ms: f64,
    ) -> bool {
        match action {
            PointerAction::Down => {
                // A new touch always preempts a running snap-back.
                self.phase = Phase::Dragging(GestureSession::begin(y));
                false
            }
            PointerAction::Move => self.on_move(surface, y),
            PointerAction::Up | PointerAction::Cancel => self.on_release(surface, now_ms),
        }
    }

    fn on_move(&mut self, surface: &impl ScrollSurface, y: f64) -> bool {
        let (mut session, was_overscrolling) = match self.phase {
            Phase::Dragging(s) => (s, false),
            Phase::Overscrolling(s) => (s, true),
            _ => return false,
        };
        let delta = y - session.last_y;
        session.last_y = y;

        // Boundary state is recomputed from fresh metrics on every move since
        // the content height can change mid-gesture.
        let qualifies = surface
            .metrics()
            .filter(ScrollMetrics::is_valid)
            .is_some_and(|m| m.at_top() && delta > 0.0 || m.at_bottom() && delta < 0.0);

        if !qualifies {
            // Falls through to native scrolling. An overscrolling session
            // keeps its accumulator until release.
            self.phase = if was_overscrolling {
                Phase::Overscrolling(session)
            } else {
                Phase::Dragging(session)
            };
            return false;
        }

        if !was_overscrolling {
            session.total_delta = 0.0;
        }
        session.total_delta += delta;
        surface.set_stretch(self.stretch_for(session.total_delta));
        self.phase = Phase::Overscrolling(session);
        true
    }

    fn on_release(&mut self, surface: &impl ScrollSurface, now_ms: f64) -> bool {
        match self.phase {
            Phase::Overscrolling(_) => {
                let current = surface.stretch();
                let from = current.scale.clamp(1.0, 1.0 + MAX_STRETCH);
                self.phase = Phase::Animating(Bounce::new(from, current.pivot, now_ms));
                true
            }
            Phase::Dragging(_) => {
                self.phase = Phase::Idle;
                false
            }
            Phase::Idle | Phase::Animating(_) => false,
        }
    }

    /// Advances the snap-back one frame. Returns whether it is still running.
    pub fn tick(&mut self, surface: &impl ScrollSurface, now_ms: f64) -> bool {
        let Phase::Animating(bounce) = self.phase else {
            return false;
        };
        if bounce.is_done(now_ms) {
            surface.set_stretch(Stretch {
                scale: 1.0,
                pivot: bounce.pivot(),
            });
            self.phase = Phase::Idle;
            return false;
        }
        surface.set_stretch(Stretch {
            scale: bounce.sample(now_ms),
            pivot: bounce.pivot(),
        });
        true
    }

    fn stretch_for(&self, total_delta: f64) -> Stretch {
        let scale = 1.0 + (total_delta.abs() / self.max_pull_px).min(MAX_STRETCH);
        Stretch {
            scale,
            pivot: if total_delta > 0.0 {
                Pivot::Top
            } else {
                Pivot::Bottom
            },
        }
    }
}
