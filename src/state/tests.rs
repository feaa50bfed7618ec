use super::bounce::{decelerate, Bounce, BOUNCE_DURATION_MS};
use super::overscroll::MAX_STRETCH;
use super::*;

use std::cell::{Cell, RefCell};

use super::overscroll::PointerAction::{Cancel, Down, Move, Up};

#[derive(Default)]
struct TestSurface {
    metrics: Cell<Option<ScrollMetrics>>,
    stretch: Cell<Stretch>,
    applied: RefCell<Vec<Stretch>>,
}

impl TestSurface {
    fn with_metrics(m: ScrollMetrics) -> Self {
        let s = Self::default();
        s.metrics.set(Some(m));
        s
    }

    fn applied_count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl ScrollSurface for TestSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        self.metrics.get()
    }

    fn stretch(&self) -> Stretch {
        self.stretch.get()
    }

    fn set_stretch(&self, stretch: Stretch) {
        self.stretch.set(stretch);
        self.applied.borrow_mut().push(stretch);
    }
}

/// Viewport 400 over 2000px of unscaled content; scrolled to `offset`.
fn metrics_at(offset: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_offset: offset,
        viewport_height: 400.0,
        content_height: 2000.0,
        content_scale: 1.0,
    }
}

fn assert_scale(stretch: Stretch, expected: f64) {
    assert!(
        (stretch.scale - expected).abs() < 1e-9,
        "scale {} != {}",
        stretch.scale,
        expected
    );
}

// Density 2.0 throughout: the stretch saturates after 200px of pull.

#[test]
fn pull_down_at_top_stretches_and_claims() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    assert!(!c.on_pointer(&s, Down, 100.0, 0.0));
    assert!(c.on_pointer(&s, Move, 110.0, 16.0));

    let stretch = s.stretch();
    assert_scale(stretch, 1.05);
    assert_eq!(stretch.pivot, Pivot::Top);
}

#[test]
fn stretch_saturates_and_stays_clamped() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    for i in 1..=40 {
        assert!(c.on_pointer(&s, Move, (i * 20) as f64, i as f64 * 16.0));
    }
    // 800px of pull, far past the 200px saturation point.
    assert_eq!(s.stretch().scale, 1.0 + MAX_STRETCH);
    for st in s.applied.borrow().iter() {
        assert!(st.scale >= 1.0 && st.scale <= 1.0 + MAX_STRETCH);
    }
}

#[test]
fn pull_up_at_bottom_pivots_on_bottom_edge() {
    // offset 1600 + viewport 400 reaches the 2000px content end.
    let s = TestSurface::with_metrics(metrics_at(1600.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 500.0, 0.0);
    // Pulling down at the bottom is not an overscroll.
    assert!(!c.on_pointer(&s, Move, 510.0, 16.0));
    assert!(c.on_pointer(&s, Move, 490.0, 32.0));

    let stretch = s.stretch();
    assert_scale(stretch, 1.1);
    assert_eq!(stretch.pivot, Pivot::Bottom);
}

#[test]
fn content_scale_factors_into_bottom_detection() {
    let zoomed = ScrollMetrics {
        scroll_offset: 1600.0,
        viewport_height: 400.0,
        content_height: 1000.0,
        content_scale: 2.0,
    };
    assert!(zoomed.at_bottom());

    let s = TestSurface::with_metrics(zoomed);
    let mut c = ElasticOverscroll::new(2.0);
    c.on_pointer(&s, Down, 500.0, 0.0);
    assert!(c.on_pointer(&s, Move, 480.0, 16.0));

    // One pixel short of the scaled content end: back to native scrolling.
    let s = TestSurface::with_metrics(ScrollMetrics {
        scroll_offset: 1599.0,
        ..zoomed
    });
    let mut c = ElasticOverscroll::new(2.0);
    c.on_pointer(&s, Down, 500.0, 0.0);
    assert!(!c.on_pointer(&s, Move, 480.0, 16.0));
    assert_eq!(s.applied_count(), 0);
}

#[test]
fn mid_content_moves_fall_through() {
    let s = TestSurface::with_metrics(metrics_at(500.0));
    let mut c = ElasticOverscroll::new(2.0);

    assert!(!c.on_pointer(&s, Down, 100.0, 0.0));
    assert!(!c.on_pointer(&s, Move, 140.0, 16.0));
    assert!(!c.on_pointer(&s, Move, 60.0, 32.0));
    assert!(!c.on_pointer(&s, Up, 60.0, 48.0));

    assert_eq!(s.applied_count(), 0);
    assert!(!c.is_animating());
}

#[test]
fn missing_metrics_never_claim() {
    let s = TestSurface::default();
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 100.0, 0.0);
    assert!(!c.on_pointer(&s, Move, 200.0, 16.0));
    assert_eq!(s.applied_count(), 0);
}

#[test]
fn degenerate_metrics_never_claim() {
    let s = TestSurface::with_metrics(ScrollMetrics {
        scroll_offset: 0.0,
        viewport_height: f64::NAN,
        content_height: 2000.0,
        content_scale: 1.0,
    });
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 100.0, 0.0);
    assert!(!c.on_pointer(&s, Move, 200.0, 16.0));
    assert_eq!(s.applied_count(), 0);
}

#[test]
fn release_snaps_back_to_neutral() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    c.on_pointer(&s, Move, 60.0, 16.0);
    assert!(c.on_pointer(&s, Up, 60.0, 1000.0));
    assert!(c.is_animating());

    let mut last = s.stretch().scale;
    for now in [1016.0, 1100.0, 1200.0, 1299.0] {
        assert!(c.tick(&s, now));
        let scale = s.stretch().scale;
        assert!(scale <= last && scale >= 1.0);
        last = scale;
    }
    assert!(!c.tick(&s, 1000.0 + BOUNCE_DURATION_MS));
    assert_eq!(s.stretch().scale, 1.0);
    assert!(!c.is_animating());
}

#[test]
fn new_down_preempts_snap_back() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    c.on_pointer(&s, Move, 60.0, 16.0);
    c.on_pointer(&s, Up, 60.0, 100.0);
    assert!(c.tick(&s, 150.0));

    c.on_pointer(&s, Down, 10.0, 160.0);
    assert!(!c.is_animating());
    let writes = s.applied_count();
    // A queued frame after the preempting touch writes nothing.
    assert!(!c.tick(&s, 170.0));
    assert_eq!(s.applied_count(), writes);
}

#[test]
fn accumulator_starts_fresh_each_overscroll() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    c.on_pointer(&s, Move, 300.0, 16.0);
    assert_eq!(s.stretch().scale, 1.0 + MAX_STRETCH);
    c.on_pointer(&s, Up, 300.0, 32.0);

    c.on_pointer(&s, Down, 0.0, 500.0);
    c.on_pointer(&s, Move, 10.0, 516.0);
    assert_scale(s.stretch(), 1.05);
}

#[test]
fn lapsed_boundary_keeps_session_until_release() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    assert!(c.on_pointer(&s, Move, 40.0, 16.0));

    // Late content layout pushes the scroller off the boundary mid-gesture.
    s.metrics.set(Some(metrics_at(50.0)));
    assert!(!c.on_pointer(&s, Move, 80.0, 32.0));

    // The session is still an overscroll, so release snaps back.
    assert!(c.on_pointer(&s, Up, 80.0, 48.0));
    assert!(c.is_animating());
}

#[test]
fn cancel_releases_like_up() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(2.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    c.on_pointer(&s, Move, 40.0, 16.0);
    assert!(c.on_pointer(&s, Cancel, 40.0, 32.0));
    assert!(c.is_animating());
}

#[test]
fn density_scales_the_saturation_distance() {
    let s = TestSurface::with_metrics(metrics_at(0.0));
    let mut c = ElasticOverscroll::new(3.0);

    c.on_pointer(&s, Down, 0.0, 0.0);
    c.on_pointer(&s, Move, 30.0, 16.0);
    // 30px of pull over a 300px range.
    assert_scale(s.stretch(), 1.1);
}

#[test]
fn bounce_decelerates_monotonically_to_one() {
    let b = Bounce::new(1.15, Pivot::Top, 0.0);
    assert!((b.sample(0.0) - 1.15).abs() < 1e-9);
    assert!((b.sample(150.0) - 1.0375).abs() < 1e-9);

    let mut last = b.sample(0.0);
    for step in 1..=30 {
        let v = b.sample(step as f64 * 10.0);
        assert!(v <= last);
        last = v;
    }
    assert_eq!(b.sample(BOUNCE_DURATION_MS), 1.0);
    assert!(!b.is_done(299.0));
    assert!(b.is_done(300.0));
}

#[test]
fn decelerate_is_steep_then_flat() {
    assert_eq!(decelerate(0.0), 0.0);
    assert_eq!(decelerate(1.0), 1.0);
    // Front-loaded: half the time covers three quarters of the distance.
    assert!((decelerate(0.5) - 0.75).abs() < 1e-9);
    assert!(decelerate(0.999) > 0.999);
}
