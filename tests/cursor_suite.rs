use ambient_fx::fx::cursor::{PointerCursor, TimedSparkle, TRAIL_CAPACITY};
use ambient_fx::fx::motion::{Point2D, Viewport};
use ambient_fx::host::Element;
use ambient_fx::surface::{Color, Glow, Paint, StrokePaint, Surface};

/// Counts circles; everything else is ignored.
struct CircleCounter {
    viewport: Viewport,
    circles: usize,
}

impl Surface for CircleCounter {
    fn viewport(&self) -> Viewport {
        self.viewport
    }
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
    fn clear(&mut self) {}
    fn fill(&mut self, _paint: &Paint) {}
    fn fill_circle(&mut self, _c: Point2D, _r: f32, _color: Color, _glow: Option<Glow>) {
        self.circles += 1;
    }
    fn fill_ellipse(&mut self, _c: Point2D, _rx: f32, _ry: f32, _color: Color, _glow: Option<Glow>) {}
    fn stroke_segment(&mut self, _a: Point2D, _b: Point2D, _w: f32, _p: StrokePaint, _g: Option<Glow>) {}
}

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

fn button() -> Element {
    Element::new("button")
}

#[test]
fn starts_centered_and_idle() {
    let c = PointerCursor::new(&vp());
    assert_eq!(c.state().position, Point2D::new(400.0, 300.0));
    assert!(!c.state().is_over_interactive);
    assert!(c.state().sparkles.is_empty());
}

#[test]
fn sparkle_only_on_hover_entry() {
    let mut c = PointerCursor::new(&vp());
    let b = button();
    c.on_pointer_move(Point2D::new(10.0, 10.0), Some(&b), 0.0);
    c.on_pointer_move(Point2D::new(12.0, 10.0), Some(&b), 10.0);
    assert_eq!(c.state().sparkles.len(), 1);
    assert!(c.state().is_over_interactive);

    c.on_pointer_move(Point2D::new(300.0, 10.0), None, 20.0);
    assert!(!c.state().is_over_interactive);
    c.on_pointer_move(Point2D::new(12.0, 10.0), Some(&b), 30.0);
    assert_eq!(c.state().sparkles.len(), 2);
}

#[test]
fn plain_elements_do_not_count_as_interactive() {
    let mut c = PointerCursor::new(&vp());
    c.on_pointer_move(Point2D::new(10.0, 10.0), Some(&Element::new("h1")), 0.0);
    assert!(!c.state().is_over_interactive);
    assert!(c.state().sparkles.is_empty());
}

#[test]
fn interactive_element_rules() {
    assert!(Element::new("a").is_interactive());
    assert!(Element::new("BUTTON").is_interactive());
    assert!(Element::new("div").with_role("button").is_interactive());
    assert!(Element::new("span").with_class("cursor-pointer").is_interactive());
    assert!(!Element::new("div").with_role("link").is_interactive());
    assert!(!Element::new("p").with_class("pointer").is_interactive());
}

#[test]
fn sparkle_expires_after_lifetime() {
    let mut c = PointerCursor::new(&vp());
    c.on_pointer_move(Point2D::new(10.0, 10.0), Some(&button()), 0.0);
    c.step(399.0, &vp());
    assert_eq!(c.state().sparkles.len(), 1);
    c.step(400.0, &vp());
    assert!(c.state().sparkles.is_empty());
}

#[test]
fn overlapping_sparkles_expire_independently() {
    let mut c = PointerCursor::new(&vp());
    let b = button();
    c.on_pointer_move(Point2D::new(10.0, 10.0), Some(&b), 0.0);
    c.on_pointer_move(Point2D::new(300.0, 10.0), None, 100.0);
    c.on_pointer_move(Point2D::new(10.0, 10.0), Some(&b), 200.0);
    c.step(250.0, &vp());
    assert_eq!(c.state().sparkles.len(), 2);
    c.step(450.0, &vp());
    assert_eq!(c.state().sparkles.len(), 1);
    assert_eq!(c.state().sparkles[0].born_ms, 200.0);
}

#[test]
fn sparkle_keyframes() {
    let s = TimedSparkle {
        position: Point2D::ZERO,
        born_ms: 1000.0,
    };
    let close = |a: (f32, f32), b: (f32, f32)| (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4;
    assert!(close(s.keyframe(1000.0), (1.0, 1.0)));
    assert!(close(s.keyframe(1320.0), (0.7, 1.5)));
    assert!(close(s.keyframe(1400.0), (0.0, 2.0)));
    assert!(!s.is_expired(1399.9));
    assert!(s.is_expired(1400.0));
}

#[test]
fn trail_records_each_tick_up_to_capacity() {
    let mut c = PointerCursor::new(&vp());
    for i in 0..20 {
        c.on_pointer_move(Point2D::new(i as f32 * 10.0, 50.0), None, i as f64);
        c.step(i as f64, &vp());
    }
    assert_eq!(c.trail().len(), TRAIL_CAPACITY);
    assert_eq!(c.trail().to_vec()[TRAIL_CAPACITY - 1], Point2D::new(190.0, 50.0));
}

#[test]
fn ghost_trail_only_drawn_while_hovering() {
    let mut c = PointerCursor::new(&vp());
    for i in 0..5 {
        c.on_pointer_move(Point2D::new(i as f32, 0.0), None, 0.0);
        c.step(0.0, &vp());
    }
    let mut s = CircleCounter { viewport: vp(), circles: 0 };
    c.draw(&mut s, 0.0);
    assert_eq!(s.circles, 1, "orb only");

    c.on_pointer_move(Point2D::new(5.0, 0.0), Some(&button()), 10.0);
    c.step(10.0, &vp());
    let mut s = CircleCounter { viewport: vp(), circles: 0 };
    c.draw(&mut s, 10.0);
    // Ghosts for every trail point, the orb and one live sparkle.
    assert_eq!(s.circles, c.trail().len() + 2);
}

#[test]
fn non_finite_position_recenters() {
    let mut c = PointerCursor::new(&vp());
    c.on_pointer_move(Point2D::new(1.0, 1.0), None, 0.0);
    c.step(0.0, &vp());
    c.on_pointer_move(Point2D::new(f32::NAN, 1.0), None, 1.0);
    c.step(1.0, &vp());
    assert_eq!(c.state().position, vp().center());
    assert_eq!(c.trail().to_vec(), vec![vp().center()]);
}
