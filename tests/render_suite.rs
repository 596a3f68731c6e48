use ambient_fx::error::FxError;
use ambient_fx::fx::motion::{Point2D, Viewport};
use ambient_fx::page::Page;
use ambient_fx::render::{Frame, HalfBlockRenderer, KittyRenderer, Renderer};
use ambient_fx::stage::composite_over;
use ambient_fx::surface::{Color, GradientStop, Paint, PixelSurface, StrokePaint, Surface};

/// Build a solid-color RGBA pixel buffer.
fn solid_pixels(w: usize, h: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&[r, g, b, 255]);
    }
    buf
}

fn make_frame<'a>(
    cols: u16,
    visual_rows: u16,
    pw: usize,
    ph: usize,
    pixels: &'a [u8],
    sync: bool,
) -> Frame<'a> {
    Frame {
        term_cols: cols,
        term_rows: visual_rows + 1,
        visual_rows,
        pixel_width: pw,
        pixel_height: ph,
        pixels_rgba: pixels,
        labels: &[],
        hud: "FPS 60",
        hud_rows: 1,
        overlay: None,
        sync_updates: sync,
    }
}

// ── HalfBlock renderer ─────────────────────────────────────────────────────

#[test]
fn halfblock_renders_solid_frame() {
    let pixels = solid_pixels(8, 8, 200, 100, 50);
    let frame = make_frame(8, 4, 8, 8, &pixels, true);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[?2026h"), "missing sync-begin");
    assert!(s.contains("\x1b[?2026l"), "missing sync-end");
    assert!(s.contains("\x1b[?7l") && s.contains("\x1b[?7h"));
    assert!(s.contains('\u{2580}'));
    assert!(s.contains("38;2;200;100;50"));
    assert!(s.contains("48;2;200;100;50"));
    assert!(s.contains("FPS 60"), "HUD text missing");
}

#[test]
fn halfblock_box_filters_larger_buffers() {
    // 2x4 pixels per cell: left column black, right column white.
    let (w, h) = (4usize, 4usize);
    let mut pixels = solid_pixels(w, h, 0, 0, 0);
    for y in 0..h {
        for x in 2..4 {
            let i = (y * w + x) * 4;
            pixels[i..i + 3].copy_from_slice(&[255, 255, 255]);
        }
    }
    let frame = make_frame(2, 1, w, h, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("38;2;0;0;0"));
    assert!(s.contains("38;2;255;255;255"));
    assert_eq!(s.matches('\u{2580}').count(), 2);
}

#[test]
fn halfblock_skips_undersized_buffer() {
    let pixels = solid_pixels(4, 4, 100, 100, 100);
    let frame = make_frame(4, 4, 4, 4, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn hud_lines_are_cut_to_terminal_width() {
    let pixels = solid_pixels(8, 8, 0, 0, 0);
    let mut frame = make_frame(8, 4, 8, 8, &pixels, false);
    frame.hud = "Stage: portfolio | FPS 60\nq quit";
    frame.hud_rows = 2;
    frame.term_rows = 6;
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[5;1H\x1b[0m\x1b[2KStage: p"));
    assert!(!s.contains("Stage: po"));
    assert!(s.contains("\x1b[6;1H\x1b[0m\x1b[2Kq quit"));
}

#[test]
fn halfblock_name() {
    assert_eq!(HalfBlockRenderer::new().name(), "halfblock");
}

#[test]
fn labels_are_written_over_the_image() {
    let page = Page::portfolio(40, 12);
    let pixels = solid_pixels(40, 24, 10, 10, 10);
    let mut frame = make_frame(40, 12, 40, 24, &pixels, false);
    frame.labels = page.regions();
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains(" About "));
    assert!(s.contains("Creative Developer"));
    assert!(s.contains("[ View Work ]"));
    // Row/col are 1-based in CSI positioning.
    assert!(s.contains("\x1b[2;3H"));
}

#[test]
fn overlay_popup_is_boxed() {
    let pixels = solid_pixels(40, 40, 50, 50, 50);
    let mut frame = make_frame(40, 20, 40, 40, &pixels, false);
    frame.overlay = Some("Hotkeys\nq quit");
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("| Hotkeys |"));
    assert!(s.contains("| q quit  |"));
    assert!(s.contains("+---------+"));
}

// ── Kitty renderer ─────────────────────────────────────────────────────────

#[test]
fn kitty_transmits_image_below_text() {
    let pixels = solid_pixels(4, 4, 255, 0, 0);
    let frame = make_frame(8, 2, 4, 4, &pixels, false);
    let mut out = Vec::new();
    let mut r = KittyRenderer::new();
    assert_eq!(r.name(), "kitty");
    r.render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b_Ga=T,f=32,s=4,v=4,t=d,i=1,p=1,c=8,r=2,C=1,q=2,z=-1,m=0;"));
    assert!(s.contains("/wAA/"), "base64 pixel data missing");
    assert!(s.contains("FPS 60"));
}

#[test]
fn kitty_chunks_large_images() {
    // 64x64 RGBA = 16 KiB, more than one 3 KiB chunk.
    let pixels = solid_pixels(64, 64, 1, 2, 3);
    let frame = make_frame(8, 4, 64, 64, &pixels, true);
    let mut out = Vec::new();
    KittyRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains(",m=1;"));
    assert!(s.contains("\x1b_Gm=1;"));
    assert_eq!(s.matches("\x1b_Gm=0;").count(), 1);
    assert!(s.contains("\x1b[?2026h"));
}

#[test]
fn kitty_skips_empty_frames() {
    let pixels = Vec::new();
    let frame = make_frame(0, 0, 0, 0, &pixels, false);
    let mut out = Vec::new();
    KittyRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty());
}

// ── Surface and compositing ────────────────────────────────────────────────

#[test]
fn surface_requires_drawable_area() {
    let err = PixelSurface::new(Viewport::new(0.0, 10.0, 1.0)).err().unwrap();
    assert!(matches!(err, FxError::SurfaceUnavailable(_)));
    assert!(PixelSurface::new(Viewport::new(100_000.0, 100_000.0, 1.0)).is_err());
    let err = PixelSurface::new(Viewport::new(f32::NAN, 10.0, 1.0)).err().unwrap();
    assert!(matches!(err, FxError::InvalidViewport(_)));
}

#[test]
fn surface_maps_logical_to_device_pixels() {
    let mut s = PixelSurface::new(Viewport::new(100.0, 60.0, 0.5)).unwrap();
    assert_eq!(s.backing_size(), (50, 30));
    s.fill_circle(Point2D::new(50.0, 30.0), 4.0, Color::rgb(0, 255, 0), None);
    let i = (15 * 50 + 25) * 4;
    assert_eq!(&s.pixels()[i..i + 4], &[0, 255, 0, 255]);

    s.resize(Viewport::new(20.0, 20.0, 1.0));
    assert_eq!(s.backing_size(), (20, 20));
    assert!(s.pixels().iter().all(|b| *b == 0));
}

#[test]
fn glow_reaches_past_the_shape() {
    let mut s = PixelSurface::new(Viewport::new(40.0, 40.0, 1.0)).unwrap();
    s.fill_circle(
        Point2D::new(20.0, 20.0),
        2.0,
        Color::rgb(255, 255, 255),
        Some(ambient_fx::surface::Glow::new(Color::rgb(255, 0, 255), 10.0)),
    );
    let i = (20 * 40 + 26) * 4;
    assert!(s.pixels()[i + 3] > 0);
    let far = (20 * 40 + 35) * 4;
    assert_eq!(s.pixels()[far + 3], 0);
}

#[test]
fn gradient_stroke_runs_from_first_to_second_color() {
    let mut s = PixelSurface::new(Viewport::new(40.0, 10.0, 1.0)).unwrap();
    s.stroke_segment(
        Point2D::new(2.0, 5.0),
        Point2D::new(38.0, 5.0),
        4.0,
        StrokePaint::Gradient(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)),
        None,
    );
    let px = |x: usize| {
        let i = (5 * 40 + x) * 4;
        (s.pixels()[i], s.pixels()[i + 2])
    };
    assert!(px(3).0 > px(3).1);
    assert!(px(37).1 > px(37).0);
}

#[test]
fn linear_paint_samples_stops() {
    let paint = Paint::Linear {
        from: Point2D::new(0.0, 0.0),
        to: Point2D::new(100.0, 0.0),
        stops: vec![
            GradientStop::new(0.0, Color::rgb(0, 0, 0)),
            GradientStop::new(1.0, Color::rgb(200, 200, 200)),
        ],
    };
    assert_eq!(paint.color_at(Point2D::new(-10.0, 0.0)), Color::rgb(0, 0, 0));
    assert_eq!(paint.color_at(Point2D::new(50.0, 7.0)), Color::rgb(100, 100, 100));
    assert_eq!(paint.color_at(Point2D::new(500.0, 0.0)), Color::rgb(200, 200, 200));
}

#[test]
fn clear_makes_surface_transparent() {
    let mut s = PixelSurface::new(Viewport::new(10.0, 10.0, 1.0)).unwrap();
    s.fill(&Paint::Solid(Color::rgb(9, 9, 9)));
    assert!(s.pixels().chunks_exact(4).all(|p| p[3] == 255));
    s.clear();
    assert!(s.pixels().iter().all(|b| *b == 0));
}

#[test]
fn composite_over_blends_straight_alpha() {
    let mut dst = solid_pixels(2, 1, 0, 0, 0);
    let src = vec![255, 0, 0, 128, 0, 255, 0, 0];
    composite_over(&mut dst, &src);
    assert_eq!(&dst[0..4], &[128, 0, 0, 255]);
    assert_eq!(&dst[4..8], &[0, 0, 0, 255]);
}
