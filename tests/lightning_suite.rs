use ambient_fx::fx::entropy::SequenceEntropy;
use ambient_fx::fx::lightning::{Bolt, FlashState, LightningFlash, INTERVAL_MS, JITTER, OPACITY_STEP};
use ambient_fx::fx::motion::Viewport;

fn vp() -> Viewport {
    Viewport::new(1024.0, 768.0, 1.0)
}

#[test]
fn triggers_only_after_threshold_elapses() {
    // Constant 0.5 draws put the threshold at the middle of the interval.
    let mut rng = SequenceEntropy::constant(0.5);
    let mut flash = LightningFlash::new(0.0);
    let threshold = INTERVAL_MS.0 + 0.5 * (INTERVAL_MS.1 - INTERVAL_MS.0);
    assert!(matches!(flash.state(), FlashState::Idle { last_flash_ms } if *last_flash_ms == 0.0));

    flash.step(threshold as f64 - 1.0, &vp(), &mut rng);
    assert!(!flash.is_flashing());
    flash.step(threshold as f64, &vp(), &mut rng);
    assert!(!flash.is_flashing());
    flash.step(threshold as f64 + 1.0, &vp(), &mut rng);
    assert!(flash.is_flashing());
    assert_eq!(flash.opacity(), 1.0);
    assert_eq!(flash.flashes(), 1);
}

#[test]
fn opacity_decays_monotonically_back_to_idle() {
    let mut rng = SequenceEntropy::constant(0.5);
    let mut flash = LightningFlash::new(0.0);
    flash.step(5000.0, &vp(), &mut rng);
    assert!(flash.is_flashing());

    let mut last = flash.opacity();
    let mut decay_ticks = 0;
    while flash.is_flashing() {
        flash.step(5000.0 + decay_ticks as f64, &vp(), &mut rng);
        decay_ticks += 1;
        let now = flash.opacity();
        assert!(now < last);
        if flash.is_flashing() {
            assert!((last - now - OPACITY_STEP).abs() < 1e-4);
        }
        last = now;
        assert!(decay_ticks <= 20, "flash never ended");
    }
    assert_eq!(decay_ticks, 13);
    match flash.state() {
        FlashState::Idle { last_flash_ms, .. } => assert_eq!(*last_flash_ms, 5000.0),
        other => panic!("expected idle, got {other:?}"),
    }
}

#[test]
fn next_interval_counts_from_previous_trigger() {
    let mut rng = SequenceEntropy::constant(0.5);
    let mut flash = LightningFlash::new(0.0);
    let mut triggers = Vec::new();
    let mut seen = 0;
    for k in 0..400u32 {
        let now = k as f64 * 16.0;
        flash.step(now, &vp(), &mut rng);
        if flash.flashes() != seen {
            seen = flash.flashes();
            triggers.push(now);
        }
    }
    assert!(triggers.len() >= 2);
    let gap = triggers[1] - triggers[0];
    assert!(gap > 2100.0 && gap <= 2116.0, "gap = {gap}");
}

#[test]
fn idle_threshold_is_redrawn_every_tick() {
    // A long first draw followed by minimum draws: the second tick already
    // compares against the short interval.
    let mut draws: Vec<f32> = vec![0.99];
    draws.extend(std::iter::repeat_n(0.0, 500));
    let mut rng = SequenceEntropy::new(draws);
    let mut flash = LightningFlash::new(0.0);
    let mut first = None;
    for k in 0..400u32 {
        let now = k as f64 * 16.0;
        flash.step(now, &vp(), &mut rng);
        if flash.is_flashing() {
            first = Some(now);
            break;
        }
    }
    let first = first.expect("no flash within 6.4 s");
    assert!(first > INTERVAL_MS.0 as f64, "first = {first}");
    assert!(first < 1300.0, "first = {first}");
}

#[test]
fn flashing_and_opacity_agree() {
    let mut rng = fastrand::Rng::with_seed(11);
    let mut flash = LightningFlash::new(0.0);
    for k in 0..2000u32 {
        flash.step(k as f64 * 16.0, &vp(), &mut rng);
        assert_eq!(flash.is_flashing(), flash.opacity() > 0.0);
        assert!(flash.opacity() <= 1.0);
    }
    assert!(flash.flashes() > 0);
}

#[test]
fn bolt_spans_top_to_bottom() {
    let v = vp();
    let mut rng = fastrand::Rng::with_seed(12);
    for _ in 0..200 {
        let bolt = Bolt::generate(&v, &mut rng);
        assert!((10..=20).contains(&bolt.segments()));
        let first = bolt.points[0];
        assert_eq!(first.y, 0.0);
        assert!(first.x >= v.width * 0.2 && first.x <= v.width * 0.8);
        let last = bolt.points[bolt.points.len() - 1];
        assert!((last.y - v.height).abs() < 1e-2);
        for pair in bolt.points.windows(2) {
            assert!(pair[1].y > pair[0].y);
            assert!((pair[1].x - pair[0].x).abs() <= JITTER + 1e-3);
        }
    }
}

#[test]
fn segment_count_extremes() {
    let v = vp();
    assert_eq!(Bolt::generate(&v, &mut SequenceEntropy::constant(0.0)).segments(), 10);
    assert_eq!(Bolt::generate(&v, &mut SequenceEntropy::constant(0.999_999)).segments(), 20);
}
