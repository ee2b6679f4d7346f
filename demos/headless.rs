//! Headless demo: Play each animation for a second without a display.
//!
//! Useful for checking pacing on a machine with no panel attached.

use pixelwheel::{Animation, AnimationKind, NullSink, Player, PlayerConfig, Size};

fn main() -> pixelwheel::Result<()> {
    tracing_subscriber::fmt().init();

    let size = Size::new(64, 32);
    for kind in [
        AnimationKind::HueCircles,
        AnimationKind::Orbit,
        AnimationKind::Sparks,
        AnimationKind::Triad,
    ] {
        // 20 frames at the 50 ms default cadence.
        let player = Player::new(PlayerConfig {
            max_frames: Some(20),
        });
        let mut sink = NullSink::new();
        let report = player.play(Animation::new(kind, size, 7), &mut sink)?;
        println!(
            "{kind:>12}: {} frames in {:.1?}, sink closed: {}",
            report.frames,
            report.elapsed,
            sink.is_closed()
        );
    }
    Ok(())
}
