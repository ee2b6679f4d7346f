//! Frame benchmark: Measure per-tick frame production for each animation.
//!
//! Target: well under the 50 ms pacing interval on a 64x32 panel.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixelwheel::animation::{Animation, AnimationKind, FrameSource};
use pixelwheel::buffer::diff::{render_diff, DiffState};
use pixelwheel::{Frame, Rgb, Size};

const PANEL: Size = Size::new(64, 32);

fn next_frame(c: &mut Criterion) {
    for kind in [
        AnimationKind::HueCircles,
        AnimationKind::Orbit,
        AnimationKind::Sparks,
        AnimationKind::Triad,
    ] {
        let mut animation = Animation::new(kind, PANEL, 1);
        c.bench_function(&format!("next_frame_{kind}"), |b| {
            b.iter(|| {
                let (frame, delay) = animation.next_frame().unwrap();
                black_box((frame.lit_pixels(), delay))
            })
        });
    }
}

fn diff_full_change(c: &mut Criterion) {
    let current = Frame::with_size(PANEL);
    let mut next = Frame::with_size(PANEL);
    next.fill(Rgb::new(255, 128, 64));
    let mut output = Vec::with_capacity(65536);

    c.bench_function("diff_full_change", |b| {
        b.iter(|| {
            output.clear();
            let mut state = DiffState::new();
            render_diff(
                black_box(&current),
                black_box(&next),
                (0, 0),
                &mut output,
                &mut state,
            )
        })
    });
}

criterion_group!(benches, next_frame, diff_full_change);
criterion_main!(benches);
