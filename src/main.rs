//! Command-line player: drives an animation into the terminal preview.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pixelwheel::{
    Animation, AnimationKind, KeyWatcher, MatrixConfig, NullSink, PlaybackReport, Player,
    PlayerConfig, PreviewConfig, SinkActor, TerminalSink,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pixelwheel", version)]
#[command(about = "Play animations on an RGB LED matrix (previewed in the terminal)")]
struct Cli {
    /// Rows per panel.
    #[arg(long = "led-rows", default_value_t = 32)]
    rows: u16,

    /// Columns per panel.
    #[arg(long = "led-cols", default_value_t = 32)]
    cols: u16,

    /// Number of daisy-chained panels.
    #[arg(long = "led-chain", default_value_t = 2)]
    chain: u16,

    /// Number of parallel chains.
    #[arg(long = "led-parallel", default_value_t = 1)]
    parallel: u16,

    /// Brightness (0-100).
    #[arg(long, default_value_t = 100)]
    brightness: u8,

    /// Animation to play.
    #[arg(long, value_enum, default_value_t = AnimationKind::HueCircles)]
    animation: AnimationKind,

    /// Milliseconds between frames.
    #[arg(long = "delay-ms", default_value_t = 50)]
    delay_ms: u64,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for randomized animations.
    #[arg(long)]
    seed: Option<u64>,

    /// Discard frames instead of drawing them.
    #[arg(long)]
    headless: bool,
}

impl Cli {
    const fn matrix(&self) -> MatrixConfig {
        MatrixConfig {
            rows: self.rows,
            cols: self.cols,
            chain_length: self.chain,
            parallel: self.parallel,
            brightness: self.brightness,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            println!(
                "played {} frames in {:.1?} ({:?})",
                report.frames, report.elapsed, report.stop_reason
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "playback aborted");
            eprintln!("pixelwheel: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pixelwheel::Result<PlaybackReport> {
    let matrix = cli.matrix();
    let size = matrix.size()?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    let source =
        Animation::new(cli.animation, size, seed).with_delay(Duration::from_millis(cli.delay_ms));
    let player = Player::new(PlayerConfig {
        max_frames: cli.frames,
    });

    if cli.headless {
        return player.play(source, NullSink::new());
    }

    let preview = TerminalSink::stdout(
        size,
        PreviewConfig {
            brightness: matrix.brightness,
            alternate_screen: true,
            title: Some(format!("pixelwheel {} {size}  (q to quit)", cli.animation)),
        },
    )?;
    let sink = SinkActor::spawn(preview)?;
    let keys = KeyWatcher::spawn(player.stop_handle(), Duration::from_millis(20))?;

    let report = player.play(source, sink);
    keys.join();
    report
}
