//! Player: The playback loop that paces frames into a sink.
//!
//! The player asks a [`FrameSource`] for a frame, hands it to a
//! [`DisplaySink`], then waits for the delay the source asked for. That wait
//! is the only place the loop blocks, and it races against the stop channel
//! so a [`StopHandle`] ends the session without waiting out the delay.

use super::messages::StopReason;
use super::sink::DisplaySink;
use crate::animation::FrameSource;
use crate::buffer::Size;
use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Cloneable handle that stops a [`Player`] from any thread.
#[derive(Debug, Clone)]
pub struct StopHandle {
    /// Wakes a player blocked in its pacing wait.
    wake: Sender<()>,
    /// Sticky stop flag.
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request shutdown. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        // A full channel already holds a wake-up.
        let _ = self.wake.try_send(());
    }

    /// Whether shutdown has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Summary of a finished playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames accepted by the sink.
    pub frames: u64,
    /// Wall time from the first frame request to the sink being closed.
    pub elapsed: Duration,
    /// Why the session ended.
    pub stop_reason: StopReason,
}

/// Per-session bookkeeping.
struct PlaybackSession {
    size: Size,
    frames: u64,
    started: Instant,
}

/// The playback loop.
///
/// A stop is sticky: once any [`StopHandle`] has fired, every later
/// [`play`](Self::play) on the same player returns
/// [`StopReason::Cancelled`] without producing a frame. Create a new player
/// for a new session.
pub struct Player {
    /// Configuration.
    config: PlayerConfig,
    /// Wake-up sender, cloned into stop handles.
    wake_tx: Sender<()>,
    /// Wake-up receiver raced against the pacing delay.
    wake_rx: Receiver<()>,
    /// Sticky stop flag.
    stopped: Arc<AtomicBool>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Player {
    /// Create a new player.
    pub fn new(config: PlayerConfig) -> Self {
        let (wake_tx, wake_rx) = bounded(1);
        Self {
            config,
            wake_tx,
            wake_rx,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle that can stop this player.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            wake: self.wake_tx.clone(),
            stopped: Arc::clone(&self.stopped),
        }
    }

    /// Whether shutdown has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Play `source` into `sink` until stopped, the frame limit is reached,
    /// or either side fails.
    ///
    /// Returns immediately with [`StopReason::Cancelled`] if this player has
    /// already been stopped.
    ///
    /// The sink is closed on every exit path. Cancellation is reported as
    /// `Ok`; a frame or sink failure is returned unchanged and nothing is
    /// submitted after it. If both the session and closing the sink fail,
    /// the session error wins.
    pub fn play<F, S>(&self, mut source: F, mut sink: S) -> Result<PlaybackReport>
    where
        F: FrameSource,
        S: DisplaySink,
    {
        let mut session = PlaybackSession {
            size: source.size(),
            frames: 0,
            started: Instant::now(),
        };
        info!(size = %session.size, max_frames = ?self.config.max_frames, "playback started");

        let outcome = self.run(&mut source, &mut sink, &mut session);
        let closed = sink.close();

        let stop_reason = match (outcome, closed) {
            (Ok(reason), Ok(())) => reason,
            (Ok(_), Err(e)) => {
                warn!(frames = session.frames, error = %e, "closing the sink failed");
                return Err(e);
            }
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!(error = %close_err, "closing the sink failed after a playback error");
                }
                warn!(frames = session.frames, error = %e, "playback failed");
                return Err(e);
            }
        };

        let report = PlaybackReport {
            frames: session.frames,
            elapsed: session.started.elapsed(),
            stop_reason,
        };
        info!(
            frames = report.frames,
            elapsed_ms = report.elapsed.as_millis() as u64,
            reason = ?report.stop_reason,
            "playback finished"
        );
        Ok(report)
    }

    /// Main playback loop.
    fn run<F, S>(
        &self,
        source: &mut F,
        sink: &mut S,
        session: &mut PlaybackSession,
    ) -> Result<StopReason>
    where
        F: FrameSource,
        S: DisplaySink,
    {
        loop {
            if self.is_stopped() {
                return Ok(StopReason::Cancelled);
            }
            if self.limit_reached(session.frames) {
                return Ok(StopReason::FrameLimit);
            }

            let (frame, delay) = source.next_frame()?;
            let deadline = Instant::now().checked_add(delay);

            if frame.size() != session.size {
                return Err(Error::FrameSize {
                    expected: session.size,
                    actual: frame.size(),
                });
            }

            // A stop that arrived while the frame was produced wins.
            if self.is_stopped() {
                return Ok(StopReason::Cancelled);
            }

            sink.submit(frame)?;
            session.frames += 1;
            trace!(frame = session.frames, ?delay, "frame submitted");

            if self.limit_reached(session.frames) {
                return Ok(StopReason::FrameLimit);
            }

            let woke = match deadline {
                Some(deadline) => self.wake_rx.recv_deadline(deadline),
                // Too far out to represent: only a stop can end the wait.
                None => self.wake_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match woke {
                Ok(()) => {
                    debug!(frames = session.frames, "stop requested during pacing wait");
                    return Ok(StopReason::Cancelled);
                }
                Err(RecvTimeoutError::Timeout) => {}
                // Unreachable while `self` holds a sender.
                Err(RecvTimeoutError::Disconnected) => return Ok(StopReason::Cancelled),
            }
        }
    }

    fn limit_reached(&self, frames: u64) -> bool {
        self.config.max_frames.is_some_and(|max| frames >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::SinkActor;
    use crate::animation::{Animation, AnimationKind, DEFAULT_FRAME_DELAY};
    use crate::buffer::{Frame, Rgb};
    use std::thread;

    /// Source that stamps its tick number into pixel (0, 0) and can fail or
    /// change size at a chosen tick.
    struct Scripted {
        frame: Frame,
        tick: u8,
        delay: Duration,
        fail_at: Option<u8>,
        resize_at: Option<u8>,
    }

    impl Scripted {
        fn new(delay: Duration) -> Self {
            Self {
                frame: Frame::new(8, 4),
                tick: 0,
                delay,
                fail_at: None,
                resize_at: None,
            }
        }
    }

    impl FrameSource for Scripted {
        fn size(&self) -> Size {
            Size::new(8, 4)
        }

        fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
            self.tick += 1;
            if Some(self.tick) == self.fail_at {
                return Err(Error::animation(format!("tick {} exploded", self.tick)));
            }
            if Some(self.tick) == self.resize_at {
                self.frame = Frame::new(4, 4);
            }
            self.frame.clear();
            self.frame.set(0, 0, Rgb::new(self.tick, 0, 0));
            Ok((&self.frame, self.delay))
        }
    }

    #[derive(Default)]
    struct Recorder {
        sequence: Vec<u8>,
        closes: usize,
        fail_at: Option<usize>,
    }

    impl DisplaySink for Recorder {
        fn submit(&mut self, frame: &Frame) -> Result<()> {
            if Some(self.sequence.len() + 1) == self.fail_at {
                return Err(Error::sink("rejected"));
            }
            self.sequence.push(frame.get(0, 0).map_or(0, |p| p.r));
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.closes += 1;
            Ok(())
        }
    }

    fn limited(frames: u64) -> Player {
        Player::new(PlayerConfig {
            max_frames: Some(frames),
        })
    }

    #[test]
    fn test_frames_arrive_in_order_without_gaps() {
        let mut sink = Recorder::default();
        let report = limited(20)
            .play(Scripted::new(Duration::ZERO), &mut sink)
            .unwrap();

        assert_eq!(report.frames, 20);
        assert_eq!(report.stop_reason, StopReason::FrameLimit);
        assert_eq!(sink.sequence, (1..=20).collect::<Vec<u8>>());
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_source_error_stops_submissions() {
        let mut source = Scripted::new(Duration::ZERO);
        source.fail_at = Some(5);
        let mut sink = Recorder::default();

        let err = Player::default().play(&mut source, &mut sink).unwrap_err();

        assert_eq!(err.to_string(), "animation error: tick 5 exploded");
        assert_eq!(sink.sequence, vec![1, 2, 3, 4]);
        assert_eq!(sink.closes, 1);
        assert_eq!(source.tick, 5);
    }

    #[test]
    fn test_sink_error_is_fatal() {
        let mut source = Scripted::new(Duration::ZERO);
        let mut sink = Recorder {
            fail_at: Some(3),
            ..Recorder::default()
        };

        let err = Player::default().play(&mut source, &mut sink).unwrap_err();

        assert!(matches!(err, Error::Sink(_)));
        assert_eq!(sink.sequence, vec![1, 2]);
        assert_eq!(sink.closes, 1);
        // No frame is produced after the rejected one.
        assert_eq!(source.tick, 3);
    }

    #[test]
    fn test_frame_size_change_is_fatal() {
        let mut source = Scripted::new(Duration::ZERO);
        source.resize_at = Some(3);
        let mut sink = Recorder::default();

        let err = Player::default().play(&mut source, &mut sink).unwrap_err();

        assert!(matches!(
            err,
            Error::FrameSize { expected, actual }
                if expected == Size::new(8, 4) && actual == Size::new(4, 4)
        ));
        assert_eq!(sink.sequence, vec![1, 2]);
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_stop_interrupts_pacing_wait() {
        let player = Player::default();
        let stop = player.stop_handle();
        let mut sink = Recorder::default();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stop.stop();
        });

        let started = Instant::now();
        let report = player
            .play(Scripted::new(Duration::from_secs(10)), &mut sink)
            .unwrap();
        let waited = started.elapsed();
        stopper.join().unwrap();

        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert_eq!(report.frames, 1);
        assert_eq!(sink.sequence, vec![1]);
        assert_eq!(sink.closes, 1);
        assert!(waited < Duration::from_secs(2), "waited {waited:?}");
    }

    #[test]
    fn test_stop_within_one_tick() {
        let player = Player::default();
        let stop = player.stop_handle();
        let mut sink = Recorder::default();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(120));
            let requested = Instant::now();
            stop.stop();
            requested
        });

        let source = Animation::new(AnimationKind::HueCircles, Size::new(64, 32), 0);
        let report = player.play(source, &mut sink).unwrap();
        let returned = Instant::now();
        let requested = stopper.join().unwrap();

        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert!(report.frames >= 1);
        let latency = returned.duration_since(requested);
        assert!(latency <= DEFAULT_FRAME_DELAY, "stop took {latency:?}");
    }

    #[test]
    fn test_stop_before_play_submits_nothing() {
        let player = Player::default();
        player.stop_handle().stop();
        assert!(player.is_stopped());

        let mut sink = Recorder::default();
        let report = player
            .play(Scripted::new(Duration::ZERO), &mut sink)
            .unwrap();

        assert_eq!(report.frames, 0);
        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert!(sink.sequence.is_empty());
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let player = Player::default();
        let stop = player.stop_handle();
        stop.stop();
        stop.stop();
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_pacing_respects_delay() {
        let started = Instant::now();
        limited(3)
            .play(Scripted::new(Duration::from_millis(20)), Recorder::default())
            .unwrap();
        // Two waits: none after the final frame.
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_stop_during_production_submits_nothing_more() {
        struct StopsItself {
            inner: Scripted,
            stop: StopHandle,
            stop_at: u8,
        }

        impl FrameSource for StopsItself {
            fn size(&self) -> Size {
                self.inner.size()
            }

            fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
                if self.inner.tick + 1 == self.stop_at {
                    self.stop.stop();
                }
                self.inner.next_frame()
            }
        }

        let player = Player::default();
        let source = StopsItself {
            inner: Scripted::new(Duration::ZERO),
            stop: player.stop_handle(),
            stop_at: 3,
        };
        let mut sink = Recorder::default();

        let report = player.play(source, &mut sink).unwrap();

        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert_eq!(report.frames, 2);
        assert_eq!(sink.sequence, vec![1, 2]);
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_stopped_player_stays_stopped() {
        let player = limited(3);
        let stop = player.stop_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            stop.stop();
        });
        let first = player
            .play(Scripted::new(Duration::from_secs(10)), Recorder::default())
            .unwrap();
        stopper.join().unwrap();
        assert_eq!(first.stop_reason, StopReason::Cancelled);

        let mut sink = Recorder::default();
        let second = player
            .play(Scripted::new(Duration::ZERO), &mut sink)
            .unwrap();
        assert_eq!(second.stop_reason, StopReason::Cancelled);
        assert_eq!(second.frames, 0);
        assert!(sink.sequence.is_empty());
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_threaded_sink_rejection_is_immediate() {
        let mut source = Scripted::new(Duration::from_millis(200));
        let sink = SinkActor::spawn(Recorder {
            fail_at: Some(1),
            ..Recorder::default()
        })
        .unwrap();

        let started = Instant::now();
        let err = Player::default().play(&mut source, sink).unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, Error::Sink(ref m) if m == "rejected"));
        // The rejected frame is the only one produced, and no pacing wait ran.
        assert_eq!(source.tick, 1);
        assert!(elapsed < Duration::from_millis(150), "took {elapsed:?}");
    }
}
