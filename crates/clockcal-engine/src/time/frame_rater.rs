use std::time::{Duration, Instant};

/// Frame-rate limiter with an FPS readout.
///
/// Usage per frame:
/// 1. `start()` before doing any work
/// 2. `wait()` after the work; sleeps for whatever is left of the frame budget
/// 3. `fps(interval)` to get `(fps, potential_fps)` at most once per `interval`
///
/// `potential_fps` is the rate the loop could reach without pacing, derived from
/// the time spent between `start()` and `wait()`.
///
/// Every clock-reading method has an `_at` variant taking an explicit `Instant`
/// so pacing math can be tested without sleeping.
#[derive(Debug, Clone)]
pub struct FrameRater {
    target_fps: u32,
    frame_budget: Duration,
    frame_start: Option<Instant>,

    // Readout window.
    window_start: Instant,
    frames: u32,
    busy: Duration,
}

impl FrameRater {
    /// Creates a limiter pacing to `target_fps` (at least 1).
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            frame_budget: Duration::from_secs(1) / target_fps,
            frame_start: None,
            window_start: Instant::now(),
            frames: 0,
            busy: Duration::ZERO,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time allotted to one frame.
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Marks the start of a frame.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.frame_start = Some(now);
    }

    /// Blocks the calling thread until the frame budget is spent.
    pub fn wait(&mut self) {
        if let Some(pause) = self.finish_at(Instant::now()) {
            std::thread::sleep(pause);
        }
    }

    /// Records the end of the frame body and returns the pause needed to hold
    /// the target rate, or `None` if the frame already overran its budget.
    ///
    /// A call without a matching `start` is ignored.
    pub fn finish_at(&mut self, now: Instant) -> Option<Duration> {
        let start = self.frame_start.take()?;
        let spent = now.saturating_duration_since(start);

        self.frames = self.frames.saturating_add(1);
        self.busy += spent;

        self.frame_budget.checked_sub(spent).filter(|d| !d.is_zero())
    }

    /// Returns `(fps, potential_fps)` once at least `interval` has passed since
    /// the previous readout, then starts a new measurement window.
    pub fn fps(&mut self, interval: Duration) -> Option<(f32, f32)> {
        self.fps_at(Instant::now(), interval)
    }

    pub fn fps_at(&mut self, now: Instant, interval: Duration) -> Option<(f32, f32)> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < interval || self.frames == 0 || elapsed.is_zero() {
            return None;
        }

        let frames = self.frames as f32;
        let fps = frames / elapsed.as_secs_f32();
        let potential = if self.busy.is_zero() {
            fps
        } else {
            frames / self.busy.as_secs_f32()
        };

        self.window_start = now;
        self.frames = 0;
        self.busy = Duration::ZERO;

        Some((fps, potential))
    }
}

impl Default for FrameRater {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn budget_follows_target_rate() {
        assert_eq!(FrameRater::new(50).frame_budget(), ms(20));
        assert_eq!(FrameRater::new(0).target_fps(), 1);
    }

    #[test]
    fn finish_returns_remaining_budget() {
        let mut r = FrameRater::new(50);
        let t0 = Instant::now();
        r.start_at(t0);
        assert_eq!(r.finish_at(t0 + ms(5)), Some(ms(15)));
    }

    #[test]
    fn overrun_frame_needs_no_pause() {
        let mut r = FrameRater::new(50);
        let t0 = Instant::now();
        r.start_at(t0);
        assert_eq!(r.finish_at(t0 + ms(20)), None);

        r.start_at(t0);
        assert_eq!(r.finish_at(t0 + ms(35)), None);
    }

    #[test]
    fn finish_without_start_is_ignored() {
        let mut r = FrameRater::new(50);
        assert_eq!(r.finish_at(Instant::now()), None);
        assert_eq!(r.fps_at(Instant::now() + ms(500), ms(1)), None);
    }

    #[test]
    fn fps_waits_for_interval() {
        let mut r = FrameRater::new(60);
        let t0 = r.window_start;
        r.start_at(t0);
        r.finish_at(t0 + ms(1));
        assert_eq!(r.fps_at(t0 + ms(30), ms(60)), None);
    }

    #[test]
    fn fps_reports_actual_and_potential_rate() {
        let mut r = FrameRater::new(50);
        let t0 = r.window_start;

        // Ten frames, 5 ms of work each, one every 20 ms.
        for i in 0..10u64 {
            let start = t0 + ms(i * 20);
            r.start_at(start);
            r.finish_at(start + ms(5));
        }

        let (fps, potential) = r.fps_at(t0 + ms(200), ms(60)).expect("readout due");
        assert!((fps - 50.0).abs() < 0.01, "fps = {fps}");
        assert!((potential - 200.0).abs() < 0.01, "potential = {potential}");

        // The window restarts after a readout.
        assert_eq!(r.fps_at(t0 + ms(210), ms(60)), None);
    }
}
