use web_time::{Duration, Instant};

/// Frame pacing: per-frame delta time, smoothed FPS and optional frame
/// limiting.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    frame_count: u64,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frame_count: 0,
        }
    }

    /// Whether enough time has passed since the last tick to start a frame.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Start a frame. Returns the seconds since the previous tick (or since
    /// construction for the first frame).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_count += 1;
        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of ticks so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the latest tick lands on a multiple of `every` frames.
    #[must_use]
    pub fn is_nth_frame(&self, every: u64) -> bool {
        every > 0 && self.frame_count > 0 && self.frame_count % every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_frame_fires_on_multiples() {
        let mut timing = FrameTiming::new(0);
        assert!(!timing.is_nth_frame(3));
        let hits: Vec<bool> = (0..6)
            .map(|_| {
                let _ = timing.tick();
                timing.is_nth_frame(3)
            })
            .collect();
        assert_eq!(hits, vec![false, false, true, false, false, true]);
        assert!(!timing.is_nth_frame(0));
    }

    #[test]
    fn first_tick_measures_from_construction() {
        std::thread::sleep(Duration::from_millis(60));
        let mut timing = FrameTiming::new(0);
        assert!(timing.tick() < 0.06);
    }

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn limited_waits_for_min_duration() {
        let timing = FrameTiming::new(1);
        // A fresh timer at 1 FPS is nowhere near a second old.
        assert!(!timing.should_render());
    }

    #[test]
    fn fps_converges_towards_frame_rate() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..500 {
            timing.record(1.0 / 120.0);
        }
        assert!((timing.fps() - 120.0).abs() < 1.0, "{}", timing.fps());
        assert_eq!(timing.frame_count(), 500);
    }

    #[test]
    fn zero_dt_leaves_fps_unchanged() {
        let mut timing = FrameTiming::new(0);
        timing.record(0.0);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn tick_is_non_negative_and_counts() {
        let mut timing = FrameTiming::new(0);
        assert!(timing.tick() >= 0.0);
        assert!(timing.tick() >= 0.0);
        assert_eq!(timing.frame_count(), 2);
    }
}
