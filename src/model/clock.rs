use std::time::Instant;

/// The frame rate the per-frame constants were tuned at.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Samples wall-clock time once per frame and hands out the elapsed time
/// since the previous sample.
///
/// The delta is clamped to `[0, max_delta]`, so a window that was hidden or
/// stalled for a while resumes where it left off instead of jumping ahead.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_sample: Option<Instant>,
    max_delta: f64,
}

impl SimulationClock {
    pub fn new(max_delta: f64) -> Self {
        SimulationClock {
            last_sample: None,
            max_delta,
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous sample. The first sample returns zero.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let delta = match self.last_sample {
            // saturating_duration_since gives zero if `now` is earlier
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_sample = Some(now);
        self.clamp(delta)
    }

    pub fn clamp(&self, delta: f64) -> f64 {
        if delta.is_nan() {
            return 0.0;
        }
        nalgebra::clamp(delta, 0.0, self.max_delta)
    }
}

/// How the per-frame constants (self-rotation, moon and belt spin, camera
/// smoothing) are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Apply each constant once per tick, whatever the elapsed time. Faster
    /// displays spin things faster.
    PerFrame,
    /// Scale each constant by the elapsed time, as if it were running at
    /// `REFERENCE_FRAME_RATE`.
    FrameRateIndependent,
}

impl Pacing {
    /// Scales an additive per-frame increment.
    pub fn increment(self, per_frame: f64, delta: f64) -> f64 {
        match self {
            Pacing::PerFrame => per_frame,
            Pacing::FrameRateIndependent => per_frame * delta * REFERENCE_FRAME_RATE,
        }
    }

    /// Scales a per-frame smoothing fraction, so that the remaining distance
    /// decays at the same rate per second.
    pub fn fraction(self, per_frame: f64, delta: f64) -> f64 {
        match self {
            Pacing::PerFrame => per_frame,
            Pacing::FrameRateIndependent => {
                1.0 - (1.0 - per_frame).powf(delta * REFERENCE_FRAME_RATE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = SimulationClock::new(0.1);
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
    }

    #[test]
    fn test_tick_measures_elapsed() {
        let mut clock = SimulationClock::new(0.1);
        let start = Instant::now();
        clock.tick_at(start);
        let delta = clock.tick_at(start + Duration::from_millis(16));
        approx::assert_relative_eq!(delta, 0.016, epsilon = 1e-9);
    }

    #[test]
    fn test_tick_is_clamped() {
        let mut clock = SimulationClock::new(0.1);
        let start = Instant::now() + Duration::from_secs(60);
        clock.tick_at(start);

        // Long stall, e.g. a minimized window
        assert_eq!(clock.tick_at(start + Duration::from_secs(30)), 0.1);

        // Time going backwards shouldn't produce a negative delta
        assert_eq!(clock.tick_at(start), 0.0);
    }

    #[test]
    fn test_clamp() {
        let clock = SimulationClock::new(0.25);
        assert_eq!(clock.clamp(-1.0), 0.0);
        assert_eq!(clock.clamp(0.2), 0.2);
        assert_eq!(clock.clamp(3.0), 0.25);
        assert_eq!(clock.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_pacing() {
        assert_eq!(Pacing::PerFrame.increment(0.05, 0.5), 0.05);
        assert_eq!(Pacing::PerFrame.fraction(0.1, 0.5), 0.1);

        let one_frame = 1.0 / REFERENCE_FRAME_RATE;
        let pacing = Pacing::FrameRateIndependent;
        approx::assert_relative_eq!(pacing.increment(0.05, one_frame), 0.05);
        approx::assert_relative_eq!(pacing.increment(0.05, 2.0 * one_frame), 0.1);
        approx::assert_relative_eq!(pacing.fraction(0.1, one_frame), 0.1);
        approx::assert_relative_eq!(pacing.fraction(0.1, 2.0 * one_frame), 0.19);
        assert_eq!(pacing.fraction(0.1, 0.0), 0.0);
    }
}
