use std::time::{Duration, Instant};

/// Largest step handed to the rig by default (a 10 fps hitch).
pub const DEFAULT_MAX_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
enum ClockMode {
    Realtime { last_update: Instant },
    Fixed { step: f32 },
}

/// Produces the `dt` of each rig tick.
///
/// In realtime mode the delta comes from the wall clock; in fixed mode every
/// tick reports the same step, which keeps simulations and tests
/// reproducible. Either way the returned delta is clamped to `max_dt` so a
/// long stall cannot feed the springs one huge integration step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: ClockMode,
    max_dt: f32,
    /// Total simulated time
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl FrameClock {
    /// Wall-clock driven, starting now.
    #[must_use]
    pub fn realtime() -> Self {
        Self {
            mode: ClockMode::Realtime {
                last_update: Instant::now(),
            },
            max_dt: DEFAULT_MAX_DT,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Fixed step of `1 / hz` seconds.
    #[must_use]
    pub fn fixed(hz: u32) -> Self {
        Self {
            mode: ClockMode::Fixed {
                step: 1.0 / hz.max(1) as f32,
            },
            max_dt: DEFAULT_MAX_DT,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Caps the delta returned by [`tick`](Self::tick). A value that is not
    /// finite and positive is ignored and the current cap is kept.
    #[must_use]
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        if max_dt.is_finite() && max_dt > 0.0 {
            self.max_dt = max_dt;
        } else {
            log::warn!("Ignoring max_dt = {max_dt}, keeping {}", self.max_dt);
        }
        self
    }

    /// Advances the clock and returns this tick's delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let raw = match &mut self.mode {
            ClockMode::Realtime { last_update } => {
                let now = Instant::now();
                let delta = now - *last_update;
                *last_update = now;
                delta.as_secs_f32()
            }
            ClockMode::Fixed { step } => *step,
        };

        let dt = raw.min(self.max_dt);
        self.elapsed += Duration::from_secs_f32(dt);
        self.frame_count += 1;
        dt
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::realtime()
    }
}
