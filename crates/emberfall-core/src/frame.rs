//! Fixed-timestep frame stabilization.
//!
//! Converts variable display frame deltas into a bounded number of fixed
//! logic ticks. Pure arithmetic over time: identical inputs give identical
//! tick counts.

use std::collections::VecDeque;

use crate::config::TimingConfig;

/// Logic ticks per second.
pub const DEFAULT_TICK_RATE: f64 = 60.0;
/// Upper bound on ticks run for one displayed frame.
pub const DEFAULT_MAX_STEPS: u32 = 5;
/// Rolling FPS window length.
pub const FPS_WINDOW: usize = 30;
/// Samples required before an FPS value is reported.
pub const FPS_MIN_SAMPLES: usize = 5;

/// Load classification derived from measured FPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    Normal = 0,
    Degraded = 1,
    Critical = 2,
}

impl LoadSeverity {
    pub fn from_fps(fps: Option<f64>) -> Self {
        match fps {
            Some(f) if f < 20.0 => LoadSeverity::Critical,
            Some(f) if f < 50.0 => LoadSeverity::Degraded,
            _ => LoadSeverity::Normal,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

/// Max steps per frame after adaptive reduction for the measured FPS.
///
/// >=50 fps keeps 100%, 30-50 keeps 80%, 20-30 keeps 60%, below 20 keeps
/// 40%. Never below one step.
pub fn adaptive_max_steps(max_steps: u32, fps: Option<f64>) -> u32 {
    let percent = match fps {
        None => 100,
        Some(f) if f >= 50.0 => 100,
        Some(f) if f >= 30.0 => 80,
        Some(f) if f >= 20.0 => 60,
        Some(_) => 40,
    };
    (max_steps * percent / 100).max(1)
}

/// One accumulator step: returns `(ticks, new_accumulator)`.
///
/// `ticks = floor((accumulator + elapsed) / fixed_step)` clamped to
/// `max_steps`; whole consumed ticks are subtracted and any residual above
/// two tick-lengths is clamped down to two tick-lengths.
pub fn compute_steps(
    accumulator: f64,
    elapsed: f64,
    fixed_step: f64,
    max_steps: u32,
) -> (u32, f64) {
    let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    };
    let total = accumulator.max(0.0) + elapsed;
    if fixed_step <= 0.0 {
        return (0, 0.0);
    }
    let whole = (total / fixed_step).floor();
    let ticks = if whole >= f64::from(max_steps) {
        max_steps
    } else {
        whole as u32
    };
    let mut remaining = total - f64::from(ticks) * fixed_step;
    let drift_cap = fixed_step * 2.0;
    if remaining > drift_cap {
        remaining = drift_cap;
    }
    (ticks, remaining.max(0.0))
}

/// Stateful wrapper tracking the accumulator, FPS window and visibility.
#[derive(Debug, Clone)]
pub struct FrameStabilizer {
    fixed_step: f64,
    max_steps: u32,
    accumulator: f64,
    samples: VecDeque<f64>,
    window: usize,
    min_samples: usize,
    visible: bool,
    /// Drop the first delta after becoming visible again.
    discard_next: bool,
}

impl Default for FrameStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE, DEFAULT_MAX_STEPS)
    }
}

impl FrameStabilizer {
    pub fn new(tick_rate_hz: f64, max_steps: u32) -> Self {
        let tick_rate_hz = if tick_rate_hz > 0.0 {
            tick_rate_hz
        } else {
            DEFAULT_TICK_RATE
        };
        Self {
            fixed_step: 1.0 / tick_rate_hz,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            samples: VecDeque::with_capacity(FPS_WINDOW),
            window: FPS_WINDOW,
            min_samples: FPS_MIN_SAMPLES,
            visible: true,
            discard_next: false,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        let mut s = Self::new(config.tick_rate_hz, config.max_steps_per_frame);
        s.window = config.fps_window.max(1);
        s.min_samples = config.fps_min_samples.clamp(1, s.window);
        s
    }

    /// Tick length in seconds.
    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    pub fn tick_ms(&self) -> f64 {
        self.fixed_step * 1000.0
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// While hidden no time accumulates; on return the stale delta is
    /// dropped instead of replayed.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.discard_next = true;
            tracing::debug!("surface visible again, discarding next frame delta");
        }
        self.visible = visible;
    }

    /// Rolling average FPS, once enough samples exist.
    pub fn fps(&self) -> Option<f64> {
        if self.samples.len() < self.min_samples {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn severity(&self) -> LoadSeverity {
        LoadSeverity::from_fps(self.fps())
    }

    pub fn current_max_steps(&self) -> u32 {
        adaptive_max_steps(self.max_steps, self.fps())
    }

    fn record_sample(&mut self, elapsed: f64) {
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(1.0 / elapsed);
    }

    /// Feed one displayed frame's elapsed seconds; returns ticks to run now.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if !self.visible {
            return 0;
        }
        if self.discard_next {
            self.discard_next = false;
            return 0;
        }
        self.record_sample(elapsed);
        let max = self.current_max_steps();
        let (ticks, remaining) = compute_steps(self.accumulator, elapsed, self.fixed_step, max);
        if ticks == max && remaining >= self.fixed_step {
            tracing::trace!(ticks, backlog = remaining, "frame budget exhausted");
        }
        self.accumulator = remaining;
        ticks
    }

    /// Drop any pending partial tick, e.g. when a run starts.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.discard_next = false;
    }
}
