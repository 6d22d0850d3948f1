use serde::{Deserialize, Serialize};

/// Top-level engine configuration, loaded from `emberfall.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    pub run: RunConfig,
    pub storage: StorageConfig,
}

/// Fixed-step clock parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_rate_hz: f64,
    pub max_steps_per_frame: u32,
    pub fps_window: usize,
    pub fps_min_samples: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_steps_per_frame: 5,
            fps_window: 30,
            fps_min_samples: 5,
        }
    }
}

/// Run pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Clearing this wave wins the run.
    pub max_wave: u32,
    /// Real-time delay between a boss defeat and the next wave.
    pub wave_advance_delay_ms: u64,
    pub damage_text_cap: usize,
    /// Fixed RNG seed; random per run when unset.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_wave: 50,
            wave_advance_delay_ms: 1500,
            damage_text_cap: crate::damage_text::DAMAGE_TEXT_CAP,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: "saves".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from `EMBERFALL_CONFIG` or `config/emberfall.toml`, then apply
    /// environment overrides. Missing or unparseable files fall back to
    /// defaults.
    pub fn load() -> Self {
        let path = std::env::var("EMBERFALL_CONFIG")
            .unwrap_or_else(|_| "config/emberfall.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<EngineConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    EngineConfig::default()
                },
            },
            Err(_) => EngineConfig::default(),
        };
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("EMBERFALL_SAVE_DIR") {
            self.storage.save_dir = dir;
        }
        if let Ok(val) = std::env::var("EMBERFALL_MAX_WAVE")
            && let Ok(n) = val.parse()
        {
            self.run.max_wave = n;
        }
    }

    /// Log warnings for values the engine will have to paper over.
    pub fn validate(&self) {
        if !(self.timing.tick_rate_hz.is_finite() && self.timing.tick_rate_hz > 0.0) {
            tracing::warn!(
                tick_rate_hz = self.timing.tick_rate_hz,
                "tick_rate_hz must be positive, the default 60 Hz will be used"
            );
        }
        if self.timing.max_steps_per_frame == 0 {
            tracing::warn!("max_steps_per_frame is 0, one step per frame will be used");
        }
        if self.run.max_wave == 0 {
            tracing::warn!("max_wave is 0, the first boss defeat wins the run");
        }
        if self.run.damage_text_cap == 0 {
            tracing::warn!("damage_text_cap is 0, no damage numbers will be shown");
        }
    }

    /// Tick length in milliseconds.
    pub fn tick_ms(&self) -> f64 {
        if self.timing.tick_rate_hz > 0.0 {
            1000.0 / self.timing.tick_rate_hz
        } else {
            1000.0 / 60.0
        }
    }
}
