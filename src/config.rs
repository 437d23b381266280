use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_config, SimError};
use crate::params::Parameters;
use crate::sird::{Rates, DEATH_RATE, RECOVERY_RATE, TOTAL_POPULATION};

/// Longest run allowed at lambda = 1, in steps.
pub const MAX_RUN_STEPS: f64 = 1_000_000.0;

/// Run configuration. Every key is optional in the TOML file; missing ones take the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
    pub dt: f64,
    pub total_population: f64,
    // fixed cap on every compartment, unrelated to the plot's observed peak
    pub clamp_population: bool,
    pub population_ceiling: f64,
    /// Simulated time at lambda = 1. The lambda slider stays in [0, 1] and the horizon is
    /// `lambda * horizon_scale`, so the default scale of 12 makes the slider span 0..=12.
    pub horizon_scale: f64,
    pub hold_on_finish: bool,
    pub gamma: f64,
    pub mu: f64,
    pub initial: Parameters,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 800,
            height: 600,
            fps: 60,
            dt: 0.1,
            total_population: TOTAL_POPULATION,
            clamp_population: true,
            population_ceiling: TOTAL_POPULATION,
            horizon_scale: 12.0,
            hold_on_finish: true,
            gamma: RECOVERY_RATE,
            mu: DEATH_RATE,
            initial: Parameters::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        Config::from_toml_str(&buf)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        let config: Config = toml::from_str(s)?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), SimError> {
        ensure_config!(self.width > 0 && self.height > 0, "window size must be non-zero");
        ensure_config!(self.fps > 0, "fps must be positive");
        ensure_config!(self.dt.is_finite() && self.dt > 0.0, "dt must be positive, got {}", self.dt);
        ensure_config!(
            self.total_population.is_finite() && self.total_population > 0.0,
            "total_population must be positive, got {}",
            self.total_population
        );
        ensure_config!(
            !self.clamp_population || self.population_ceiling > 0.0,
            "population_ceiling must be positive, got {}",
            self.population_ceiling
        );
        ensure_config!(
            self.horizon_scale.is_finite() && self.horizon_scale >= 0.0,
            "horizon_scale must be >= 0, got {}",
            self.horizon_scale
        );
        ensure_config!(
            self.horizon_scale / self.dt <= MAX_RUN_STEPS,
            "horizon_scale / dt allows at most {} steps, got {}",
            MAX_RUN_STEPS,
            self.horizon_scale / self.dt
        );
        ensure_config!(
            self.gamma >= 0.0 && self.mu >= 0.0,
            "gamma and mu must be >= 0"
        );
        self.initial.check()
    }

    pub fn rates(&self) -> Rates {
        Rates {
            gamma: self.gamma,
            mu: self.mu,
        }
    }

    pub fn ceiling(&self) -> Option<f64> {
        if self.clamp_population {
            Some(self.population_ceiling)
        } else {
            None
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}
