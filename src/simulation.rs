use log::{debug, info};

use crate::config::Config;
use crate::error::SimError;
use crate::history::{History, ScaledHistory};
use crate::params::{ParameterKind, Parameters};
use crate::sird::{Integrator, SirdState};

// elapsed time is steps * dt, so only representation error of the product needs absorbing
const HORIZON_EPSILON: f64 = 1e-9;

/// Everything a run owns: parameters, current state, recorded history and step count.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub config: Config,
    pub params: Parameters,
    integrator: Integrator,
    state: SirdState,
    history: History,
    steps: usize,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self, SimError> {
        let params = config.initial;
        Simulation::with_parameters(config, params)
    }

    pub fn with_parameters(config: Config, params: Parameters) -> Result<Self, SimError> {
        config.check()?;
        params.check()?;
        let integrator =
            Integrator::new(config.total_population, config.rates(), config.ceiling())?;
        let mut simulation = Simulation {
            config,
            params,
            integrator,
            state: SirdState::default(),
            history: History::new(),
            steps: 0,
        };
        simulation.reset();
        Ok(simulation)
    }

    /// Back to t = 0 with initial conditions taken from the current parameters.
    pub fn reset(&mut self) {
        self.state = SirdState::initial(
            self.params.s0,
            self.params.i0,
            self.config.total_population,
        );
        self.history = History::new();
        self.steps = 0;
        debug!(
            "run reset: S={:.0} I={:.0}, horizon {:.2}",
            self.state.s,
            self.state.i,
            self.horizon()
        );
    }

    pub fn state(&self) -> &SirdState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.config.dt
    }

    pub fn horizon(&self) -> f64 {
        self.params.lambda * self.config.horizon_scale
    }

    /// Number of steps a full run takes at the current horizon.
    pub fn expected_steps(&self) -> usize {
        (self.horizon() / self.config.dt - HORIZON_EPSILON).ceil().max(0.0) as usize
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed() >= self.horizon() - HORIZON_EPSILON
    }

    /// Integrates one step and records it, unless the horizon has been reached.
    pub fn advance(&mut self) -> Result<bool, SimError> {
        if self.is_finished() {
            return Ok(false);
        }
        self.state = self
            .integrator
            .step(&self.state, self.params.beta, self.config.dt)?;
        self.history.record(&self.state);
        self.steps += 1;
        Ok(true)
    }

    pub fn run_to_completion(&mut self) -> Result<usize, SimError> {
        while self.advance()? {}
        info!(
            "run finished after {} steps at t = {:.2}",
            self.steps,
            self.elapsed()
        );
        Ok(self.steps)
    }

    /// Sets a parameter from a slider. Beta takes effect on the next step; the others
    /// restart the run. Returns whether the value changed.
    pub fn set_parameter(&mut self, kind: ParameterKind, value: f64) -> bool {
        let changed = self.params.set(kind, value);
        if changed && kind.restarts_run() {
            info!("{} changed, restarting run", kind.label());
            self.reset();
        }
        changed
    }

    pub fn scaled_history(&self, height: f64) -> ScaledHistory {
        self.history.rescale(height)
    }
}
