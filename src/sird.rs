//! The SIRD compartmental model and its fixed-step forward Euler integrator.

use num::{traits::real::Real, Num};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_config, SimError};

pub const TOTAL_POPULATION: f64 = 1_000_000.0;
pub const RECOVERY_RATE: f64 = 0.1;
pub const DEATH_RATE: f64 = 0.05;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Compartment {
    Susceptible,
    Infected,
    Recovered,
    Deceased,
}

impl Compartment {
    pub const ALL: [Compartment; 4] = [
        Compartment::Susceptible,
        Compartment::Infected,
        Compartment::Recovered,
        Compartment::Deceased,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Compartment::Susceptible => "S",
            Compartment::Infected => "I",
            Compartment::Recovered => "R",
            Compartment::Deceased => "D",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SirdState {
    pub s: f64,
    pub i: f64,
    pub r: f64,
    pub d: f64,
}

impl SirdState {
    pub fn new(s: f64, i: f64, r: f64, d: f64) -> Self {
        SirdState { s, i, r, d }
    }

    /// Initial conditions from the susceptible and infected fractions of `total_population`.
    pub fn initial(s0: f64, i0: f64, total_population: f64) -> Self {
        SirdState::new(s0 * total_population, i0 * total_population, 0.0, 0.0)
    }

    pub fn total(&self) -> f64 {
        self.s + self.i + self.r + self.d
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.s, self.i, self.r, self.d]
    }

    pub fn from_array([s, i, r, d]: [f64; 4]) -> Self {
        SirdState { s, i, r, d }
    }
}

/// Recovery (`gamma`) and death (`mu`) rates, per unit time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub gamma: f64,
    pub mu: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            gamma: RECOVERY_RATE,
            mu: DEATH_RATE,
        }
    }
}

/// Instantaneous derivatives of the SIRD system, normalized by the total population `n`.
pub fn derivatives(state: &SirdState, beta: f64, rates: &Rates, n: f64) -> SirdState {
    let new_infections = beta * state.s * state.i / n;
    SirdState {
        s: -new_infections,
        i: new_infections - rates.gamma * state.i - rates.mu * state.i,
        r: rates.gamma * state.i,
        d: rates.mu * state.i,
    }
}

pub fn forward_euler_step<const N: usize, F, T>(mut func: F, x: [T; N], dt: T) -> [T; N]
where
    F: FnMut([T; N]) -> [T; N],
    T: Num + Real,
{
    // x' = F(x)
    let mut new_x = x;
    let xp = func(x);
    for i in 0..N {
        new_x[i] = new_x[i] + dt * xp[i];
    }
    new_x
}

/// Advances a [`SirdState`] by one explicit Euler step.
///
/// `ceiling`, when set, is a fixed cap applied to every compartment after the step.
/// It never tracks the observed peak of a run; that value only drives plot scaling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Integrator {
    pub total_population: f64,
    pub rates: Rates,
    pub ceiling: Option<f64>,
}

impl Integrator {
    pub fn new(total_population: f64, rates: Rates, ceiling: Option<f64>) -> Result<Self, SimError> {
        ensure_config!(
            total_population.is_finite() && total_population > 0.0,
            "total population must be positive, got {}",
            total_population
        );
        ensure_config!(
            rates.gamma >= 0.0 && rates.mu >= 0.0,
            "gamma and mu must be >= 0 (gamma={}, mu={})",
            rates.gamma,
            rates.mu
        );
        if let Some(ceiling) = ceiling {
            ensure_config!(ceiling > 0.0, "population ceiling must be positive, got {}", ceiling);
        }
        Ok(Integrator {
            total_population,
            rates,
            ceiling,
        })
    }

    pub fn derivatives(&self, state: &SirdState, beta: f64) -> SirdState {
        derivatives(state, beta, &self.rates, self.total_population)
    }

    pub fn step(&self, state: &SirdState, beta: f64, dt: f64) -> Result<SirdState, SimError> {
        let next = forward_euler_step(
            |x| self.derivatives(&SirdState::from_array(x), beta).as_array(),
            state.as_array(),
            dt,
        );

        // checked before clamping, min() would hide a NaN or an overflow
        for compartment in Compartment::ALL {
            let value = next[compartment.index()];
            if !value.is_finite() {
                return Err(SimError::NumericalInstability { compartment, value });
            }
        }

        let next = match self.ceiling {
            Some(ceiling) => next.map(|v| v.min(ceiling)),
            None => next,
        };
        Ok(SirdState::from_array(next))
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator {
            total_population: TOTAL_POPULATION,
            rates: Rates::default(),
            ceiling: Some(TOTAL_POPULATION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_state() -> SirdState {
        SirdState::initial(0.4, 0.2, TOTAL_POPULATION)
    }

    #[test]
    fn derivatives_match_hand_computation() {
        let dy = derivatives(&reference_state(), 0.5, &Rates::default(), TOTAL_POPULATION);
        assert_eq!(dy.s, -40000.0);
        assert_relative_eq!(dy.i, 40000.0 - 20000.0 - 10000.0);
        assert_relative_eq!(dy.r, 20000.0);
        assert_relative_eq!(dy.d, 10000.0);
    }

    #[test]
    fn single_step_reference_values() {
        let next = Integrator::default()
            .step(&reference_state(), 0.5, 0.1)
            .unwrap();
        assert_eq!(next.s, 396000.0);
        assert_relative_eq!(next.i, 201000.0);
        assert_relative_eq!(next.r, 2000.0);
        assert_relative_eq!(next.d, 1000.0);
    }

    #[test]
    fn step_conserves_total_without_clamp() {
        let integrator = Integrator::new(TOTAL_POPULATION, Rates::default(), None).unwrap();
        let mut state = reference_state();
        let total = state.total();
        for _ in 0..200 {
            state = integrator.step(&state, 0.9, 0.1).unwrap();
        }
        assert_relative_eq!(state.total(), total, max_relative = 1e-12);
    }

    #[test]
    fn flows_are_monotonic() {
        let integrator = Integrator::default();
        for &beta in &[0.0, 0.25, 0.5, 1.0] {
            let mut state = SirdState::initial(0.9, 0.1, TOTAL_POPULATION);
            for _ in 0..120 {
                let next = integrator.step(&state, beta, 0.1).unwrap();
                assert!(next.s <= state.s);
                assert!(next.r >= state.r);
                assert!(next.d >= state.d);
                state = next;
            }
        }
    }

    #[test]
    fn ceiling_caps_every_compartment() {
        let integrator = Integrator::new(TOTAL_POPULATION, Rates::default(), Some(150_000.0)).unwrap();
        let next = integrator.step(&reference_state(), 0.5, 0.1).unwrap();
        assert_eq!(next.s, 150_000.0);
        assert_eq!(next.i, 150_000.0);
        assert_relative_eq!(next.r, 2000.0);
    }

    #[test]
    fn overflow_is_reported() {
        let integrator = Integrator::new(TOTAL_POPULATION, Rates::default(), Some(1.0)).unwrap();
        let state = SirdState::new(f64::MAX, f64::MAX, 0.0, 0.0);
        match integrator.step(&state, 1.0, 0.1) {
            Err(SimError::NumericalInstability { compartment, value }) => {
                assert_eq!(compartment, Compartment::Susceptible);
                assert!(!value.is_finite());
            }
            other => panic!("expected instability, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_population() {
        assert!(matches!(
            Integrator::new(0.0, Rates::default(), None),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(Integrator::new(-5.0, Rates::default(), None).is_err());
        assert!(Integrator::new(f64::NAN, Rates::default(), None).is_err());
    }

    #[test]
    fn euler_step_on_linear_system() {
        let x = forward_euler_step(|x: [f64; 2]| [-x[1], x[0]], [1.0, 0.0], 0.5);
        assert_eq!(x, [1.0, 0.5]);
    }
}
