use serde::{Deserialize, Serialize};

use crate::error::{ensure_config, SimError};

/// The four slider-controlled inputs of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    S0,
    I0,
    Beta,
    Lambda,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 4] = [
        ParameterKind::S0,
        ParameterKind::I0,
        ParameterKind::Beta,
        ParameterKind::Lambda,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParameterKind::S0 => "S0",
            ParameterKind::I0 => "I0",
            ParameterKind::Beta => "β",
            ParameterKind::Lambda => "λ",
        }
    }

    /// Whether a change only makes sense from t = 0.
    pub fn restarts_run(self) -> bool {
        !matches!(self, ParameterKind::Beta)
    }
}

/// Initial susceptible and infected fractions, transmission coefficient and horizon
/// multiplier. Each lives in `[0, 1]` and is used as-is by the model.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub s0: f64,
    pub i0: f64,
    pub beta: f64,
    pub lambda: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            s0: 0.4,
            i0: 0.2,
            beta: 0.5,
            lambda: 1.0,
        }
    }
}

impl Parameters {
    pub fn get(&self, kind: ParameterKind) -> f64 {
        match kind {
            ParameterKind::S0 => self.s0,
            ParameterKind::I0 => self.i0,
            ParameterKind::Beta => self.beta,
            ParameterKind::Lambda => self.lambda,
        }
    }

    /// Stores `value` clamped to `[0, 1]`, returning whether anything changed.
    pub fn set(&mut self, kind: ParameterKind, value: f64) -> bool {
        let value = value.clamp(0.0, 1.0);
        let slot = match kind {
            ParameterKind::S0 => &mut self.s0,
            ParameterKind::I0 => &mut self.i0,
            ParameterKind::Beta => &mut self.beta,
            ParameterKind::Lambda => &mut self.lambda,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    pub fn check(&self) -> Result<(), SimError> {
        for kind in ParameterKind::ALL {
            let value = self.get(kind);
            ensure_config!(
                (0.0..=1.0).contains(&value),
                "{} must lie in [0, 1], got {}",
                kind.label(),
                value
            );
        }
        Ok(())
    }

    pub fn label(&self) -> String {
        format!(
            "S0: {:.2}, I0: {:.2}, β: {:.2}, λ: {:.2}",
            self.s0, self.i0, self.beta, self.lambda
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_into_unit_interval() {
        let mut params = Parameters::default();
        assert!(params.set(ParameterKind::Beta, 1.7));
        assert_eq!(params.beta, 1.0);
        assert!(params.set(ParameterKind::I0, -0.3));
        assert_eq!(params.i0, 0.0);
        assert!(!params.set(ParameterKind::I0, 0.0));
    }

    #[test]
    fn label_matches_display_format() {
        assert_eq!(
            Parameters::default().label(),
            "S0: 0.40, I0: 0.20, β: 0.50, λ: 1.00"
        );
    }

    #[test]
    fn check_rejects_out_of_range() {
        let params = Parameters {
            lambda: 12.0,
            ..Parameters::default()
        };
        assert!(matches!(params.check(), Err(SimError::InvalidConfig(_))));
        assert!(Parameters::default().check().is_ok());
    }

    #[test]
    fn only_beta_applies_mid_run() {
        assert!(!ParameterKind::Beta.restarts_run());
        assert!(ParameterKind::S0.restarts_run());
        assert!(ParameterKind::Lambda.restarts_run());
    }
}
