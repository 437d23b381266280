use std::io::{self, Write};

use ordered_float::OrderedFloat;

use crate::sird::{Compartment, SirdState};

/// Append-only time series, one per compartment, one sample per simulation step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    series: [Vec<f64>; 4],
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn record(&mut self, state: &SirdState) {
        for (series, value) in self.series.iter_mut().zip(state.as_array()) {
            series.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn series(&self, compartment: Compartment) -> &[f64] {
        &self.series[compartment.index()]
    }

    pub fn sample(&self, index: usize) -> Option<SirdState> {
        if index >= self.len() {
            return None;
        }
        Some(SirdState::from_array([
            self.series[0][index],
            self.series[1][index],
            self.series[2][index],
            self.series[3][index],
        ]))
    }

    pub fn latest(&self) -> Option<SirdState> {
        self.len().checked_sub(1).and_then(|idx| self.sample(idx))
    }

    pub fn clear(&mut self) {
        for series in self.series.iter_mut() {
            series.clear();
        }
    }

    /// Largest value seen in any compartment so far, 0 for an empty history.
    pub fn observed_peak(&self) -> f64 {
        self.series
            .iter()
            .flatten()
            .map(|v| OrderedFloat(*v))
            .max()
            .map(|v| v.0)
            .unwrap_or(0.0)
    }

    /// Maps every recorded value to a screen row, `height` at 0 and `0` at the observed peak.
    ///
    /// The whole history is rescaled on every call so that earlier points move when the
    /// peak grows. Without a positive peak there is nothing to plot and the result is empty.
    pub fn rescale(&self, height: f64) -> ScaledHistory {
        let peak = self.observed_peak();
        if !peak.is_finite() || peak <= 0.0 {
            return ScaledHistory::default();
        }
        let scale = |series: &Vec<f64>| -> Vec<f32> {
            series
                .iter()
                .map(|v| (height - (v / peak) * height) as f32)
                .collect()
        };
        ScaledHistory {
            series: [
                scale(&self.series[0]),
                scale(&self.series[1]),
                scale(&self.series[2]),
                scale(&self.series[3]),
            ],
        }
    }
}

/// Writes `step,t,S,I,R,D` rows, with `t` the simulated time at the end of each step.
pub fn write_trajectory_csv<W: Write>(out: &mut W, history: &History, dt: f64) -> io::Result<()> {
    writeln!(out, "step,t,S,I,R,D")?;
    for step in 0..history.len() {
        if let Some(state) = history.sample(step) {
            writeln!(
                out,
                "{},{:.2},{:.3},{:.3},{:.3},{:.3}",
                step + 1,
                (step + 1) as f64 * dt,
                state.s,
                state.i,
                state.r,
                state.d
            )?;
        }
    }
    Ok(())
}

/// Screen-space Y coordinates derived from a [`History`] for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScaledHistory {
    series: [Vec<f32>; 4],
}

impl ScaledHistory {
    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn series(&self, compartment: Compartment) -> &[f32] {
        &self.series[compartment.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(states: &[SirdState]) -> History {
        let mut history = History::new();
        for state in states {
            history.record(state);
        }
        history
    }

    #[test]
    fn record_appends_to_every_series() {
        let history = history_of(&[
            SirdState::new(10.0, 5.0, 0.0, 0.0),
            SirdState::new(9.0, 5.5, 0.3, 0.2),
        ]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.series(Compartment::Susceptible), &[10.0, 9.0]);
        assert_eq!(history.series(Compartment::Deceased), &[0.0, 0.2]);
        assert_eq!(history.latest(), Some(SirdState::new(9.0, 5.5, 0.3, 0.2)));
    }

    #[test]
    fn peak_spans_all_compartments() {
        let history = history_of(&[
            SirdState::new(10.0, 5.0, 0.0, 0.0),
            SirdState::new(4.0, 12.0, 1.0, 0.5),
        ]);
        assert_eq!(history.observed_peak(), 12.0);
    }

    #[test]
    fn empty_history_rescales_to_nothing() {
        let history = History::new();
        assert_eq!(history.observed_peak(), 0.0);
        let scaled = history.rescale(600.0);
        assert!(scaled.is_empty());
        assert_eq!(scaled.series(Compartment::Infected), &[] as &[f32]);
    }

    #[test]
    fn all_zero_history_rescales_to_nothing() {
        let history = history_of(&[SirdState::default(), SirdState::default()]);
        assert!(history.rescale(600.0).is_empty());
    }

    #[test]
    fn peak_maps_to_top_and_zero_to_bottom() {
        let history = history_of(&[
            SirdState::new(800.0, 200.0, 0.0, 0.0),
            SirdState::new(700.0, 250.0, 40.0, 10.0),
        ]);
        let scaled = history.rescale(600.0);
        assert_eq!(scaled.series(Compartment::Susceptible)[0], 0.0);
        assert_eq!(scaled.series(Compartment::Recovered)[0], 600.0);
        assert_eq!(scaled.series(Compartment::Infected)[1], 412.5);
    }

    #[test]
    fn rescale_is_idempotent() {
        let history = history_of(&[
            SirdState::new(400000.0, 200000.0, 0.0, 0.0),
            SirdState::new(396000.0, 201000.0, 2000.0, 1000.0),
        ]);
        assert_eq!(history.rescale(600.0), history.rescale(600.0));
    }

    #[test]
    fn trajectory_csv_rows() {
        let history = history_of(&[SirdState::new(396000.0, 201000.0, 2000.0, 1000.0)]);
        let mut out = Vec::new();
        write_trajectory_csv(&mut out, &history, 0.1).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "step,t,S,I,R,D\n1,0.10,396000.000,201000.000,2000.000,1000.000\n"
        );
    }

    #[test]
    fn earlier_points_move_when_peak_grows() {
        let mut history = history_of(&[SirdState::new(100.0, 0.0, 0.0, 0.0)]);
        assert_eq!(history.rescale(100.0).series(Compartment::Susceptible)[0], 0.0);
        history.record(&SirdState::new(200.0, 0.0, 0.0, 0.0));
        assert_eq!(history.rescale(100.0).series(Compartment::Susceptible)[0], 50.0);
    }
}
