use log::debug;

use crate::draw::{blit_circle, fill_rect, Rect, BLACK, BLUE, GRAY, GREEN, RED};
use crate::film::Film;
use crate::params::ParameterKind;
use crate::simulation::Simulation;

pub const SLIDER_X: f32 = 50.0;
pub const SLIDER_WIDTH: f32 = 300.0;
pub const SLIDER_HEIGHT: f32 = 20.0;
pub const SLIDER_SPACING: f32 = 30.0;
pub const KNOB_RADIUS: f32 = 10.0;

/// A horizontal `[0, 1]` control bound to one parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slider {
    pub kind: ParameterKind,
    pub rect: Rect,
    pub color: u32,
}

impl Slider {
    pub fn new(kind: ParameterKind, rect: Rect, color: u32) -> Self {
        Slider { kind, rect, color }
    }

    /// Normalized value under the pointer, or `None` when the pointer is off the bar.
    pub fn value_at(&self, x: f32, y: f32) -> Option<f64> {
        if !self.rect.contains(x, y) {
            return None;
        }
        Some(((x - self.rect.x) / self.rect.width).clamp(0.0, 1.0) as f64)
    }

    pub fn knob_center(&self, value: f64) -> (f32, f32) {
        (
            self.rect.x + value as f32 * self.rect.width,
            self.rect.y + self.rect.height / 2.0,
        )
    }

    pub fn draw(&self, film: &mut Film<u32>, value: f64) {
        fill_rect(film, &self.rect, GRAY);
        let filled = Rect {
            width: value as f32 * self.rect.width,
            ..self.rect
        };
        fill_rect(film, &filled, self.color);
        let (kx, ky) = self.knob_center(value);
        blit_circle(film, KNOB_RADIUS, kx, ky, self.color);
    }
}

/// The four sliders stacked above the bottom edge of a window `height` pixels tall.
pub fn default_sliders(height: usize) -> Vec<Slider> {
    let colors = [BLUE, RED, GREEN, BLACK];
    let top = height as f32 - 130.0;
    ParameterKind::ALL
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(row, (&kind, color))| {
            Slider::new(
                kind,
                Rect::new(
                    SLIDER_X,
                    top + row as f32 * SLIDER_SPACING,
                    SLIDER_WIDTH,
                    SLIDER_HEIGHT,
                ),
                color,
            )
        })
        .collect()
}

/// Applies this frame's pointer-down positions to the sliders.
///
/// For each slider only the most recent position over it counts. Returns the parameters
/// that actually changed.
pub fn apply_pointer_events(
    sliders: &[Slider],
    pointer_downs: &[(f32, f32)],
    simulation: &mut Simulation,
) -> Vec<ParameterKind> {
    let mut changed = Vec::new();
    for slider in sliders {
        let latest = pointer_downs
            .iter()
            .rev()
            .find_map(|&(x, y)| slider.value_at(x, y));
        if let Some(value) = latest {
            if simulation.set_parameter(slider.kind, value) {
                debug!("{} set to {:.3}", slider.kind.label(), value);
                changed.push(slider.kind);
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use approx::assert_abs_diff_eq;

    fn beta_slider() -> Slider {
        default_sliders(600)[2]
    }

    #[test]
    fn layout_for_default_window() {
        let sliders = default_sliders(600);
        let ys: Vec<f32> = sliders.iter().map(|s| s.rect.y).collect();
        assert_eq!(ys, vec![470.0, 500.0, 530.0, 560.0]);
        assert_eq!(sliders[2].kind, ParameterKind::Beta);
        assert_eq!(sliders[3].color, BLACK);
    }

    #[test]
    fn value_at_maps_horizontal_position() {
        let slider = beta_slider();
        assert_eq!(slider.value_at(50.0, 540.0), Some(0.0));
        assert_abs_diff_eq!(slider.value_at(125.0, 540.0).unwrap(), 0.25, epsilon = 1e-6);
        assert_eq!(slider.value_at(351.0, 540.0), None);
        assert_eq!(slider.value_at(200.0, 520.0), None);
    }

    #[test]
    fn latest_event_per_slider_wins() {
        let sliders = default_sliders(600);
        let mut sim = Simulation::new(Config::default()).unwrap();
        let changed = apply_pointer_events(
            &sliders,
            &[(110.0, 540.0), (700.0, 100.0), (290.0, 540.0)],
            &mut sim,
        );
        assert_eq!(changed, vec![ParameterKind::Beta]);
        assert_abs_diff_eq!(sim.params.beta, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn events_off_every_slider_change_nothing() {
        let sliders = default_sliders(600);
        let mut sim = Simulation::new(Config::default()).unwrap();
        let before = sim.params;
        assert!(apply_pointer_events(&sliders, &[(400.0, 300.0)], &mut sim).is_empty());
        assert!(apply_pointer_events(&sliders, &[], &mut sim).is_empty());
        assert_eq!(sim.params, before);
    }

    #[test]
    fn drawing_fills_up_to_the_value() {
        let slider = beta_slider();
        let mut film = Film::new(800, 600, crate::draw::WHITE);
        slider.draw(&mut film, 0.5);
        assert_eq!(film.at(60, 540), GREEN);
        assert_eq!(film.at(300, 540), GRAY);
        // knob overhangs the bottom of the bar
        assert_eq!(film.at(200, 550), GREEN);
        assert_eq!(film.at(300, 550), crate::draw::WHITE);
    }
}
