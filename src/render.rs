use itertools::Itertools;

use crate::draw::{draw_line, BLACK, BLUE, GREEN, RED, WHITE};
use crate::film::Film;
use crate::font::{draw_text, text_width};
use crate::history::ScaledHistory;
use crate::simulation::Simulation;
use crate::sird::Compartment;
use crate::slider::Slider;

pub const CURVE_THICKNESS: usize = 2;
pub const AXIS_THICKNESS: usize = 3;
pub const TEXT_SCALE: usize = 2;

pub fn curve_color(compartment: Compartment) -> u32 {
    match compartment {
        Compartment::Susceptible => BLUE,
        Compartment::Infected => RED,
        Compartment::Recovered => GREEN,
        Compartment::Deceased => BLACK,
    }
}

/// Horizontal pixel spacing between samples so a full run spans the film.
pub fn sample_spacing(width: usize, expected_steps: usize) -> f32 {
    if expected_steps <= 1 {
        return width as f32;
    }
    (width - 1) as f32 / (expected_steps - 1) as f32
}

pub fn draw_curves(film: &mut Film<u32>, scaled: &ScaledHistory, spacing: f32) {
    for compartment in Compartment::ALL {
        let color = curve_color(compartment);
        for ((i0, y0), (i1, y1)) in scaled.series(compartment).iter().enumerate().tuple_windows() {
            draw_line(
                film,
                (i0 as f32 * spacing, *y0),
                (i1 as f32 * spacing, *y1),
                CURVE_THICKNESS,
                color,
            );
        }
    }
}

pub fn draw_axes(film: &mut Film<u32>) {
    let (right, bottom) = ((film.width - 1) as f32, (film.height - 1) as f32);
    draw_line(film, (0.0, bottom), (right, bottom), AXIS_THICKNESS, BLACK);
    draw_line(film, (0.0, 0.0), (0.0, bottom), AXIS_THICKNESS, BLACK);
}

/// Draws one complete frame of `simulation` into `film`.
pub fn render_frame(film: &mut Film<u32>, simulation: &Simulation, sliders: &[Slider]) {
    film.fill(WHITE);

    let scaled = simulation.scaled_history(film.height as f64);
    let spacing = sample_spacing(film.width, simulation.expected_steps());
    draw_curves(film, &scaled, spacing);
    draw_axes(film);

    for slider in sliders {
        slider.draw(film, simulation.params.get(slider.kind));
    }

    let label = simulation.params.label();
    draw_text(
        film,
        &label,
        50,
        film.height as isize - 150,
        TEXT_SCALE,
        BLACK,
    );

    let clock = format!("t = {:.1} / {:.1}", simulation.elapsed(), simulation.horizon());
    let x = film.width as isize - text_width(&clock, TEXT_SCALE) as isize - 10;
    draw_text(film, &clock, x, 10, TEXT_SCALE, BLACK);
}
