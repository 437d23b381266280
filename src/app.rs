//! The frame loop, independent of any particular window library.

use log::info;

use crate::draw::WHITE;
use crate::error::SimError;
use crate::film::Film;
use crate::render::render_frame;
use crate::simulation::Simulation;
use crate::sird::SirdState;
use crate::slider::{apply_pointer_events, default_sliders};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown { x: f32, y: f32 },
}

/// Window, input and frame pacing as seen by the frame loop.
pub trait Frontend {
    /// Drains whatever input arrived since the previous call. Must not block.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Shows `film` and blocks until the frame interval has elapsed.
    fn present(&mut self, film: &Film<u32>) -> Result<(), SimError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub samples: usize,
    pub final_state: SirdState,
    /// Slider moves that changed a parameter, across all restarts.
    pub parameter_changes: usize,
    pub quit: bool,
}

/// Drives `simulation` one step per frame until the user quits or, unless
/// `hold_on_finish` is set, until the horizon is reached.
///
/// Slider updates only ever come from the events drained in the current frame.
pub fn run<F: Frontend>(frontend: &mut F, simulation: &mut Simulation) -> Result<RunSummary, SimError> {
    let (width, height) = (simulation.config.width, simulation.config.height);
    let sliders = default_sliders(height);
    let mut film = Film::new(width, height, WHITE);

    info!(
        "starting run: {}, horizon {:.2}",
        simulation.params.label(),
        simulation.horizon()
    );

    let mut frames = 0;
    let mut parameter_changes = 0;
    let mut quit = false;
    let mut finish_reported = false;
    loop {
        let events = frontend.poll_events();
        let mut pointer_downs = Vec::new();
        for event in events {
            match event {
                InputEvent::Quit => quit = true,
                InputEvent::PointerDown { x, y } => pointer_downs.push((x, y)),
            }
        }
        let changed = apply_pointer_events(&sliders, &pointer_downs, simulation);
        if !changed.is_empty() {
            parameter_changes += changed.len();
            info!("frame {}: {}", frames, simulation.params.label());
        }

        simulation.advance()?;

        render_frame(&mut film, simulation, &sliders);
        frontend.present(&film)?;
        frames += 1;

        if quit {
            info!("quit requested after {} frames", frames);
            break;
        }
        if simulation.is_finished() {
            if !finish_reported {
                info!(
                    "horizon reached: {} samples, final {:?}",
                    simulation.history().len(),
                    simulation.state()
                );
                finish_reported = true;
            }
            if !simulation.config.hold_on_finish {
                break;
            }
        } else {
            finish_reported = false;
        }
    }

    Ok(RunSummary {
        frames,
        samples: simulation.history().len(),
        final_state: *simulation.state(),
        parameter_changes,
        quit,
    })
}
