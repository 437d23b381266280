mod error;
mod film;

pub mod app;
pub mod config;
pub mod draw;
pub mod font;
pub mod history;
pub mod logging;
pub mod params;
pub mod render;
pub mod simulation;
pub mod sird;
pub mod slider;

pub use app::{run, Frontend, InputEvent, RunSummary};
pub use config::Config;
pub use error::SimError;
pub use film::Film;
pub use history::{write_trajectory_csv, History, ScaledHistory};
pub use params::{ParameterKind, Parameters};
pub use simulation::Simulation;
pub use sird::{Compartment, Integrator, Rates, SirdState};
