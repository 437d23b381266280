extern crate minifb;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use log::{error, info, LevelFilter};
use minifb::{Key, MouseButton, MouseMode, Scale, Window, WindowOptions};
use structopt::StructOpt;

use lib::logging::init_logging;
use lib::{run, write_trajectory_csv, Config, Film, Frontend, InputEvent, SimError, Simulation};

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    /// TOML file overriding the built-in defaults
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,
    /// run to the horizon without a window and print the trajectory as CSV
    #[structopt(long)]
    pub headless: bool,
    #[structopt(long, default_value = "info")]
    pub log_level: LevelFilter,
}

struct MinifbFrontend {
    window: Window,
}

impl Frontend for MinifbFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            events.push(InputEvent::Quit);
        }
        // held button counts as a drag, one event per frame
        if self.window.get_mouse_down(MouseButton::Left) {
            if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
                events.push(InputEvent::PointerDown { x, y });
            }
        }
        events
    }

    fn present(&mut self, film: &Film<u32>) -> Result<(), SimError> {
        self.window
            .update_with_buffer(&film.buffer, film.width, film.height)
            .map_err(|e| SimError::Window(e.to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opt::from_args();
    let _handle = init_logging(opts.log_level)?;

    let config = match &opts.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => Config::default(),
    };
    let mut simulation = Simulation::new(config.clone())?;

    if opts.headless {
        simulation.run_to_completion()?;
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_trajectory_csv(&mut out, simulation.history(), config.dt)?;
        out.flush()?;
        return Ok(());
    }

    let mut window = Window::new(
        "Simulation SIRD",
        config.width,
        config.height,
        WindowOptions {
            scale: Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| anyhow!("failed to open window: {}", e))?;
    window.limit_update_rate(Some(config.frame_interval()));

    let mut frontend = MinifbFrontend { window };
    match run(&mut frontend, &mut simulation) {
        Ok(summary) => {
            info!(
                "closed after {} frames, {} samples, final state {:?}",
                summary.frames, summary.samples, summary.final_state
            );
            Ok(())
        }
        Err(e) => {
            error!("run aborted at t = {:.2}: {}", simulation.elapsed(), e);
            Err(e.into())
        }
    }
}
