//! Draws a textured quad whose tint pulses from black to red and back.
//!
//! ```text
//! textured-quad [--no-vsync] [SHADER] [TEXTURE]
//! ```
//!
//! Exits with status 0 after the window is closed, and with a failure status
//! if the window or GL context cannot be created.

mod config;
mod scene;
mod window;

use std::process::ExitCode;

use anyhow::Context as _;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::DemoConfig;
use crate::window::App;

fn main() -> ExitCode {
    init_logging();

    let config = DemoConfig::from_args(std::env::args_os().skip(1));
    log::debug!("{config:?}");

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DemoConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;
    app.into_result()
}

/// Route `log` output to stderr, honouring `RUST_LOG` and defaulting to
/// `info`.
fn init_logging() {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filter) => builder.parse_filters(&filter),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}
