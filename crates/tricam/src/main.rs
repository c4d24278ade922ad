mod app;
mod config;
mod fatal;

use anyhow::Result;

use tricam_engine::logging::{init_logging, LoggingConfig};
use tricam_engine::window::Runtime;

use crate::app::TriangleApp;

fn main() {
    init_logging(LoggingConfig::default());

    let result = run();
    if let Err(e) = &result {
        fatal::report(e);
    }

    // Everything GPU-side was dropped inside `run`.
    std::process::exit(fatal::exit_code(&result));
}

fn run() -> Result<()> {
    let app = TriangleApp::new(config::scene_config());
    Runtime::run(config::runtime_config(), config::gpu_init(), app)
}
