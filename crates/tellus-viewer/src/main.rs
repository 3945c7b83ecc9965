//! Binary entry point for the Tellus planet viewer.

mod app;
mod config;
mod orbit;
mod textures;

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use winit::event_loop::EventLoop;

use app::Viewer;
use config::ViewerConfig;

/// Tellus planet viewer command-line arguments.
///
/// CLI values override settings loaded from the RON config file.
#[derive(Parser, Debug)]
#[command(name = "tellus", about = "Stylized planet viewer")]
struct CliArgs {
    /// Path to a RON config file.
    #[arg(long, default_value = "tellus.ron")]
    config: PathBuf,

    /// Window width.
    #[arg(long)]
    width: Option<u32>,

    /// Window height.
    #[arg(long)]
    height: Option<u32>,

    /// Icosphere subdivision level.
    #[arg(long)]
    subdivisions: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

impl CliArgs {
    fn apply_overrides(&self, config: &mut ViewerConfig) {
        if let Some(w) = self.width {
            config.window.width = w;
        }
        if let Some(h) = self.height {
            config.window.height = h;
        }
        if let Some(s) = self.subdivisions {
            config.planet.subdivisions = s;
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
    }
}

fn init_logging(config: &ViewerConfig) {
    let filter_str = if config.log_level.is_empty() {
        "info,wgpu=warn,naga=warn".to_string()
    } else {
        config.log_level.clone()
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() {
    let args = CliArgs::parse();

    let mut config = match ViewerConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config {}: {e}", args.config.display());
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    init_logging(&config);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    let mut viewer = Viewer::new(config);
    if let Err(e) = event_loop.run_app(&mut viewer) {
        error!("event loop error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs {
            config: "tellus.ron".into(),
            width: Some(1920),
            height: None,
            subdivisions: Some(3),
            log_level: None,
        };
        let mut config = ViewerConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.planet.subdivisions, 3);
    }
}
