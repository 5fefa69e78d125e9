//! Entry point for **etchsketch**.
//!
//! With no arguments, opens the GTK4 window (requires the `surface-gtk`
//! feature).  With `--replay <path>` (`-` for stdin), runs the events in
//! the file against a headless surface and prints the final grid as JSON.

use etchsketch::config::Config;
use etchsketch::controller::Controller;
use etchsketch::replay::{replay_into, ReplaySource, Snapshot};
use etchsketch::surface::headless::HeadlessSurface;
use log::{error, info};
use std::io::BufRead;
use std::path::PathBuf;

/// Resolve the config directory (`$XDG_CONFIG_HOME/etchsketch`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("etchsketch")
}

/// Load the config from `explicit` or `$XDG_CONFIG_HOME/etchsketch/config.json`,
/// falling back to compiled-in defaults.
fn load_config(explicit: Option<PathBuf>) -> Config {
    let path = explicit.unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Value following `flag` on the command line, if present.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

//  Main

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(arg_value(&args, "--config").map(PathBuf::from));

    match arg_value(&args, "--replay") {
        Some(path) => {
            if let Err(e) = run_replay(&path, &config) {
                error!("replay failed: {}", e);
                std::process::exit(1);
            }
        }
        None => run_window(&config),
    }
}

/// Headless mode: replay scripted events and print the resulting grid.
fn run_replay(path: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(std::io::BufReader::new(std::fs::File::open(path)?))
    };

    let mut controller = Controller::with_initial_size(
        HeadlessSurface::new(),
        rand::thread_rng(),
        config.canvas.initial_grid_size(),
    );
    // A failed start is reported and the replay still runs; events are
    // dropped until the controller has a grid.
    if let Err(e) = controller.start() {
        error!("startup failed: {}", e);
    }

    let mut source = ReplaySource::new(reader);
    replay_into(&mut source, &mut controller)?;
    if source.skipped() > 0 {
        info!("skipped {} malformed line(s)", source.skipped());
    }

    println!("{}", serde_json::to_string(&Snapshot::capture(&controller))?);
    Ok(())
}

#[cfg(feature = "surface-gtk")]
fn run_window(config: &Config) {
    let css = config_dir().join("style.css");
    etchsketch::surface::gtk::run_main_loop(config, Some(css));
}

#[cfg(not(feature = "surface-gtk"))]
fn run_window(_config: &Config) {
    error!("the window requires the `surface-gtk` feature; use --replay <path> for headless mode");
    std::process::exit(1);
}
