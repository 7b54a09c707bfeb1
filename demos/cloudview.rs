//! cloudview: interactive viewer for point clouds stored as delimited tables
//!
//! Usage:
//!   cloudview [PATH] [--delimiter <;|,|tab|space|auto>] [--no-header] [--config <file.json>]
//!
//! Without PATH a file chooser opens. Drag with the left mouse button to turn
//! the cloud about X and Y, with the right button to turn it about Z. Drop a
//! file on the window to load it.

use anyhow::{Context, Result};
use clap::Parser;
use cloudview_io::Delimiter;
use cloudview_visualization::{pick_point_file, InteractiveViewer, ViewerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cloudview", version, about = "3D point cloud viewer")]
struct Args {
    /// Table of X, Y, Z rows to open
    path: Option<PathBuf>,

    /// Field delimiter, or `auto` to detect it from the first data row
    #[arg(long)]
    delimiter: Option<String>,

    /// The table has no header line
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// JSON file overriding the default viewer settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    match args.delimiter.as_deref() {
        None => {}
        Some("auto") => config.table.delimiter = None,
        Some(s) => {
            let delimiter = s
                .parse::<Delimiter>()
                .map_err(anyhow::Error::msg)
                .context("invalid --delimiter")?;
            config.table.delimiter = Some(delimiter);
        }
    }
    if args.no_header {
        config.table.skip_header = false;
    }

    let path = args.path.or_else(pick_point_file);
    match &path {
        Some(p) => log::info!("opening {}", p.display()),
        None => log::info!("starting without data"),
    }

    InteractiveViewer::new(config)
        .with_file(path)
        .run()
        .context("viewer exited with an error")?;

    Ok(())
}
