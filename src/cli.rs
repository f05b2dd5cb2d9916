// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-editor")]
#[command(about = "3D scene editor", long_about = None)]
pub struct Cli {
    /// Model files to load at startup (glTF or GLB), may be repeated
    #[arg(short, long = "model")]
    pub models: Vec<PathBuf>,

    /// Run a JSON command script headless and print the resulting state
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Hide the editor panels and the startup banner
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Initial viewport width
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial viewport height
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
