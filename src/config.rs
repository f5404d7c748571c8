use std::path::PathBuf;

use clap::Parser;

/// Terminal editor for six-qubit circuits, backed by a remote simulator.
#[derive(Parser, Debug)]
#[command(name = "qboard", version, about)]
pub struct Config {
    /// Base URL of the simulation backend.
    #[arg(long, env = "QBOARD_BACKEND", default_value = "http://localhost:8000")]
    pub backend: String,

    /// Number of time steps the board starts with.
    #[arg(long, default_value_t = 8)]
    pub steps: usize,

    /// Append tracing output to this file; the terminal stays clean.
    #[arg(long, env = "QBOARD_LOG")]
    pub log_file: Option<PathBuf>,

    /// Ping the backend before entering the editor.
    #[arg(long)]
    pub ping: bool,
}
