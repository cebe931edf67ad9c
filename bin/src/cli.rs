use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edit fragments of a file through a windowed document.
#[derive(Debug, Parser)]
#[command(name = "docwin", version)]
pub struct Cli {
    /// File the window projects onto
    #[arg(long, env = "DOCWIN_HOST")]
    pub host: PathBuf,

    /// TOML descriptor listing the window's shreds
    #[arg(long, env = "DOCWIN_WINDOW")]
    pub window: PathBuf,

    /// Log file, or directory for the default log file name
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the virtual text
    Text,

    /// Print the host offset a virtual offset maps to
    HostOffset { offset: usize },

    /// Print the virtual offset a host offset maps to
    VirtualOffset { offset: usize },

    /// Print the virtual line containing an offset and the host line it maps to
    Line { offset: usize },

    /// Replace the whole virtual text with the contents of a file
    Set { file: PathBuf },

    /// Replace a virtual range with text
    Replace {
        start: usize,
        end: usize,
        text: String,
    },
}
