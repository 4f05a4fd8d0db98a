//! [`Args`] definitions.

use clap::Parser;
use service::{domain::accession, worklist::Sort};

/// Terminal client of the laboratory information management system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Application path to open.
    #[arg(default_value = "/accessions")]
    pub path: String,

    /// Free-text filter of the worklist.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status to filter the worklist by (may be repeated).
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<accession::Status>,

    /// Sorting of the worklist (`column`, or `-column` for descending).
    #[arg(long, allow_hyphen_values = true, value_parser = Sort::parse)]
    pub sort: Option<Sort>,

    /// Number of the worklist page to show.
    #[arg(long)]
    pub page: Option<u32>,

    /// Size of the worklist page.
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
