use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use rampart_config::OutputFormat;

/// Rampart error mapping
#[derive(Debug, Parser)]
#[command(name = "rampart", about = "Map domain failures to JSON:API and Problem Details error documents")]
pub struct Args {
    /// Path to configuration file; built-in defaults when omitted
    #[arg(short, long, env = "RAMPART_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the configuration and compile its mapping policies
    Check,
    /// Map failures read as JSON and print the rendered error document
    Render(RenderArgs),
}

#[derive(Debug, ClapArgs)]
pub struct RenderArgs {
    /// JSON input: one failure or an array of failures; `-` reads stdin
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Output format, overriding `output.format`
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Hide every error's content
    #[arg(long, conflicts_with = "expose")]
    pub sanitize: bool,

    /// Show every error's content, including server errors
    #[arg(long)]
    pub expose: bool,
}

impl RenderArgs {
    /// Sanitization forced on the command line, if any
    pub const fn sanitize_override(&self) -> Option<bool> {
        match (self.sanitize, self.expose) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    JsonApi,
    ProblemDetails,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::JsonApi => Self::JsonApi,
            Format::ProblemDetails => Self::ProblemDetails,
        }
    }
}
