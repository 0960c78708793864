#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod input;
mod render;

use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;
use args::{Args, Command, RenderArgs};
use clap::Parser;
use rampart_config::Config;
use rampart_core::FormatOptions;
use rampart_mapper::{Mapper, MapperBuilder};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    rampart_telemetry::init(&config.telemetry)?;

    if let Some(ref path) = args.config {
        tracing::debug!(config_path = %path.display(), "configuration loaded");
    }

    let mapper: Mapper<String> = MapperBuilder::from_config(&config.mapping)?.build();

    match args.command {
        Command::Check => {
            println!("configuration OK: {} mapped codes", mapper.codes().count());
        }
        Command::Render(ref render_args) => {
            let document = render_command(&config, &mapper, render_args)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

fn render_command(config: &Config, mapper: &Mapper<String>, args: &RenderArgs) -> anyhow::Result<serde_json::Value> {
    let raw = read_input(&args.input)?;
    let document: serde_json::Value = serde_json::from_str(&raw).context("input is not valid JSON")?;

    let format = args.format.map_or(config.output.format, Into::into);
    let options = FormatOptions {
        sanitize: args.sanitize_override().or(config.output.sanitize),
    };

    render::render(mapper, input::failures(document), format, options)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path.display()))
}
