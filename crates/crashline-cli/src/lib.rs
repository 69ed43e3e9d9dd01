mod args;
mod demo;

pub use args::{Cli, Commands};

use anyhow::{Context, bail};
use crashline_engine::{
    AliasRegistry, DEFAULT_COLUMNS, FrameFilter, RenderOptions, parse, render, serialize,
};
use crashline_types::Chain;
use is_terminal::IsTerminal;
use std::io::Read;
use std::path::PathBuf;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render {
            file,
            json,
            local_only,
            exclude,
            width,
            no_color,
            no_aliases,
            alias,
        } => {
            let mut registry = AliasRegistry::with_defaults();
            for spec in &alias {
                let (token, prefix) = parse_alias_spec(spec)?;
                registry.register(prefix, token);
            }
            let text = read_input(file.as_deref())?;
            let chain = parse(&text, &registry).context("input is not a rendered traceback")?;
            emit(
                &chain,
                &registry,
                json,
                local_only,
                &exclude,
                width,
                no_color,
                !no_aliases,
            )
        }

        Commands::Demo {
            json,
            local_only,
            exclude,
            width,
            no_color,
        } => {
            let registry = demo::sample_registry();
            let chain = crashline_engine::walk(&demo::sample_error());
            emit(
                &chain,
                &registry,
                json,
                local_only,
                &exclude,
                width,
                no_color,
                true,
            )
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit(
    chain: &Chain,
    registry: &AliasRegistry,
    json: bool,
    local_only: bool,
    exclude: &[String],
    width: Option<usize>,
    no_color: bool,
    show_aliases: bool,
) -> anyhow::Result<()> {
    let filter = FrameFilter::new(local_only, exclude)?;
    let filtered = filter.apply_chain(chain, registry);

    if json {
        let report = serialize(&filtered, registry, None);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let opts = RenderOptions {
        color: color_enabled(no_color),
        terminal_width: width.unwrap_or_else(detect_width),
        show_aliases,
        message_override: None,
        thread: None,
    };
    println!("{}", render(&filtered, registry, &opts));
    Ok(())
}

fn parse_alias_spec(spec: &str) -> anyhow::Result<(String, PathBuf)> {
    match spec.split_once('=') {
        Some((token, prefix)) if !token.is_empty() && !prefix.is_empty() => {
            Ok((token.to_string(), PathBuf::from(prefix)))
        }
        _ => bail!("expected TOKEN=PREFIX, got {:?}", spec),
    }
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Color policy lives here, not in the engine: honour NO_COLOR
/// (https://no-color.org/) and disable color when stdout is not a terminal.
fn color_enabled(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn detect_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_COLUMNS)
}
