//! `colorblind` - rewrite a stylesheet as seen with a color-vision deficiency.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use colorblind_css::{
    ColorBlind, Deficiency, FailurePolicy, Options, ProcessError, Processed, DEFAULT_METHOD,
};
use console::style;
use tracing_subscriber::EnvFilter;

const STDIN_NAME: &str = "<stdin>";

/// Rewrite every color in a stylesheet to simulate a color-vision deficiency.
#[derive(Parser, Debug)]
#[command(name = "colorblind", version, about)]
struct Cli {
    /// Stylesheet to read; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Simulation method (see --list-methods)
    #[arg(short, long)]
    method: Option<String>,

    /// YAML or JSON options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first declaration that fails to rewrite
    #[arg(long)]
    strict: bool,

    /// Print the available methods and exit
    #[arg(long)]
    list_methods: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold().for_stderr(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list_methods {
        return list_methods();
    }

    let filter = ColorBlind::new(load_options(cli)?)?;
    let (name, css) = read_input(cli.input.as_deref())?;

    let processed = match filter.process(&css) {
        Ok(processed) => processed,
        Err(ProcessError::Declaration(err)) => bail!("{}:{}", name, err),
    };
    report(&name, &processed);
    write_output(cli.output.as_deref(), &processed.css)
}

fn list_methods() -> Result<()> {
    let mut out = io::stdout().lock();
    for deficiency in Deficiency::ALL {
        if deficiency == DEFAULT_METHOD {
            writeln!(out, "{} (default)", deficiency)?;
        } else {
            writeln!(out, "{}", deficiency)?;
        }
    }
    Ok(())
}

/// Options from the config file, if any, with command-line flags on top.
fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let parsed = if path.extension().is_some_and(|ext| ext == "json") {
                Options::from_json(&text)
            } else {
                Options::from_yaml(&text)
            };
            parsed.with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Options::default(),
    };

    if let Some(method) = &cli.method {
        options.method = Some(method.clone());
    }
    if cli.strict {
        options.on_error = FailurePolicy::Abort;
    }
    Ok(options)
}

fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), css))
        }
        _ => {
            let mut css = String::new();
            io::stdin()
                .read_to_string(&mut css)
                .context("failed to read stdin")?;
            Ok((STDIN_NAME.to_string(), css))
        }
    }
}

fn report(name: &str, processed: &Processed) {
    let warning = style("warning:").yellow().bold().for_stderr();
    for skipped in &processed.skipped {
        eprintln!(
            "{}:{}: {} skipped malformed css `{}`",
            name, skipped.location, warning, skipped.text
        );
    }
    for failure in &processed.report.failures {
        eprintln!("{}:{}", name, failure);
    }
}

fn write_output(path: Option<&Path>, css: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(css.as_bytes())?;
            out.flush()?;
            Ok(())
        }
    }
}
