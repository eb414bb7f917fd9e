//! Snowflake CLI
//!
//! Usage:
//!   snowflake [OPTIONS] [FILES]...
//!
//! Options:
//!   -c, --config <FILE>      Site configuration (defaults to snowflake.toml if present)
//!   -t, --template <NAME>    Page template, overriding the configuration
//!   -o, --output-dir <DIR>   Output directory, overriding the configuration
//!   -v, --verbose            Increase log verbosity (repeatable)
//!   -h, --help               Print help

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, CommandFactory, Parser};
use log::LevelFilter;

use snowflake::{CompileError, Compiler, SiteConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "snowflake")]
#[command(about = "Compile documents into pages using an inheriting page template")]
struct Cli {
    /// Input documents
    files: Vec<PathBuf>,

    /// Site configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page template, relative to the template directory
    #[arg(short, long)]
    template: Option<String>,

    /// Directory output pages are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if cli.files.is_empty() {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    let config = match cli.template {
        Some(template) => config.with_template(template),
        None => config,
    };
    let config = match cli.output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    };

    let compiler = match Compiler::new(config) {
        Ok(compiler) => compiler,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    for file in &cli.files {
        println!("Processing {} ...", file.display());
        if let Err(e) = compiler.compile_file(file) {
            report(&compiler, &e);
            process::exit(1);
        }
    }
}

/// Load an explicit configuration file, or the default one if it exists
fn load_config(path: Option<&Path>) -> Result<SiteConfig, CompileError> {
    match path {
        Some(path) => SiteConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            SiteConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(SiteConfig::default()),
    }
}

/// Print an error, with source context when it points into a template
fn report(compiler: &Compiler, error: &CompileError) {
    let text = error
        .file()
        .and_then(|file| compiler.source().read(file).ok());
    match text {
        Some(text) => eprint!("{}", error.format(&text)),
        None => eprintln!("Error: {}", error),
    }
}
