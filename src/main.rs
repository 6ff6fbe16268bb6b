//! view-inherit CLI
//!
//! Usage:
//!   view-inherit [OPTIONS] <VIEW>
//!
//! Options:
//!   -t, --templates <DIR>   Template directory
//!   -e, --extension <EXT>   Extension for template names without one
//!   -D, --data <FILE>       Render data (TOML format)
//!   -c, --config <FILE>     Configuration file (TOML format)
//!   -o, --output <FILE>     Write output to a file instead of stdout
//!       --chain             Print the inheritance chain instead of rendering
//!       --lenient           Render undefined variables as empty text
//!   -v, --verbose           Increase log verbosity (repeatable)
//!   -h, --help              Print help

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use view_inherit::{file_renderer, RenderConfig, RenderError, TemplateData};

#[derive(Parser)]
#[command(name = "view-inherit")]
#[command(about = "Render templates that extend layouts and override their blocks")]
struct Cli {
    /// View (template name) to render
    view: String,

    /// Template directory
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Extension appended to template names without one
    #[arg(short, long)]
    extension: Option<String>,

    /// Render data file (TOML format)
    #[arg(short = 'D', long)]
    data: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the inheritance chain, leaf first, instead of rendering
    #[arg(long)]
    chain: bool,

    /// Render undefined variables as empty text
    #[arg(long)]
    lenient: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Load configuration, then let flags override it
    let mut config = match &cli.config {
        Some(path) => match RenderConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };
    if let Some(dir) = cli.templates {
        config.template_dir = dir;
    }
    if let Some(ext) = cli.extension {
        config.extension = ext;
    }
    if cli.lenient {
        config.strict_variables = false;
    }

    let data = match &cli.data {
        Some(path) => match TemplateData::from_file(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error loading data '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TemplateData::new(),
    };

    let renderer = file_renderer(&config);

    if cli.chain {
        match renderer.chain(&cli.view, &data) {
            Ok(chain) => println!("{}", chain.join(" -> ")),
            Err(e) => fail(&e),
        }
        return;
    }

    let result = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => renderer.render_to(&cli.view, &data, &mut BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error creating output '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => renderer.render_to(&cli.view, &data, &mut io::stdout().lock()),
    };

    if let Err(e) = result {
        fail(&e);
    }
}

/// Report a render error and exit
fn fail(err: &RenderError) -> ! {
    match err {
        RenderError::Parse {
            template,
            text,
            errors,
        } => {
            for error in errors {
                eprint!("{}", error.format(text, template));
            }
        }
        other => eprintln!("Error: {}", other),
    }
    std::process::exit(1);
}
