use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use code_snippet::{read_input, render_snippet, Error, RenderConfig, RenderOptions};

/// Turn code into a beautiful image
#[derive(Parser, Debug)]
#[command(
    name = "code-snippet",
    version,
    after_help = "Examples:\n  code-snippet main.go\n  code-snippet main.go -l 10-20\n  code-snippet main.go --copy\n  cat main.go | code-snippet"
)]
struct Cli {
    /// File to render; reads piped stdin when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Line range to render (e.g. 10-20)
    #[arg(short, long, value_name = "START-END")]
    lines: Option<String>,

    /// Copy image to system clipboard
    #[arg(short, long)]
    copy: bool,

    /// Output PNG path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Color theme
    #[arg(short, long)]
    theme: Option<String>,

    /// JSON render configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(cli: &Cli) -> anyhow::Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    Ok(config)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let input = read_input(cli.file.as_deref())?;
    let options = RenderOptions {
        line_range: cli.lines.clone(),
        copy_to_clipboard: cli.copy,
    };

    if let Some(range) = &options.line_range {
        println!("Extracting lines {}", range);
    }
    println!("Rendering '{}'...", input.name);

    let result = render_snippet(&input, &options, &config)?;
    let saved = config.output_path.display();
    if result.delivery.copied {
        println!("Saved to {} and copied to clipboard!", saved);
    } else if options.copy_to_clipboard {
        println!("Saved to {} (clipboard copy failed, see warnings)", saved);
    } else {
        println!("Saved to {}", saved);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let known = err.downcast_ref::<Error>();
            match known {
                Some(Error::EmptyInput) => println!("Error: No input provided."),
                Some(Error::Format(_)) | Some(Error::Range { .. }) => {
                    eprintln!("Error processing lines: {}", err)
                }
                _ => eprintln!("Error: {:#}", err),
            }
            if known.map_or(true, Error::is_failure) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
