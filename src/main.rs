use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use descent::{
    parse_expression_with, parse_value_with, Diagnostics, ExpressionConfig, ParseOptions,
};

#[derive(Debug, Parser)]
#[command(
    name = "descent",
    version,
    about = "Parse JSON values or calculator expressions and report every problem found"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Language of the input
    #[arg(short, long, value_enum, default_value_t = Mode::Json)]
    mode: Mode,
    /// Accept `//` and `/* */` comments
    #[arg(long)]
    comments: bool,
    /// Ignore anything after the first JSON value
    #[arg(long)]
    allow_trailing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Json,
    #[value(alias = "expression")]
    Expr,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let source = read_input(args.input.as_ref())?;
    let mut diagnostics = Diagnostics::new();

    let rendered = match args.mode {
        Mode::Json => {
            let options = ParseOptions::default()
                .with_comments(args.comments)
                .with_full_consumption(!args.allow_trailing);
            let value = parse_value_with(&source, options, &mut diagnostics);
            format!("{value:#?}")
        }
        Mode::Expr => {
            let config = ExpressionConfig::default().with_comments(args.comments);
            parse_expression_with(&source, config, &mut diagnostics).to_string()
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write output")?;
    stdout.flush().context("failed to write output")?;

    let mut stderr = io::stderr().lock();
    for error in &diagnostics {
        writeln!(stderr, "{}: {}", error.position(), error.message())
            .context("failed to write diagnostics")?;
    }

    if diagnostics.has_errors() {
        info!(errors = diagnostics.len(), "input has problems");
        std::process::exit(1);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
