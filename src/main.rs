use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use detect_unused::{
    Config, PathAlias, ProgressObserver, ReportFormat, Reporter, SilentObserver,
    UnusedCodeDetector,
};

/// detect-unused - Find unused files and exports in TypeScript/JavaScript projects
#[derive(Parser, Debug)]
#[command(name = "detect-unused")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print the report as JSON instead of the terminal summary
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file (implies --json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory names to skip in addition to node_modules, .git, .next, dist, build, coverage
    #[arg(short, long, value_name = "DIR")]
    exclude: Vec<String>,

    /// Import alias as PREFIX=TARGET, e.g. @/=src/ (replaces the configured aliases)
    #[arg(long, value_name = "PREFIX=TARGET")]
    alias: Vec<PathAlias>,

    /// Glob patterns for files never reported as unused (can be specified multiple times)
    #[arg(short, long, value_name = "GLOB")]
    retain: Vec<String>,

    /// Honour .gitignore and .ignore files during discovery
    #[arg(long)]
    gitignore: bool,

    /// Enable parallel processing for faster analysis
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn format(&self) -> ReportFormat {
        if self.json || self.output.is_some() {
            ReportFormat::Json
        } else {
            ReportFormat::Terminal
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format();

    init_logging(cli.verbose, cli.quiet || format == ReportFormat::Json);

    info!("detect-unused v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    run_analysis(config, &cli, format)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries the report
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    config.exclude_dirs.extend(cli.exclude.iter().cloned());
    config.retain.extend(cli.retain.iter().cloned());
    if !cli.alias.is_empty() {
        config.aliases = cli.alias.clone();
    }
    config.respect_gitignore |= cli.gitignore;
    config.parallel |= cli.parallel;

    Ok(config)
}

fn run_analysis(config: Config, cli: &Cli, format: ReportFormat) -> Result<()> {
    let start_time = Instant::now();
    let interactive = format == ReportFormat::Terminal;

    if interactive && !cli.quiet {
        println!(
            "{} {}",
            "🔍 Starting unused code detection in".bold(),
            cli.path.display()
        );
    }

    let detector = if interactive && !cli.quiet {
        UnusedCodeDetector::new(config).with_observer(ProgressObserver::new())
    } else {
        UnusedCodeDetector::new(config).with_observer(SilentObserver)
    };
    let report = detector.analyze(&cli.path)?;

    Reporter::new(format, cli.output.clone()).report(&report)?;

    if interactive && !cli.quiet {
        println!();
        println!(
            "{}",
            format!("⏱️  Analysis completed in {:.2?}", start_time.elapsed()).dimmed()
        );
    }

    Ok(())
}
