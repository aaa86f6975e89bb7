mod display;
mod input;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pulse_core::colors::Tone;
use pulse_core::output::{get_formatter, FormatOptions};
use pulse_core::probe::DEFAULT_CONCURRENCY;
use pulse_core::{OutcomeFilter, OutputFormat, ProbeConfig, ProbeEngine, Scheme, Summary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use display::{BatchProgress, ProgressWriterFactory};

const EXIT_ALL_UP: u8 = 0;
const EXIT_SOME_DOWN: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Check hosts and URLs for HTTP/HTTPS liveness")]
#[command(version)]
struct Cli {
    /// Hosts or URLs to probe (stdin is read when none are given)
    targets: Vec<String>,

    /// File with one target per line, # for comments ("-" reads stdin)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Maximum number of probes in flight
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    concurrency: usize,

    /// Per-probe timeout in seconds
    #[arg(short, long, default_value = "5", value_parser = parse_timeout)]
    timeout: Duration,

    /// Validate TLS certificates (skipped by default)
    #[arg(long)]
    verify_tls: bool,

    /// Follow redirects instead of reporting the first response
    #[arg(short = 'L', long)]
    follow_redirects: bool,

    /// Use http:// for targets without a scheme
    #[arg(long)]
    http: bool,

    /// User-Agent header sent with each probe
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output format (human, json or quiet)
    #[arg(short = 'o', long, default_value = "human")]
    format: String,

    /// Prefix quiet output with the status code
    #[arg(short = 's', long)]
    show_status: bool,

    /// Only show targets that are down
    #[arg(long)]
    failed_only: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Log probe details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a positive integer", s))?;
    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(value)
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;
    if secs <= 0.0 {
        return Err("timeout must be greater than zero".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

impl Cli {
    fn probe_config(&self) -> ProbeConfig {
        let scheme = if self.http { Scheme::Http } else { Scheme::Https };
        let config = ProbeConfig::new()
            .with_concurrency(self.concurrency)
            .with_timeout(self.timeout)
            .with_verify_tls(self.verify_tls)
            .with_follow_redirects(self.follow_redirects)
            .with_default_scheme(scheme);

        match self.user_agent {
            Some(ref ua) => config.with_user_agent(ua.clone()),
            None => config,
        }
    }

    fn outcome_filter(&self, format: OutputFormat) -> OutcomeFilter {
        if self.failed_only {
            OutcomeFilter::Down
        } else if format == OutputFormat::Quiet {
            OutcomeFilter::Responded
        } else {
            OutcomeFilter::All
        }
    }

    /// Colors are used only on a terminal, and never with `--no-color` or `NO_COLOR`.
    fn colors_for(&self, stream_is_terminal: bool) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && stream_is_terminal
    }

    fn show_progress(&self, total: usize) -> bool {
        !self.no_progress && total > 1 && std::io::stderr().is_terminal()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(ProgressWriterFactory)
        .init();

    let error_colors = cli.colors_for(std::io::stderr().is_terminal());

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", Tone::Failure.paint("Error:", error_colors), e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let output_format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let targets = input::collect_targets(&cli.targets, &cli.files)?;

    if targets.is_empty() {
        anyhow::bail!(
            "no targets found. Expected one host or URL per line, # for comments"
        );
    }

    let engine = ProbeEngine::new(cli.probe_config())?;
    debug!(targets = targets.len(), config = ?engine.config(), "Probing");

    let outcomes = if cli.show_progress(targets.len()) {
        let progress = BatchProgress::new(targets.len());
        let outcomes = engine
            .probe_all_with_progress(&targets, Some(progress.callback()))
            .await;
        drop(progress);
        outcomes
    } else {
        engine.probe_all(&targets).await
    };

    let summary = Summary::from_outcomes(&outcomes);
    let shown = cli.outcome_filter(output_format).apply(&outcomes);

    let formatter = get_formatter(
        output_format,
        FormatOptions {
            use_colors: cli.colors_for(std::io::stdout().is_terminal()),
            show_status: cli.show_status,
        },
    );

    let rendered = formatter.format_outcomes(&shown);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    if let Some(summary_line) = formatter.format_summary(&summary) {
        println!("{}", summary_line);
    }

    Ok(if summary.all_up() {
        EXIT_ALL_UP
    } else {
        EXIT_SOME_DOWN
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["pulse", "example.com"]);
        let config = cli.probe_config();
        assert_eq!(cli.targets, vec!["example.com"]);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.verify_tls);
        assert!(!config.follow_redirects);
        assert_eq!(config.default_scheme, Scheme::Https);
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::parse_from([
            "pulse",
            "-c",
            "32",
            "-t",
            "1.5",
            "--verify-tls",
            "-L",
            "--http",
            "--user-agent",
            "probe/2",
            "a.example",
        ]);
        let config = cli.probe_config();
        assert_eq!(config.concurrency, 32);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert!(config.verify_tls);
        assert!(config.follow_redirects);
        assert_eq!(config.default_scheme, Scheme::Http);
        assert_eq!(config.user_agent, "probe/2");
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(Cli::try_parse_from(["pulse", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["pulse", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["pulse", "-t", "soon"]).is_err());
    }

    #[test]
    fn test_no_color_flag_disables_colors() {
        let cli = Cli::parse_from(["pulse", "--no-color", "a.example"]);
        assert!(!cli.colors_for(true));
        assert!(!cli.colors_for(false));

        let cli = Cli::parse_from(["pulse", "a.example"]);
        assert!(!cli.colors_for(false));
    }

    #[test]
    fn test_outcome_filter_selection() {
        let cli = Cli::parse_from(["pulse"]);
        assert_eq!(cli.outcome_filter(OutputFormat::Human), OutcomeFilter::All);
        assert_eq!(
            cli.outcome_filter(OutputFormat::Quiet),
            OutcomeFilter::Responded
        );

        let cli = Cli::parse_from(["pulse", "--failed-only", "-o", "quiet"]);
        assert_eq!(cli.outcome_filter(OutputFormat::Quiet), OutcomeFilter::Down);
    }
}
