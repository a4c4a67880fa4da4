//! Spidered main entry point
//!
//! This is the command-line interface for the Spidered single-domain crawler.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use spidered::config::{load_config_with_hash, Config, CrawlConfig, FailedUrlPolicy};
use spidered::crawler::crawl;
use spidered::output::{generate_markdown_summary, print_report, print_statistics, CrawlSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spidered: crawl a domain of your choice
///
/// Spidered follows every link on a single host, respecting robots.txt and a
/// limit on concurrently open sockets, and prints what it found for each page.
#[derive(Parser, Debug)]
#[command(name = "spidered")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a domain of your choice", long_about = None)]
struct Cli {
    /// The level to set the logger to
    #[arg(
        short = 'l',
        long,
        global = true,
        default_value = "error",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        ignore_case = true
    )]
    log_level: String,

    /// Increase logging verbosity (-v, -vv, -vvv), overrides --log-level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors, overrides --log-level
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a url to find every url on the domain
    Crawl(CrawlArgs),
}

#[derive(Args, Debug, Default)]
struct CrawlArgs {
    /// The url to crawl - eg. example.com
    #[arg(short, long)]
    url: Option<String>,

    /// The max number of socket connections to allow [default: 15]
    #[arg(short, long)]
    socket_limit: Option<i64>,

    /// Ignore the domain's robots.txt file
    #[arg(long)]
    ignore_robots: bool,

    /// Deny every link when robots.txt is missing, abort when it is unreachable
    #[arg(long, conflicts_with = "ignore_robots")]
    strict_robots: bool,

    /// The user agent to send when crawling [default: SpideredBot]
    #[arg(long, alias = "custom-useragent")]
    user_agent: Option<String>,

    /// Never retry a URL whose fetch failed, even if it is linked again
    #[arg(long)]
    retain_failed: bool,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Path to a TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write a markdown summary of the crawl to this file
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Print crawl statistics after the report
    #[arg(long)]
    stats: bool,

    /// Validate the configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl(args) => handle_crawl(args).await,
    }
}

/// Sets up the logging/tracing subscriber
///
/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG`, when
/// set, takes precedence over the flags.
fn setup_logging(log_level: &str, verbose: u8, quiet: bool) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => log_level.to_ascii_lowercase(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spidered={},error", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and layers the command-line flags on top
fn build_config(args: &CrawlArgs) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, args);
    Ok((config, config_hash))
}

fn apply_overrides(config: &mut Config, args: &CrawlArgs) {
    if let Some(url) = &args.url {
        config.crawler.root_url = Some(url.clone());
    }
    if let Some(socket_limit) = args.socket_limit {
        config.crawler.socket_limit = socket_limit;
    }
    if let Some(user_agent) = &args.user_agent {
        config.crawler.user_agent = user_agent.clone();
    }
    if let Some(timeout) = args.timeout {
        config.crawler.request_timeout = timeout;
    }
    if args.retain_failed {
        config.crawler.failed_urls = FailedUrlPolicy::Retain;
    }
    if args.ignore_robots {
        config.robots.ignore = true;
    }
    if args.strict_robots {
        config.robots.strict = true;
    }
}

/// Formats the validated configuration shown by --dry-run
fn format_dry_run(config: &CrawlConfig) -> String {
    let robots = if config.ignore_robots {
        "ignored"
    } else if config.strict_robots {
        "strict"
    } else {
        "permissive"
    };

    let mut out = String::from("=== Spidered Dry Run ===\n\n");
    out.push_str(&format!("  Root URL: {}\n", config.root_url));
    out.push_str(&format!("  Socket limit: {}\n", config.socket_limit));
    out.push_str(&format!("  User agent: {}\n", config.user_agent));
    out.push_str(&format!(
        "  Request timeout: {}s\n",
        config.request_timeout.as_secs()
    ));
    out.push_str(&format!("  Failed URLs: {:?}\n", config.failed_urls));
    out.push_str(&format!("  Robots.txt: {}\n", robots));
    out.push_str("\nConfiguration is valid\n");
    out
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &CrawlConfig) {
    print!("{}", format_dry_run(config));
}

/// Handles the main crawl operation
async fn handle_crawl(args: CrawlArgs) -> anyhow::Result<()> {
    let (config, config_hash) = build_config(&args)?;
    let crawl_config = config.validate().context("Invalid configuration")?;

    if args.dry_run {
        handle_dry_run(&crawl_config);
        return Ok(());
    }

    let report = match crawl(crawl_config.clone()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);

    if args.stats {
        println!();
        print_statistics(&report.stats, report.elapsed);
    }

    if let Some(path) = &args.summary {
        let summary = CrawlSummary::from_report(&report, &crawl_config, config_hash.as_deref());
        generate_markdown_summary(&summary, path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_crawl_flags() {
        let cli = Cli::try_parse_from([
            "spidered",
            "-l",
            "debug",
            "crawl",
            "-u",
            "example.com",
            "-s",
            "4",
            "--ignore-robots",
            "--custom-useragent",
            "Googlebot",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        let Command::Crawl(args) = cli.command;
        assert_eq!(args.url.as_deref(), Some("example.com"));
        assert_eq!(args.socket_limit, Some(4));
        assert!(args.ignore_robots);
        assert_eq!(args.user_agent.as_deref(), Some("Googlebot"));
    }

    #[test]
    fn test_log_level_defaults_to_error() {
        let cli = Cli::try_parse_from(["spidered", "crawl", "-u", "example.com"]).unwrap();
        assert_eq!(cli.log_level, "error");
    }

    #[test]
    fn test_strict_conflicts_with_ignore() {
        let result = Cli::try_parse_from([
            "spidered",
            "crawl",
            "-u",
            "example.com",
            "--ignore-robots",
            "--strict-robots",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.crawler.root_url = Some("http://from-file.test".to_string());
        config.crawler.socket_limit = 3;

        let args = CrawlArgs {
            url: Some("http://from-flag.test".to_string()),
            timeout: Some(5),
            retain_failed: true,
            strict_robots: true,
            ..CrawlArgs::default()
        };
        apply_overrides(&mut config, &args);

        let crawl_config = config.validate().unwrap();
        assert_eq!(crawl_config.root_url.as_str(), "http://from-flag.test/");
        assert_eq!(crawl_config.socket_limit, 3);
        assert_eq!(crawl_config.request_timeout.as_secs(), 5);
        assert_eq!(crawl_config.failed_urls, FailedUrlPolicy::Retain);
        assert!(crawl_config.strict_robots);
    }

    #[test]
    fn test_dry_run_output_is_plain_ascii() {
        let mut config = Config::default();
        config.crawler.root_url = Some("example.com".to_string());
        let text = format_dry_run(&config.validate().unwrap());

        assert!(text.contains("  Root URL: http://example.com/\n"));
        assert!(text.contains("  Robots.txt: permissive\n"));
        assert!(text.ends_with("\nConfiguration is valid\n"));
        assert!(text.is_ascii());
    }

    #[test]
    fn test_missing_url_fails_validation() {
        let mut config = Config::default();
        apply_overrides(&mut config, &CrawlArgs::default());
        assert!(config.validate().is_err());
    }
}
