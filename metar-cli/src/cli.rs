use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use inquire::{Confirm, CustomType, Select};
use metar_core::{
    Config, ProviderId, Report, ReportRequest, default_provider_from_config, normalize_codes,
    render_findings,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "metar",
    version,
    about = "Fetch METAR and TAF reports for airports",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the default provider, request timeout and TAF setting.
    Configure,

    /// Print the request URL for the given codes without fetching it.
    Link {
        /// 4-letter ICAO airport codes.
        codes: Vec<String>,

        /// Build the URL without TAF reports.
        #[arg(long)]
        notaf: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// 4-letter ICAO airport codes, e.g. `EPWA KJFK`.
    pub codes: Vec<String>,

    /// Do not get TAF reports.
    #[arg(long)]
    pub notaf: bool,

    /// Request timeout in seconds.
    #[arg(long, env = "METAR_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the findings as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Log requests and parsing decisions to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Provider to query, overrides the configured default.
    #[arg(long, env = "METAR_PROVIDER")]
    pub provider: Option<String>,
}

impl ProviderArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.default_provider = Some(provider.clone());
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Link { codes, notaf, provider }) => link(&codes, notaf, &provider),
            None => show(self.report).await,
        }
    }
}

/// Normalized codes, or exit with a usage error when none is valid.
fn require_codes(raw: &[String]) -> Vec<String> {
    let codes = normalize_codes(raw);
    if codes.is_empty() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "ICAO code not specified or of incorrect length",
            )
            .exit();
    }
    codes
}

async fn show(args: ReportArgs) -> Result<()> {
    let codes = require_codes(&args.codes);

    let mut config = Config::load()?;
    args.provider.apply(&mut config);
    if let Some(secs) = args.timeout {
        config.timeout_secs = Some(secs);
    }

    let taf = config.taf_enabled() && !args.notaf;
    let provider = default_provider_from_config(&config)?;
    let request = ReportRequest { codes, taf };

    let findings = provider
        .get_reports(&request)
        .await
        .with_context(|| format!("Failed to get reports from {}", provider.id()))?;

    for f in findings.iter().filter(|f| !f.ok) {
        tracing::warn!(code = %f.code, "station sensors need maintenance, data may be inaccurate");
    }

    if args.json {
        let report = Report {
            provider: provider.id().to_string(),
            fetched_at: Utc::now(),
            findings,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize")?;
        println!("{json}");
    } else {
        println!("{}", render_findings(&findings, taf));
    }

    Ok(())
}

fn link(codes: &[String], notaf: bool, provider_args: &ProviderArgs) -> Result<()> {
    let codes = require_codes(codes);

    let mut config = Config::load()?;
    provider_args.apply(&mut config);

    let provider = default_provider_from_config(&config)?;
    let request = ReportRequest {
        codes,
        taf: config.taf_enabled() && !notaf,
    };

    println!("{}", provider.report_url(&request)?);
    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let current = config.provider_id().unwrap_or_default();
    let options = ProviderId::all().to_vec();
    let cursor = options.iter().position(|id| *id == current).unwrap_or(0);

    let id = Select::new("Default provider:", options)
        .with_starting_cursor(cursor)
        .prompt()?;

    let timeout = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please type a whole number of seconds")
        .prompt()?;

    let taf = Confirm::new("Get TAF reports by default?")
        .with_default(config.taf_enabled())
        .prompt()?;

    config.set_default_provider(id);
    config.timeout_secs = Some(timeout);
    config.taf = Some(taf);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_codes_and_flags() {
        let cli = Cli::parse_from(["metar", "epwa", "KJFK", "--notaf", "--timeout", "5"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.report.codes, ["epwa", "KJFK"]);
        assert!(cli.report.notaf);
        assert_eq!(cli.report.timeout, Some(5));
        assert!(!cli.report.json);
    }

    #[test]
    fn link_subcommand() {
        let args = ["metar", "link", "EPWA", "--provider", "aviationweather-legacy"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Some(Command::Link { codes, notaf, provider }) => {
                assert_eq!(codes, ["EPWA"]);
                assert!(!notaf);
                assert_eq!(provider.provider.as_deref(), Some("aviationweather-legacy"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn configure_subcommand() {
        let cli = Cli::parse_from(["metar", "configure"]);
        assert!(matches!(cli.command, Some(Command::Configure)));
    }

    #[test]
    fn provider_override_replaces_config() {
        let mut config = Config::default();
        let classic = ProviderArgs {
            provider: Some("aviationweather-classic".into()),
        };
        classic.apply(&mut config);
        assert_eq!(config.provider_id().unwrap(), ProviderId::AviationWeatherClassic);

        ProviderArgs { provider: None }.apply(&mut config);
        assert_eq!(config.provider_id().unwrap(), ProviderId::AviationWeatherClassic);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
