use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use oashelf::config::{find_config_file, load_config, Config};
use oashelf::export::{self, ExportFormat};
use oashelf::models::{Record, SearchQuery, SourceType};
use oashelf::sources::{Source, SourceRegistry};
use oashelf::ui;
use oashelf::utils::HttpClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// oashelf - Search open-access books and articles and export the results
#[derive(Parser, Debug)]
#[command(name = "oashelf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search open-access books and articles and export the results", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format for search results
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Available search sources
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    #[value(name = "doab")]
    Doab,
    #[value(name = "doaj")]
    Doaj,
    #[value(name = "mock")]
    Mock,
    #[value(name = "all")]
    All,
}

impl SourceArg {
    fn source_type(self) -> Option<SourceType> {
        match self {
            SourceArg::Doab => Some(SourceType::Doab),
            SourceArg::Doaj => Some(SourceType::Doaj),
            SourceArg::Mock => Some(SourceType::Mock),
            SourceArg::All => None,
        }
    }

    fn ids(self) -> &'static [&'static str] {
        match self {
            SourceArg::Doab => &["doab"],
            SourceArg::Doaj => &["doaj"],
            SourceArg::Mock => &["mock"],
            SourceArg::All => &["doab", "doaj"],
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for books and articles by subject
    #[command(alias = "s")]
    Search {
        /// Subject/topic to search for
        subject: String,

        /// Inclusive lower publication-year bound
        #[arg(long, default_value_t = 2020)]
        start_year: i32,

        /// Inclusive upper publication-year bound
        #[arg(long, default_value_t = 2025)]
        end_year: i32,

        /// Maximum number of results
        #[arg(long, short, default_value_t = 50)]
        limit: usize,

        /// Source to search (default: all)
        #[arg(long, short, value_enum, default_value_t = SourceArg::All)]
        source: SourceArg,

        /// Export the results instead of printing them
        #[arg(long, short, value_enum)]
        export: Option<ExportFormat>,

        /// Directory to write the exported file into
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// List available sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("oashelf={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        Config::default()
    };

    let registry = build_registry(&config);

    match cli.command {
        Some(Commands::Search {
            subject,
            start_year,
            end_year,
            limit,
            source,
            export,
            output_dir,
        }) => {
            if subject.trim().is_empty() {
                bail!("Search subject must not be empty");
            }
            let plan = export_plan(export, source)?;

            let query = SearchQuery::new(&subject)
                .years(start_year, end_year)
                .limit(limit);

            let mut records: Vec<Record> = Vec::new();
            for id in source.ids() {
                let Some(src) = registry.get(id) else {
                    tracing::debug!("Source '{}' not compiled in, skipping", id);
                    continue;
                };

                match src.search(&query).await {
                    Ok(response) => {
                        tracing::info!("{}: {} results", src.name(), response.len());
                        records.extend(response.records);
                    }
                    Err(e) => {
                        // one failing source must not sink the others
                        eprintln!("Warning: {} search failed: {}", src.name(), e);
                    }
                }
            }

            match plan {
                Some((format, source_type)) => {
                    let artifact = export::export(&records, &query, format, source_type)?;
                    let dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
                    let path = artifact.write_to_dir(&dir)?;
                    println!("Exported {} records to {}", records.len(), path.display());
                }
                None => {
                    if records.is_empty() {
                        println!("No results found for \"{}\"", subject);
                    } else {
                        output_records(&records, cli.output)?;
                    }
                }
            }
        }
        Some(Commands::Sources) => {
            for src in registry.all() {
                let filtering = if src.filters_upstream() {
                    "server-side filtering"
                } else {
                    "local filtering"
                };
                println!("{:<8} {} ({})", src.id(), src.name(), filtering);
            }
        }
        None => {
            println!("oashelf v{}", oashelf::VERSION);
            println!("Run `oashelf --help` for usage.");
        }
    }

    Ok(())
}

/// Build the source registry. The configured HTTP timeout always reaches
/// the network sources; a base-URL override is applied independently, with
/// the built-in endpoint as the fallback.
fn build_registry(config: &Config) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    let client = source_client(config);

    #[cfg(feature = "source-doab")]
    {
        use oashelf::sources::DoabSource;
        let base = valid_base_url(config.upstream.doab_base_url.as_deref(), "doab")
            .unwrap_or_else(|| DoabSource::DEFAULT_BASE_URL.to_string());
        registry.register(Arc::new(DoabSource::with_options(client.clone(), base)));
    }

    #[cfg(feature = "source-doaj")]
    {
        use oashelf::sources::DoajSource;
        let base = valid_base_url(config.upstream.doaj_base_url.as_deref(), "doaj")
            .unwrap_or_else(|| DoajSource::DEFAULT_BASE_URL.to_string());
        registry.register(Arc::new(DoajSource::with_options(client.clone(), base)));
    }

    registry
}

/// HTTP client carrying the configured request timeout, shared by every
/// registered network source.
fn source_client(config: &Config) -> HttpClient {
    HttpClient::with_timeout(Duration::from_secs(config.http.timeout_secs))
}

/// Resolve the `--export`/`--source` combination up front, so a bad flag
/// pairing is rejected before any fetch is issued.
fn export_plan(
    export: Option<ExportFormat>,
    source: SourceArg,
) -> Result<Option<(ExportFormat, SourceType)>> {
    match export {
        Some(format) => match source.source_type() {
            Some(source_type) => Ok(Some((format, source_type))),
            None => bail!("--export requires a single source, e.g. --source doab"),
        },
        None => Ok(None),
    }
}

fn valid_base_url(base: Option<&str>, source_id: &str) -> Option<String> {
    let base = base?;
    match url::Url::parse(base) {
        Ok(_) => Some(base.trim_end_matches('/').to_string()),
        Err(e) => {
            tracing::warn!("Ignoring invalid {} base URL '{}': {}", source_id, base, e);
            None
        }
    }
}

fn output_records(records: &[Record], format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Plain => {
            ui::print_plain(records);
        }
        OutputFormat::Table => {
            println!("{}", ui::results_table(records));
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
