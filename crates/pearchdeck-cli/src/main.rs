mod filter_arg;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pearchdeck_client::{metrics, ClientConfig, HttpTransport, SearchSession, SearchState};
use pearchdeck_core::endpoints::visible_groups;
use pearchdeck_core::pricing::{estimate, PackageTier};
use pearchdeck_core::render::render_text;
use pearchdeck_core::snippet::{curl_snippet, python_snippet};
use pearchdeck_core::{build, FilterGroup, FilterModel, SNIPPET_LIMIT};
use pearchdeck_storage::{FileSettingsStore, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pearchdeck")]
#[command(about = "Candidate search console for the Pearch API", long_about = None)]
struct Cli {
    /// Search endpoint URL
    #[arg(long, global = true, env = "PEARCH_API_URL")]
    endpoint: Option<String>,
    #[arg(long, global = true, env = "PEARCH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Settings file
    #[arg(long, global = true, env = "PEARCHDECK_SETTINGS")]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run a live search and print the results
    Search {
        query: String,
        /// FIELD[/or][/not]=v1,!v2 (repeatable)
        #[arg(long = "filter", short = 'f', value_parser = filter_arg::parse_filter)]
        filters: Vec<FilterGroup>,
        /// Print the JSON view instead of rendered cards
        #[arg(long)]
        json: bool,
        /// Dump search metrics to stderr afterwards
        #[arg(long)]
        metrics: bool,
    },
    /// Print the request a search would send, as a code sample
    Snippet {
        query: String,
        #[arg(long = "filter", short = 'f', value_parser = filter_arg::parse_filter)]
        filters: Vec<FilterGroup>,
        #[arg(long, value_enum, default_value_t = Lang::Curl)]
        lang: Lang,
    },
    /// Inspect or replace stored settings
    Settings {
        #[command(subcommand)]
        op: SettingsOp,
    },
    /// Estimate monthly cost for a package
    Pricing {
        #[arg(long, value_enum, default_value_t = Tier::Starter)]
        package: Tier,
        #[arg(long)]
        searches: u64,
        #[arg(long)]
        candidates: u64,
    },
    /// List the API endpoints enabled in settings
    Endpoints,
}

#[derive(Subcommand)]
enum SettingsOp {
    Show,
    Path,
    Export { out: Option<PathBuf> },
    Import { file: PathBuf },
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    Curl,
    Python,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    Starter,
    Professional,
    Enterprise,
}

impl From<Tier> for PackageTier {
    fn from(t: Tier) -> Self {
        match t {
            Tier::Starter => PackageTier::Starter,
            Tier::Professional => PackageTier::Professional,
            Tier::Enterprise => PackageTier::Enterprise,
        }
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(e) = cli.endpoint.as_ref().filter(|e| !e.is_empty()) {
        config.endpoint = e.clone();
    }
    if let Some(k) = cli.api_key.as_ref().filter(|k| !k.is_empty()) {
        config.api_key = k.clone();
    }
    config
}

async fn run_search(
    config: ClientConfig,
    store: &dyn SettingsStore,
    query: String,
    filters: Vec<FilterGroup>,
    json: bool,
) -> Result<()> {
    if !config.has_api_key() {
        tracing::warn!("no API key configured; the request will likely be rejected");
    }
    let transport = HttpTransport::new(&config)?;
    let mut session = SearchSession::new(Arc::new(transport));
    session.set_query(query);
    session.set_filters(FilterModel::from_groups(filters));

    let settings = store.load();
    session.trigger(&settings);
    let interrupted = tokio::select! {
        _ = session.settle() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        session.trigger(&settings);
    }

    match session.settle().await {
        SearchState::Completed => {
            if json {
                let view = session.json_view(&settings).unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if let Some(view) = session.results_view(&settings) {
                print!("{}", render_text(&view));
            }
            Ok(())
        }
        SearchState::Failed(msg) => bail!(msg),
        SearchState::Cancelled => {
            eprintln!("{}", session.message().unwrap_or_default());
            Ok(())
        }
        other => bail!("search ended in unexpected state {:?}", other),
    }
}

fn run_settings(store: &FileSettingsStore, op: SettingsOp) -> Result<()> {
    match op {
        SettingsOp::Show => println!("{}", store.export()?),
        SettingsOp::Path => println!("{}", store.path().display()),
        SettingsOp::Export { out: Some(path) } => {
            std::fs::write(&path, store.export()?)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        SettingsOp::Export { out: None } => println!("{}", store.export()?),
        SettingsOp::Import { file } => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            store.import(&body)?;
            eprintln!("settings imported into {}", store.path().display());
        }
        SettingsOp::Reset => {
            store.clear()?;
            eprintln!("settings reset to defaults");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = client_config(&cli);
    let store = FileSettingsStore::open(
        cli.settings
            .clone()
            .unwrap_or_else(FileSettingsStore::default_path),
    );

    match cli.cmd {
        Cmd::Search {
            query,
            filters,
            json,
            metrics: dump_metrics,
        } => {
            let result = run_search(config, &store, query, filters, json).await;
            if dump_metrics {
                match metrics::gather_text() {
                    Ok(text) => eprint!("{}", text),
                    Err(e) => tracing::warn!("metrics encoding failed: {}", e),
                }
            }
            result?;
        }
        Cmd::Snippet {
            query,
            filters,
            lang,
        } => {
            let request = build(&query, &filters, &store.load(), SNIPPET_LIMIT);
            let text = match lang {
                Lang::Curl => curl_snippet(&config.endpoint, &request),
                Lang::Python => python_snippet(&config.endpoint, &request),
            };
            println!("{}", text);
        }
        Cmd::Settings { op } => run_settings(&store, op)?,
        Cmd::Pricing {
            package,
            searches,
            candidates,
        } => {
            let settings = store.load();
            let tier = PackageTier::from(package);
            let e = estimate(tier.select(&settings.packages), searches, candidates);
            println!("package:            {}", e.package);
            println!("candidates/month:   {}", e.total_candidates);
            println!("overage candidates: {}", e.overage_candidates);
            println!("base cost:          ${:.2}", e.base_cost);
            println!("overage cost:       ${:.2}", e.overage_cost);
            println!("total:              ${:.2}", e.total_cost);
        }
        Cmd::Endpoints => {
            let settings = store.load();
            for group in visible_groups(&settings.api_endpoint_groups) {
                println!("{}: {}", group.title, group.description);
                for ep in &group.endpoints {
                    println!("  {:<6} {:<40} {}", ep.method, ep.path, ep.description);
                }
            }
        }
    }
    Ok(())
}
