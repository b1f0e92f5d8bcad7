use clap::Parser;
use nd_core::config::Config;
use nd_core::analytics::{self, Metric, Period};
use nd_core::{subscription_tiers, Access, Article, ArticleStorage, Error, Feature, FilterCriteria, FilterEngine, Result};
use std::path::PathBuf;
use std::sync::Arc;

mod logging;
mod output;

use logging::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search and analyze the news dashboard corpus", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $ND_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Storage backend: memory (built-in corpus) or json
    #[arg(long, global = true)]
    storage: Option<String>,
    /// Article file for the json backend
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,
    /// Timeline file for the json backend
    #[arg(long, global = true)]
    timeline: Option<PathBuf>,
    /// Subscription tier to act as: basic, pro or enterprise
    #[arg(long, global = true)]
    tier: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search articles by text and facets
    Search {
        /// Matched case-insensitively against title, content, author and tags
        #[arg(default_value = "")]
        query: String,
        #[arg(long, value_delimiter = ',')]
        category: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        source: Vec<String>,
        /// left, center-left, center, center-right, right
        #[arg(long, value_delimiter = ',')]
        bias: Vec<String>,
        /// verified, partially-verified, disputed, false, pending
        #[arg(long, value_delimiter = ',')]
        fact_check: Vec<String>,
    },
    /// List the categories and sources of the corpus
    Facets,
    /// List subscription tiers
    Tiers,
    /// Show the fact-check and bias analysis of an article
    Analyze {
        id: String,
    },
    /// Show the topic timeline (enterprise)
    Timeline,
    /// Show an analytics metric (enterprise): bias, credibility, topics, engagement
    Analytics {
        metric: String,
        /// 24h, 7d, 30d or 90d
        #[arg(long, default_value = "7d")]
        period: String,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

impl Cli {
    /// Config file values with command line overrides applied.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(storage) = &self.storage {
            config.storage = storage.clone();
        }
        if let Some(corpus) = &self.corpus {
            config.corpus_path = Some(corpus.clone());
            if self.storage.is_none() {
                config.storage = "json".to_string();
            }
        }
        if let Some(timeline) = &self.timeline {
            config.timeline_path = Some(timeline.clone());
        }
        if let Some(tier) = &self.tier {
            config.tier = tier.parse()?;
        }
        if let Commands::Serve { addr: Some(addr) } = &self.command {
            config.server.addr = addr.clone();
        }
        Ok(config)
    }
}

/// Parses search flags; bias and fact-check facets need advanced filters.
fn search_criteria(
    access: &Access,
    query: &str,
    category: &[String],
    source: &[String],
    bias: &[String],
    fact_check: &[String],
) -> Result<FilterCriteria> {
    let criteria = FilterCriteria::from_raw(query, category, source, bias, fact_check)?;
    if criteria.uses_advanced_filters() {
        access.require(Feature::AdvancedFilters)?;
    }
    Ok(criteria)
}

async fn load_engine(storage: &dyn ArticleStorage) -> Result<FilterEngine> {
    Ok(FilterEngine::new(storage.articles().await?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = init_logging(cli.verbose).with_prefix("📰");

    let config = cli.resolve_config()?;
    log.debug(&format!("Resolved config: {:?}", config));
    let access = Access::for_tier(config.tier);

    let storage: Arc<dyn ArticleStorage> = nd_storage::create_storage(
        config.storage.as_str(),
        config.corpus_path.as_deref(),
        config.timeline_path.as_deref(),
    )
    .await?;

    match cli.command {
        Commands::Search { query, category, source, bias, fact_check } => {
            let criteria = search_criteria(&access, &query, &category, &source, &bias, &fact_check)?;
            let engine = load_engine(storage.as_ref()).await?;
            let outcome = engine.apply(&criteria);
            log.info(&format!("{} of {} articles match", outcome.articles.len(), engine.articles().len()));
            if cli.json {
                println!("{}", output::json(&outcome)?);
            } else {
                println!("{}", output::articles(&outcome.articles));
            }
        }
        Commands::Facets => {
            let engine = load_engine(storage.as_ref()).await?;
            if cli.json {
                let facets = serde_json::json!({
                    "categories": engine.categories(),
                    "sources": engine.sources(),
                });
                println!("{}", output::json(&facets)?);
            } else {
                println!("{}", output::facets(engine.categories(), engine.sources()));
            }
        }
        Commands::Tiers => {
            if cli.json {
                println!("{}", output::json(subscription_tiers())?);
            } else {
                println!("{}", output::tiers(subscription_tiers(), config.tier));
            }
        }
        Commands::Analyze { id } => {
            let article = storage
                .get_article(&id)
                .await?
                .ok_or_else(|| Error::NotFound(format!("article {}", id)))?;
            let analyzer = nd_analysis::create_analyzer(&config.analyzer)?;
            let report = nd_analysis::analyze_for(analyzer.as_ref(), &access, &article).await?;
            if report.is_locked() {
                log.warn(&format!("Analysis of {} needs a higher tier than {}", id, config.tier));
            }
            if cli.json {
                println!("{}", output::json(&report)?);
            } else {
                println!("{}", output::analysis(&report));
            }
        }
        Commands::Timeline => {
            access.require(Feature::Timeline)?;
            let events = storage.timeline().await?;
            if cli.json {
                println!("{}", output::json(&events)?);
            } else {
                println!("{}", output::timeline(&events));
            }
        }
        Commands::Analytics { metric, period } => {
            access.require(Feature::Analytics)?;
            let metric: Metric = metric.parse()?;
            let period: Period = period.parse()?;
            let articles = storage.articles().await?;
            let refs: Vec<&Article> = articles.iter().collect();
            let report = analytics::compute(metric, period, &refs);
            if cli.json {
                println!("{}", output::json(&report)?);
            } else {
                println!("{}\n{}", metric.label(), output::analytics(&report));
            }
        }
        Commands::Serve { .. } => {
            let analyzer = nd_analysis::create_analyzer(&config.analyzer)?;
            let state = nd_web::AppState::load(storage.as_ref(), analyzer, config.tier).await?;
            log.info(&format!("Starting server on {}", config.server.addr));
            nd_web::serve(state, &config.server.addr).await?;
        }
    }

    Ok(())
}
