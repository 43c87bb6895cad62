use std::path::PathBuf;

use bm_common::connections::{annotate_connections, NoConnections};
use bm_common::logging::{init_tracing_subscriber, install_tracing_panic_hook, LogSettings};
use bm_common::matching::{
    load_ranking_config_from_env, page_window, EnvConfigError, FilterCriteria, Page,
    PaginationError, ProfileMatchRanker, RankQuery, RankingConfigError, ScoredCandidate, SortKey,
    DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE,
};
use bm_common::store::{load_connection_statuses, JsonFileProfileStore, ProfileStore, StoreError};
use bm_common::TagSet;
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;

const APP_NAME: &str = "bm-rank";

#[derive(Debug, Clone, Parser)]
#[command(name = "bm-rank", about = "Rank member profiles against a requester")]
struct Cli {
    /// JSON file holding an array of profiles
    #[arg(long, env = "BM_PROFILES_PATH")]
    profiles: PathBuf,

    /// Profile id of the member viewing the directory
    #[arg(long)]
    requester: String,

    /// JSON object mapping candidate id to connection status
    #[arg(long, env = "BM_CONNECTIONS_PATH")]
    connections: Option<PathBuf>,

    /// Keep only candidates in this industry
    #[arg(long)]
    industry: Option<String>,

    /// Keep only candidates in this location
    #[arg(long)]
    location: Option<String>,

    /// Comma separated skills; candidates need at least one
    #[arg(long, value_parser = parse_tags)]
    skills: Option<TagSet>,

    /// Comma separated interests; candidates need at least one
    #[arg(long, value_parser = parse_tags)]
    interests: Option<TagSet>,

    /// Sort order: score | newest | active | name
    #[arg(long, default_value = "score")]
    sort: SortKey,

    /// 1-indexed page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Candidates per page
    #[arg(long, env = "BM_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_tags(raw: &str) -> Result<TagSet, std::convert::Infallible> {
    Ok(TagSet::parse(raw))
}

impl Cli {
    fn query(&self) -> RankQuery {
        RankQuery {
            criteria: FilterCriteria {
                industry: self.industry.clone(),
                location: self.location.clone(),
                skills: self.skills.clone().unwrap_or_default(),
                interests: self.interests.clone().unwrap_or_default(),
            },
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    EnvConfig(#[from] EnvConfigError),
    #[error(transparent)]
    Config(#[from] RankingConfigError),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct RankOutput<'a> {
    requester_id: &'a str,
    page: Page<ScoredCandidate>,
    page_window: Vec<usize>,
}

fn rank_page(cli: &Cli, ranker: &ProfileMatchRanker) -> Result<Page<ScoredCandidate>, CliError> {
    let store = JsonFileProfileStore::new(&cli.profiles);
    let (requester, candidates) = store.load_matching_input(&cli.requester)?;

    let mut page = ranker.rank(&requester, &candidates, &cli.query())?;
    let items = std::mem::take(&mut page.items);
    page.items = match &cli.connections {
        Some(path) => annotate_connections(items, &load_connection_statuses(path)?),
        None => annotate_connections(items, &NoConnections),
    };

    info!(
        requester_id = %requester.id,
        total_items = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "ranked candidates"
    );
    Ok(page)
}

fn render(cli: &Cli, page: Page<ScoredCandidate>) -> Result<String, CliError> {
    let output = RankOutput {
        requester_id: &cli.requester,
        page_window: page_window(page.page, page.total_pages, DEFAULT_MAX_PAGE_BUTTONS).collect(),
        page,
    };
    let encoded = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(encoded)
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let ranker = ProfileMatchRanker::new(load_ranking_config_from_env()?)?;
    let page = rank_page(cli, &ranker)?;
    render(cli, page)
}

fn main() {
    dotenv().ok();
    let settings = LogSettings::from_env();
    init_tracing_subscriber(APP_NAME, &settings);
    install_tracing_panic_hook(APP_NAME, &settings);

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!(error = %err, "bm-rank failed");
            std::process::exit(1);
        }
    }
}
