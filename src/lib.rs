pub mod cache;
pub mod config;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod history;
pub mod log;
pub mod model;
pub mod normalize;
pub mod profit;
pub mod rank;
pub mod search;
pub mod service;
pub mod store;
pub mod ui;
pub mod watch;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::favorites::FavoritesStore;
use crate::fetch::HttpFetcher;
use crate::service::{FundDataService, TtlPolicy};
use crate::store::KeyValueStore;

#[derive(Debug)]
pub enum AppCommand {
    Watch {
        refresh: bool,
    },
    Add {
        code: String,
        name: Option<String>,
    },
    Remove {
        code: String,
    },
    Position {
        code: String,
        shares: f64,
        cost: f64,
    },
    Search {
        keyword: String,
    },
    Detail {
        code: String,
    },
    History {
        code: String,
        page: usize,
        page_size: usize,
    },
    Rank {
        fund_type: String,
        sort: String,
        page: usize,
        page_size: usize,
    },
}

fn open_store(config: &config::AppConfig) -> Arc<dyn KeyValueStore> {
    let data_path = config
        .data_path
        .clone()
        .or_else(|| config::AppConfig::default_data_path().ok());
    if let Some(path) = data_path {
        match store::disk::FjallStore::open(&path.join("store")) {
            Ok(disk) => return Arc::new(disk),
            Err(e) => warn!("falling back to in-memory store: {e}"),
        }
    }
    Arc::new(store::memory::MemoryStore::new())
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fundwatch starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = open_store(&config);
    let cache = CacheStore::new(Arc::clone(&store));
    let service = FundDataService::new(
        HttpFetcher::new(),
        cache,
        config.endpoints.clone(),
        TtlPolicy::from(&config.cache_ttl),
    );
    let favorites = FavoritesStore::new(store);

    match command {
        AppCommand::Watch { refresh } => watch::run(&service, &favorites, refresh).await,
        AppCommand::Add { code, name } => {
            if favorites.contains(&code).await {
                println!("{code} is already on the watch list.");
                return Ok(());
            }
            // Resolve the display name from the live valuation when the
            // caller did not supply one; a failed lookup is not fatal.
            let name = match name {
                Some(name) => name,
                None => match service.get_valuation(&code, true).await {
                    Ok(valuation) => valuation.name,
                    Err(e) => {
                        debug!("could not resolve name for {code}: {e}");
                        String::new()
                    }
                },
            };
            if favorites.add(&code, &name).await {
                println!("Added {code} to the watch list.");
            } else {
                println!("Could not add '{code}'.");
            }
            Ok(())
        }
        AppCommand::Remove { code } => {
            favorites.remove(&code).await;
            println!("Removed {code} from the watch list.");
            Ok(())
        }
        AppCommand::Position { code, shares, cost } => {
            if favorites.set_position(&code, shares, cost).await {
                println!("Updated position for {code}: {shares} shares at {cost}.");
            } else {
                println!("{code} is not on the watch list. Add it first with `fundwatch add {code}`.");
            }
            Ok(())
        }
        AppCommand::Search { keyword } => search::run(&service, &favorites, &keyword).await,
        AppCommand::Detail { code } => detail::run(&service, &code).await,
        AppCommand::History {
            code,
            page,
            page_size,
        } => history::run(&service, &code, page, page_size).await,
        AppCommand::Rank {
            fund_type,
            sort,
            page,
            page_size,
        } => rank::run(&service, &fund_type, &sort, page, page_size).await,
    }
}
