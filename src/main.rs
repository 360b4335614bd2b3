use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundwatch::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fundwatch::AppCommand {
    fn from(cmd: Commands) -> fundwatch::AppCommand {
        match cmd {
            Commands::Watch { refresh } => fundwatch::AppCommand::Watch { refresh },
            Commands::Add { code, name } => fundwatch::AppCommand::Add { code, name },
            Commands::Remove { code } => fundwatch::AppCommand::Remove { code },
            Commands::Position { code, shares, cost } => {
                fundwatch::AppCommand::Position { code, shares, cost }
            }
            Commands::Search { keyword } => fundwatch::AppCommand::Search { keyword },
            Commands::Detail { code } => fundwatch::AppCommand::Detail { code },
            Commands::History {
                code,
                page,
                page_size,
            } => fundwatch::AppCommand::History {
                code,
                page,
                page_size,
            },
            Commands::Rank {
                fund_type,
                sort,
                page,
                page_size,
            } => fundwatch::AppCommand::Rank {
                fund_type,
                sort,
                page,
                page_size,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the watch list with live valuations and profit
    Watch {
        /// Bypass the cache and fetch fresh valuations
        #[arg(short, long)]
        refresh: bool,
    },
    /// Add a fund to the watch list
    Add {
        /// Fund code
        code: String,
        /// Display name; resolved from the live valuation when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Remove a fund from the watch list
    Remove {
        /// Fund code
        code: String,
    },
    /// Record a held position for a watched fund
    Position {
        /// Fund code
        code: String,
        /// Held shares
        #[arg(short, long)]
        shares: f64,
        /// Cost basis per share
        #[arg(long)]
        cost: f64,
    },
    /// Search funds by code, name or pinyin
    Search {
        /// Search keyword
        keyword: String,
    },
    /// Display fund details
    Detail {
        /// Fund code
        code: String,
    },
    /// Display historical NAV
    History {
        /// Fund code
        code: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        page_size: usize,
    },
    /// Display fund rankings
    Rank {
        /// Fund type selector (gp, hh, zq, zs, qdii, lof, fof or all)
        #[arg(short, long, default_value = "all")]
        fund_type: String,
        /// Sort selector (zzf for daily change, z, y, 3y, 6y, 1n, ...)
        #[arg(short, long, default_value = "zzf")]
        sort: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        page_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fundwatch::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fundwatch::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
endpoints:
  valuation_base_url: "http://fundgz.1234567.com.cn/js"
  detail_base_url: "http://fund.eastmoney.com/pingzhongdata"
  history_base_url: "http://api.fund.eastmoney.com/f10/lsjz"
  search_base_url: "https://fundsuggest.eastmoney.com/FundSearch/api/FundSearchAPI.ashx"
  rank_base_url: "http://fund.eastmoney.com/data/rankhandler.aspx"

cache_ttl:
  valuation_secs: 300
  detail_secs: 3600
  rank_secs: 1800
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
