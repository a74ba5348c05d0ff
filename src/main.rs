use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battle_tracker::calculate::StatisticsQuery;
use battle_tracker::config::AppConfig;
use battle_tracker::models::{BattleType, GameCounts, StatisticsResult};
use battle_tracker::service::StatisticsService;
use battle_tracker::storage::{JsonlNameResolver, JsonlRecordSource};

#[derive(Parser)]
#[command(name = "battle-tracker")]
#[command(about = "Trading card game battle log analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error; overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show win/loss statistics for a period
    Stats {
        /// First day of the period (YYYY-MM-DD or YYYY/MM/DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day of the period (default: today)
        #[arg(long)]
        to: Option<String>,

        /// Only count this battle type (rank_match, free_match, room_match, grand_prix)
        #[arg(long)]
        battle_type: Option<BattleType>,

        /// Only count this season
        #[arg(long)]
        season: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the seasons present in the battle log
    Seasons,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let (json_layer, text_layer) = if cli.json_logs {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::debug!("Starting battle-tracker v{}", env!("CARGO_PKG_VERSION"));

    let storage = config.storage();
    let service = StatisticsService::new(
        Arc::new(JsonlRecordSource::new(storage.clone())),
        Arc::new(JsonlNameResolver::new(storage)),
        config.stats.calendar()?,
    );

    match cli.command {
        Commands::Stats {
            from,
            to,
            battle_type,
            season,
            format,
        } => {
            let query = StatisticsQuery {
                start_date: from,
                end_date: to,
                battle_type,
                season,
            };

            let result = match service.statistics(&query).await {
                Ok(result) => result,
                Err(e) if e.is_client_error() => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print_report(&result),
            }
        }
        Commands::Seasons => {
            let seasons = service.seasons().await?;
            if seasons.is_empty() {
                println!("No seasons recorded");
            }
            for season in seasons {
                println!("{}", season);
            }
        }
    }

    Ok(())
}

fn counts_line(counts: &GameCounts) -> String {
    format!(
        "{:>5} games {:>5}W {:>5}L {:>7}",
        counts.total_games,
        counts.wins,
        counts.losses,
        counts.win_rate.to_string()
    )
}

fn print_section<'a>(title: &str, rows: impl Iterator<Item = (String, &'a GameCounts)>) {
    println!("\n{}", title);
    let mut empty = true;
    for (label, counts) in rows {
        empty = false;
        println!("  {:<32} {}", label, counts_line(counts));
    }
    if empty {
        println!("  (none)");
    }
}

fn print_report(result: &StatisticsResult) {
    println!(
        "=== Battle statistics {} .. {} ===",
        result.date_range.start, result.date_range.end
    );
    println!("  {:<32} {}", "Overall", counts_line(&result.overall));

    print_section(
        "By my deck",
        result
            .by_my_deck
            .iter()
            .map(|b| (b.deck_name.clone(), &b.counts)),
    );
    print_section(
        "By opponent deck",
        result
            .by_opponent_deck
            .iter()
            .map(|b| (format!("{} [{}]", b.deck_name, b.class_name), &b.counts)),
    );
    print_section(
        "By opponent class",
        result
            .by_opponent_class
            .iter()
            .map(|b| (b.class_name.clone(), &b.counts)),
    );
    print_section(
        "By rank",
        result
            .by_rank
            .iter()
            .map(|b| (format!("{} / {}", b.rank, b.group), &b.counts)),
    );
    print_section(
        "By turn",
        [
            ("First".to_string(), &result.by_turn.first),
            ("Second".to_string(), &result.by_turn.second),
        ]
        .into_iter(),
    );
}
