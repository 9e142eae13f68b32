use anyhow::Result;
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tankmon::config::{seed_channels, seed_users};
use tankmon::telemetry::{aggregate, field_stats, window_for};
use tankmon::users::{ADMIN_EMAIL, ADMIN_PASSWORD};
use tankmon::{AppConfig, ChannelStore, LiveDataManager, LoginOutcome, UserDirectory};
use tankmon_types::{default_unit, Channel, WidgetConfig};

/// tankmon - a channel-based IoT monitoring core with simulated telemetry
#[derive(Parser, Debug, Clone)]
#[command(name = "tankmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Refresh period in milliseconds (overrides the config file)
    #[arg(short = 'p', long = "period", value_name = "MS")]
    period: Option<u64>,

    /// Number of refresh ticks to run before exiting (0 = run until interrupted)
    #[arg(short = 't', long = "ticks", value_name = "N", default_value = "0")]
    ticks: u64,

    /// Watch only the channel with this name instead of all channels
    #[arg(short = 'c', long = "channel", value_name = "NAME")]
    channel: Option<String>,

    /// Settings file to load instead of the platform config
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting tankmon v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                AppConfig::default()
            }
        },
    };
    let period = Duration::from_millis(cli.period.unwrap_or(config.refresh.period_ms));

    let store = Arc::new(if config.seed.demo_data {
        ChannelStore::with_seed(seed_channels())
    } else {
        ChannelStore::new()
    });
    let users = UserDirectory::with_seed(seed_users());

    match users.login(ADMIN_EMAIL, ADMIN_PASSWORD)? {
        LoginOutcome::Admin => info!("Logged in as admin, {} channels visible", store.len()),
        other => warn!("Unexpected demo login outcome: {:?}", other),
    }

    let manager = LiveDataManager::new(Arc::clone(&store));
    let mut watched = Vec::new();
    for channel in store.list() {
        if cli
            .channel
            .as_deref()
            .map_or(true, |name| name == channel.name)
        {
            if manager.watch(channel.id) {
                watched.push(channel.id);
            }
        }
    }
    if watched.is_empty() {
        anyhow::bail!(
            "no channel matches {:?}",
            cli.channel.as_deref().unwrap_or("<all>")
        );
    }

    tokio::spawn(Arc::clone(&manager).run(period));

    let mut interval = tokio::time::interval(period);
    interval.tick().await; // completes immediately, show the initial sample
    let mut tick = 0u64;
    loop {
        for id in &watched {
            if let Some(channel) = store.get(*id) {
                report_channel(&channel, &manager);
            }
        }

        tick += 1;
        if cli.ticks > 0 && tick >= cli.ticks {
            break;
        }
        interval.tick().await;
    }

    info!("Ran {} refresh ticks, exiting", tick);
    Ok(())
}

/// Log the live values, widget windows and statistics of one channel
fn report_channel(channel: &Channel, manager: &LiveDataManager) {
    let Some(values) = manager.values(channel.id) else {
        return;
    };
    let now = Local::now();

    println!(
        "── {} ({} fields, {} widgets)",
        channel.name,
        channel.fields.len(),
        channel.widgets.len()
    );
    for field in channel.numeric_fields() {
        if let Some(current) = values.get(&field.name) {
            let stats = field_stats(*current);
            println!(
                "   {:<12} {:>8.2} {:<3} (est {:.2} .. {:.2})",
                field.name,
                current,
                default_unit(&field.name),
                stats.est_min,
                stats.est_max
            );
        }
    }

    for widget in &channel.widgets {
        let Some(current) = values.get(widget.config.field()) else {
            continue;
        };
        match &widget.config {
            WidgetConfig::Numeric(cfg) => {
                println!("   [numeric] {}: {:.2} {}", cfg.title, current, cfg.unit);
            }
            WidgetConfig::Chart(cfg) => {
                if let Some(window) = window_for(&widget.config, *current, now) {
                    let first = window.first().map(|p| p.label.as_str()).unwrap_or("");
                    let last = window.last().map(|p| p.label.as_str()).unwrap_or("");
                    println!(
                        "   [{} chart] {}: {} points {}..{}",
                        cfg.chart_type,
                        cfg.title,
                        window.len(),
                        first,
                        last
                    );
                }
            }
            WidgetConfig::Bar(cfg) => {
                if let Some(window) = window_for(&widget.config, *current, now) {
                    let values: Vec<f64> = window.iter().map(|p| p.value).collect();
                    println!(
                        "   [bar] {}: {:?} over {} buckets = {:.2}",
                        cfg.title,
                        cfg.aggregation,
                        values.len(),
                        aggregate(&values, cfg.aggregation)
                    );
                }
            }
        }
    }
}
