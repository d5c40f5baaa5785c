//! Occusense CLI
//!
//! Occupancy analytics agent for people-counter deployments.

use chrono::Utc;
use clap::{Parser, Subcommand};
use occusense::{
    config::Config,
    core::resolve_limit,
    report::ReportBuilder,
    store::MemoryStore,
    VERSION,
};
use std::path::PathBuf;

#[cfg(feature = "server")]
use occusense::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "occusense")]
#[command(author = "Occusense")]
#[command(version = VERSION)]
#[command(about = "Occupancy analytics agent for people-counter deployments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP agent
    #[cfg(feature = "server")]
    Serve {
        /// Port to bind to (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,

        /// Reference timezone (IANA name, overrides the configured one)
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Compute a dashboard report from a samples file
    Report {
        /// JSON Lines file with one sample per line
        #[arg(long, short)]
        samples: PathBuf,

        /// Reference timezone (IANA name, overrides the configured one)
        #[arg(long)]
        timezone: Option<String>,

        /// Number of recent activity rows
        #[arg(long)]
        limit: Option<i64>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show or update configuration
    Config {
        /// Set the reference timezone (IANA name)
        #[arg(long)]
        set_timezone: Option<String>,

        /// Set the HTTP agent port
        #[arg(long)]
        set_port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve { port, timezone } => {
            cmd_serve(port, timezone);
        }
        Commands::Report {
            samples,
            timezone,
            limit,
            json,
        } => {
            cmd_report(samples, timezone, limit, json);
        }
        Commands::Config {
            set_timezone,
            set_port,
        } => {
            cmd_config(set_timezone, set_port);
        }
    }
}

/// Resolve the reference timezone from an override or the config file.
fn resolve_tz(config: &Config, timezone: Option<String>) -> chrono_tz::Tz {
    let name = timezone.unwrap_or_else(|| config.timezone.clone());
    match name.parse() {
        Ok(tz) => tz,
        Err(_) => {
            eprintln!("Error: unknown timezone: {name}");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "server")]
fn cmd_serve(port: Option<u16>, timezone: Option<String>) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let tz = resolve_tz(&config, timezone);
    let port = port.unwrap_or(config.port);

    println!("Occusense v{VERSION}");
    println!("  Timezone: {}", tz.name());
    println!("  Activity feed length: {}", config.activity_limit);
    println!();

    // Ctrl+C signals the main thread over a channel.
    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .expect("Error setting Ctrl+C handler");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error creating runtime: {e}");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig::new(port, tz, config.activity_limit);
    let (addr, shutdown_tx) = match runtime.block_on(server::run(server_config)) {
        Ok(handles) => handles,
        Err(e) => {
            eprintln!("Error starting server: {e}");
            std::process::exit(1);
        }
    };

    println!("Listening on http://{addr}");
    println!("Press Ctrl+C to stop");

    let _ = stop_rx.recv();

    println!();
    println!("Stopping agent...");
    let _ = shutdown_tx.send(());
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
}

fn cmd_report(samples: PathBuf, timezone: Option<String>, limit: Option<i64>, json: bool) {
    let config = Config::load().unwrap_or_default();
    let tz = resolve_tz(&config, timezone);

    let store = match MemoryStore::from_jsonl(&samples) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading samples: {e}");
            std::process::exit(1);
        }
    };

    let limit = match resolve_limit(limit.or(Some(config.activity_limit as i64))) {
        Ok(limit) => limit,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let builder = ReportBuilder::new(tz).with_activity_limit(limit);
    let now = Utc::now();

    if json {
        println!("{}", builder.build_json(&store, now));
        return;
    }

    let report = builder.build(&store, now);

    println!("Occupancy Report");
    println!("================");
    println!();
    println!("Date: {} ({})", report.today.date, report.timezone);
    println!("Samples loaded: {}", store.len());
    println!();

    println!("Today:");
    println!("  Inside now: {}", report.today.current_inside);
    println!(
        "  Entries: {}   Exits: {}",
        report.today.total_in, report.today.total_out
    );
    match &report.today.peak_hour {
        Some(hour) => println!("  Peak: {} at {}", report.today.peak_count, hour),
        None => println!("  Peak: no samples today"),
    }
    println!(
        "  Average: {} over {} records",
        report.today.avg_today, report.today.records_today
    );
    println!();

    println!("Hourly trend:");
    if report.hourly_trend.is_empty() {
        println!("  no samples today");
    }
    for point in &report.hourly_trend {
        println!("  {}  {}", point.time, point.count);
    }
    println!();

    println!("Week of {}:", report.week.week_start);
    for day in &report.week.days {
        match (&day.busiest_hour, &day.freest_hour) {
            (Some(busiest), Some(freest)) => println!(
                "  {:<9} {}  in {}  out {}  peak {}  busiest {}  freest {}",
                day.day, day.date, day.total_in, day.total_out, day.peak_count, busiest, freest
            ),
            _ => println!("  {:<9} {}  no data", day.day, day.date),
        }
    }
    println!();

    println!("Recent activity:");
    if report.recent_activity.is_empty() {
        println!("  none");
    }
    for entry in &report.recent_activity {
        println!(
            "  [{}] {} ({}) -> {}",
            entry.time,
            entry.kind.as_str(),
            entry.count_change,
            entry.current_count
        );
    }
}

fn cmd_config(set_timezone: Option<String>, set_port: Option<u16>) {
    let mut config = Config::load().unwrap_or_default();

    if set_timezone.is_some() || set_port.is_some() {
        if let Some(name) = set_timezone {
            // Reject unknown zones before they reach the config file.
            if name.parse::<chrono_tz::Tz>().is_err() {
                eprintln!("Error: unknown timezone: {name}");
                std::process::exit(1);
            }
            config.timezone = name;
        }
        if let Some(port) = set_port {
            config.port = port;
        }
        if let Err(e) = config.save() {
            eprintln!("Error saving config: {e}");
            std::process::exit(1);
        }
        println!("Configuration updated.");
        println!();
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
