//! Site Weather Monitoring Service - Cycle Entry Point
//!
//! Runs one fetch-and-decide cycle for the configured site:
//! 1. Fetches the six upstream sources concurrently (sensor, observation
//!    table, forecast discussion, hazard outlook, hourly forecast, alerts)
//! 2. Assembles a snapshot of current conditions
//! 3. Diffs it against the previously persisted snapshot
//! 4. Persists the new snapshot and prints what changed
//!
//! Scheduling (periodic runs, quiet hours) is handled externally, e.g. by
//! cron or a systemd timer, so each invocation is a single cycle.
//!
//! Usage:
//!   cargo run --release                          # site.toml in working dir
//!   cargo run --release -- --config /etc/skymon/site.toml
//!   cargo run --release -- --snapshot /var/lib/skymon/snapshot.json
//!
//! Environment:
//!   SENSOR_API_KEY / SENSOR_APPLICATION_KEY - personal weather station
//!   credentials (optional; loaded from .env if present)

use skymon_service::config;
use skymon_service::cycle::{self, CycleError};
use skymon_service::store::SnapshotStore;
use std::env;

fn main() {
    println!("🌤️  Site Weather Monitoring Service");
    println!("====================================\n");

    // Sensor credentials may live in a local .env
    dotenv::dotenv().ok();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut config_path = "site.toml".to_string();
    let mut snapshot_override: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
            }
            "--snapshot" => {
                if i + 1 < args.len() {
                    snapshot_override = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --snapshot requires a file path");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--config PATH] [--snapshot PATH]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let site = config::load_config_from(&config_path);
    let snapshot_path = snapshot_override.unwrap_or_else(|| site.snapshot_path.clone());
    let store = SnapshotStore::new(snapshot_path);

    println!("📊 Site: {}", site.name);
    println!(
        "   Station {} / office {} / grid {},{} / zone {}",
        site.obs_station, site.nws_office, site.grid_x, site.grid_y, site.alert_zone
    );
    match &site.sensor_device {
        Some(mac) => println!("   Sensor device: {}", mac),
        None => println!("   Sensor device: none configured"),
    }
    println!();

    let outcome = match cycle::run_cycle(&site, &store) {
        Ok(outcome) => outcome,
        Err(e @ CycleError::InsufficientData) => {
            eprintln!("\n❌ Cycle aborted: {}", e);
            eprintln!("   Last good snapshot left in place\n");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Cycle failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n✓ Snapshot saved to {}", store.path().display());

    // Current conditions
    if let Some(temp) = outcome.snapshot.temp_f {
        println!("   {:.0}°F, {}", temp, outcome.snapshot.weather);
    }
    if !outcome.snapshot.wind.is_empty() {
        println!("   Wind {}", outcome.snapshot.wind);
    }

    // Active alerts
    if !outcome.alerts.is_empty() {
        println!("\n📢 Active alerts:");
        for alert in &outcome.alerts {
            println!("   {} {}", alert.icon, alert.headline);
        }
    }

    // Flight window summary
    if let Some(report) = &outcome.flight_report {
        println!("\n🛩️  {}", report.summary);
    }

    // What changed since the last cycle
    if outcome.changes.has_changes {
        println!("\n🔔 Changes since last cycle:");
        for line in outcome
            .changes
            .alert_changes
            .iter()
            .chain(&outcome.changes.condition_changes)
            .chain(&outcome.changes.forecast_changes)
        {
            println!("   • {}", line);
        }
    } else {
        println!("\n   No changes since last cycle");
    }
}
