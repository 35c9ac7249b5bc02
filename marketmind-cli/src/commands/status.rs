use anyhow::{Context, Result, bail};
use clap::Args;
use client::HealthMonitor;
use shared::models::HealthStatus;

use super::Dashboard;

#[derive(Args, Debug)]
#[command(about = "Check whether the backend is online")]
pub struct StatusArgs {
    /// Keep polling and print every status change until interrupted
    #[arg(long, short)]
    pub watch: bool,
}

pub async fn status(dashboard: &Dashboard, args: StatusArgs) -> Result<()> {
    if args.watch {
        return watch(dashboard).await;
    }

    let status = HealthStatus::from_probe(dashboard.api.check_health().await);
    println!("{}", render_status(status));
    if status == HealthStatus::Offline {
        bail!(
            "backend at {} is not reporting an active status",
            dashboard.config.health_url
        );
    }
    Ok(())
}

async fn watch(dashboard: &Dashboard) -> Result<()> {
    let monitor = HealthMonitor::spawn(dashboard.api.clone(), dashboard.config.health_interval());
    let mut changes = monitor.subscribe();
    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        dashboard.config.health_url, dashboard.config.health_interval_secs
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *changes.borrow_and_update();
                println!("{}", render_status(status));
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

/// Indicator text; empty while the first probe is pending.
pub fn render_status(status: HealthStatus) -> &'static str {
    status.label().unwrap_or_default()
}
