use chrono::Datelike;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallyboard_client::BillingApi;
use tallyboard_console::config::ConsoleConfig;
use tallyboard_console::loader::PeriodFilter;
use tallyboard_console::session::UserSession;
use tallyboard_console::{Console, LoadStatus};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tallyboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ConsoleConfig::from_env();
    tracing::info!(api_base_url = %config.api_base_url, "Loaded console configuration");

    // --- Console ---
    let now = chrono::Utc::now();
    let filter = PeriodFilter::new(now.month(), now.year());
    let api = BillingApi::new(config.api_base_url.clone());
    let mut console = Console::new(api, UserSession::guest(), config.totals_policy, filter);

    match console.reload().await {
        LoadStatus::Loaded { rows } => {
            tracing::info!(rows, "Billing period loaded");
        }
        status => {
            tracing::error!(?status, "Billing period failed to load");
            for notice in console.drain_notices() {
                eprintln!("{}: {}", notice.severity, notice.message);
            }
            std::process::exit(1);
        }
    }

    print_rows(&console);
    print_totals(&console);

    for notice in console.drain_notices() {
        println!("{}: {}", notice.severity, notice.message);
    }
}

fn print_rows(console: &Console) {
    println!(
        "{:<20} {:<20} {:<24} {:>8} {:>8} {:>10} {:>10}",
        "Project", "Subproject", "Resource", "Hours", "Rate", "Costing", "Total"
    );
    for row in console.visible_rows() {
        println!(
            "{:<20} {:<20} {:<24} {:>8.2} {:>8.2} {:>10.2} {:>10.2}{}",
            row.project_name,
            row.subproject_name,
            row.resource_name,
            row.hours,
            row.rate,
            row.costing(),
            row.total_bill(),
            if row.is_editable { "" } else { "  [read-only]" },
        );
    }
}

fn print_totals(console: &Console) {
    let totals = console.totals();
    println!(
        "\nRevenue: {:.2}  Cost: {:.2}  Grand total: {:.2}",
        totals.revenue, totals.cost, totals.grand
    );
}
