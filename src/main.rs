use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use tracing::{error, info};

use scooter_dashboard::clients::{ApiClient, Gateways};
use scooter_dashboard::config::EnvironmentConfig;
use scooter_dashboard::services::{DashboardService, FinancialService};
use scooter_dashboard::utils::dates::DateRange;
use scooter_dashboard::utils::money::format_currency;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🛵 Scooter Shop Dashboard");
    info!("================================================");
    info!("🌐 Backend: {} ({})", config.api_base_url, config.environment);
    if config.is_development() {
        info!("🔧 Modo desarrollo: timeout {}s", config.request_timeout.as_secs());
    }

    let api = ApiClient::new(&config)?;
    let gateways = Gateways::new(api);

    let dashboard = DashboardService::new(
        Arc::new(gateways.customers.clone()),
        Arc::new(gateways.rentals.clone()),
        Arc::new(gateways.financial.clone()),
        Arc::new(gateways.scooters.clone()),
    );

    match dashboard.load().await {
        Ok(stats) => {
            info!("👥 Πελάτες: {}", stats.customers);
            info!("🛵 Διαθέσιμα scooters: {}", stats.available_scooters);
            info!("📋 Ενεργές ενοικιάσεις: {}", stats.active_rentals);
            info!("💶 Συνολικά έσοδα: {}", format_currency(stats.total_income));
        }
        Err(e) => {
            error!("❌ Δεν ήταν δυνατή η φόρτωση των δεδομένων: {}", e);
        }
    }

    let financial = FinancialService::new(
        Arc::new(gateways.transactions.clone()),
        Arc::new(gateways.financial.clone()),
        config.transactions_page_size,
        config.recent_transactions_limit,
    );
    let range = DateRange::last_months(Local::now().date_naive(), config.dashboard_range_months);

    match financial.load_page(range).await {
        Ok(snapshot) => {
            let summary = &snapshot.summary;
            info!("📊 Οικονομικά {} έως {}", range.start, range.end);
            info!("   Έσοδα: {}", format_currency(summary.total_income));
            info!("   Έξοδα: {}", format_currency(summary.total_expenses));
            info!("   {}: {}", summary.profit_label(), format_currency(summary.profit));
            for row in &snapshot.monthly {
                info!(
                    "   {} | έσοδα {} | έξοδα {}",
                    row.month_name,
                    format_currency(row.income),
                    format_currency(row.expenses)
                );
            }
        }
        Err(e) => {
            error!("❌ {}", e.user_message());
        }
    }

    info!("👋 Listo");
    Ok(())
}
