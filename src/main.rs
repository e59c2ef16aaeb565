use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opsledger::config::{Config, DatabaseConfig};
use opsledger::middleware::{ErrorLogger, RequestIdMiddleware};
use opsledger::modules;
use opsledger::modules::businesses::{BusinessService, PgBusinessRepository};
use opsledger::modules::products::{PgProductRepository, ProductService};
use opsledger::modules::records::{
    Expense, PgRecordRepository, ProductionEntry, RecordService, Sale,
};
use opsledger::modules::reports::{AggregationEngine, PgReportRepository, ReportAssembler};

fn init_tracing(log_format: &str) {
    let json = log_format == "json";

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsledger=debug,actix_web=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| io::Error::other(e.to_string()))?;
    init_tracing(&config.app.log_format);

    config.validate().map_err(|e| {
        tracing::error!(error = %e, "Configuration validation failed");
        io::Error::other(e.to_string())
    })?;

    tracing::info!("Starting OpsLedger reporting service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config.database.create_pool().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create database pool");
        io::Error::other(e.to_string())
    })?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    if config.app.run_migrations {
        DatabaseConfig::run_migrations(&db_pool)
            .await
            .map_err(|e| io::Error::other(e.to_string()))?;
        tracing::info!("Migrations applied");
    }

    let max_page_size = config.reporting.max_page_size;
    let records = Arc::new(PgRecordRepository::new(db_pool.clone()));

    let sales = web::Data::new(RecordService::<Sale>::new(records.clone(), max_page_size));
    let expenses = web::Data::new(RecordService::<Expense>::new(records.clone(), max_page_size));
    let production = web::Data::new(RecordService::<ProductionEntry>::new(
        records,
        max_page_size,
    ));
    let products = web::Data::new(ProductService::new(Arc::new(PgProductRepository::new(
        db_pool.clone(),
    ))));
    let businesses = web::Data::new(BusinessService::new(Arc::new(
        PgBusinessRepository::new(db_pool.clone()),
    )));
    let reports = web::Data::new(ReportAssembler::new(AggregationEngine::new(
        Arc::new(PgReportRepository::new(db_pool.clone())),
        config.reporting.ranking_default_limit,
    )));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorLogger)
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(sales.clone())
            .app_data(expenses.clone())
            .app_data(production.clone())
            .app_data(products.clone())
            .app_data(businesses.clone())
            .app_data(reports.clone())
            .configure(modules::health::controllers::configure_readiness)
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
