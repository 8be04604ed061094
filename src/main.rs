use actix_web::{middleware::Logger, web, App, HttpServer};
use conduit_users::config::EnvConfig;
use conduit_users::db::db_service::DbService;
use conduit_users::routes::configure_routes;
use sea_orm::ConnectOptions;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);

    let mut options = ConnectOptions::new(config.db_url.clone());
    options.max_connections(config.db_max_connections);
    let db_service = Arc::new(DbService::connect(options).await?);

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&db_service)))
            .app_data(web::Data::new(config.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
