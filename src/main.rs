use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use time_tracker::config::Config;
use time_tracker::db::{self, PgRepository, Repository};
use time_tracker::error::StartupError;
use time_tracker::routes;

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = run().await;
    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let pool = db::connect(&config.database).await?;
    db::ensure_schema(&pool).await?;
    let repository: Arc<dyn Repository> = Arc::new(PgRepository::new(pool));
    let repository = web::Data::from(repository);

    info!("Server running at http://{}", config.server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repository.clone())
            .configure(routes::routes::configure)
    })
    .bind(&config.server_address)?
    .run()
    .await?;

    Ok(())
}
