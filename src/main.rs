use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use marketplace_products::config::ServerConfig;
use marketplace_products::gateway::ProductHandler;
use marketplace_products::repository::DieselRepository;
use marketplace_products::routes::products::configure;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let handler = web::Data::new(ProductHandler::new(DieselRepository::new(pool)));

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(handler.clone())
            .configure(configure::<DieselRepository>)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
