#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use foodcourt::auth::config::AuthConfig;
use foodcourt::auth::AuthLayer;
use foodcourt::{api, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let auth_config = AuthConfig::from_env().expect("JWT_SECRET must be set");

    info!("Initializing database connection pool...");
    let state = AppState::from_env(&database_url);

    const HOST: &str = "0.0.0.0";
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(5000);

    info!("Starting server at http://{}:{}", HOST, port);

    HttpServer::new(move || {
        App::new()
            .wrap(AuthLayer::new(auth_config.clone()))
            .app_data(web::JsonConfig::default().error_handler(api::default_error_handler))
            .configure(|cfg| api::configure(cfg, &state))
    })
    .bind((HOST, port))?
    .run()
    .await
}
