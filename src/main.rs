use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use sunsu_backend::auth::jwt::JwtSecret;
use sunsu_backend::cache::RedisCache;
use sunsu_backend::config::Settings;
use sunsu_backend::error::AppError;
use sunsu_backend::{create_pool, handlers};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");

    let db = create_pool(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database ready");
    let db_data = web::Data::new(db);

    let redis_cache = RedisCache::new(&settings.redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    let cache_config = web::Data::new(settings.cache.clone());
    let jwt_secret = web::Data::new(JwtSecret(settings.jwt_secret.clone()));

    let bind_addr = settings.bind_addr();
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(cache_config.clone())
            .app_data(jwt_secret.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("Invalid JSON: {err}")).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("Invalid query: {err}")).into()
            }))
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
