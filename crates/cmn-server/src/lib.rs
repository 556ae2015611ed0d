//! HTTP surface for the commune backend.
//!
//! Wires the credential and session lifecycle into a single actix-web
//! server: public registration and login, the authenticated session
//! endpoints, and the admin roster. All state is constructed once here at
//! startup and injected; nothing global.

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use cmn_auth::Account;
use cmn_auth::Accounts;
use cmn_auth::Crypto;
use cmn_auth::Disk;
use cmn_auth::Hasher;
use cmn_auth::Images;
use cmn_auth::Sessions;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = cmn_pg::db().await;
    cmn_pg::migrate::<Account>(&client).await.expect("schema migration");
    let accounts: Arc<dyn Accounts> = client.clone();
    let images: Arc<dyn Images> = Arc::new(Disk::from_env());
    let sessions = web::Data::new(Sessions::new(
        accounts,
        images,
        Crypto::from_env(),
        Hasher::from_env(),
    ));
    let client = web::Data::new(client);
    log::info!("starting commune backend");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(sessions.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(cmn_auth::register))
                    .route("/login", web::post().to(cmn_auth::login))
                    .route("/logout", web::post().to(cmn_auth::logout))
                    .route("/refresh-token", web::get().to(cmn_auth::refresh))
                    .route("/change-password", web::post().to(cmn_auth::change_password))
                    .route("/change-profile-picture", web::post().to(cmn_auth::change_picture))
                    .route("/update-details", web::post().to(cmn_auth::update_details))
                    .route("/me", web::get().to(cmn_auth::me)),
            )
            .service(
                web::scope("/admin")
                    .route("/users", web::get().to(cmn_auth::roster)),
            )
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
