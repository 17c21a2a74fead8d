// region:    --- Imports
use crate::database::DatabaseManager;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auth;
mod bidding;
mod closing;
mod comment;
mod database;
mod error;
mod handlers;
mod listing;
mod query;
mod watchlist;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 스키마 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/", get(handlers::handle_index))
        .route("/register", post(handlers::handle_register))
        .route("/login", post(handlers::handle_login))
        .route("/logout", post(handlers::handle_logout))
        .route("/listing/:id", get(handlers::handle_get_listing))
        .route("/listing/:id/bid", post(handlers::handle_place_bid))
        .route("/listing/:id/bids", get(handlers::handle_get_bid_history))
        .route("/listing/:id/comment", post(handlers::handle_add_comment))
        .route("/categories", get(handlers::handle_get_categories))
        .route("/watchlist", get(handlers::handle_get_watchlist))
        .route(
            "/add_to_watchlist/:id",
            post(handlers::handle_add_to_watchlist),
        )
        .route(
            "/remove_from_watchlist/:id",
            post(handlers::handle_remove_from_watchlist),
        )
        .route("/new_listing", post(handlers::handle_new_listing))
        .route("/my_profile", get(handlers::handle_my_profile))
        .route(
            "/closed_listing/:id",
            get(handlers::handle_get_settlement).post(handlers::handle_close_listing),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(db_manager);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
