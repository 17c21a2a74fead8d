// region:    --- Imports
use crate::auth::commands as auth_commands;
use crate::auth::model::{LoginCommand, RegisterCommand, SessionResponse};
use crate::auth::session::{AuthUser, MaybeAuthUser};
use crate::bidding::commands::place_bid;
use crate::bidding::model::{Bid, PlaceBidCommand};
use crate::closing::{self, Settlement};
use crate::comment::{self, AddCommentCommand, Comment};
use crate::database::DatabaseManager;
use crate::error::AppResult;
use crate::listing::commands::create_listing;
use crate::listing::model::{Category, CreateListingCommand, Listing, ListingSummary, ListingView};
use crate::query;
use crate::watchlist;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Auth Handlers

/// 회원가입 요청 처리
pub async fn handle_register(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<RegisterCommand>,
) -> AppResult<Json<SessionResponse>> {
    info!("{:<12} --> 회원가입 요청 처리: {}", "Handler", cmd.username);
    let session = auth_commands::register(&db_manager, cmd).await?;
    Ok(Json(session))
}

/// 로그인 요청 처리
pub async fn handle_login(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<LoginCommand>,
) -> AppResult<Json<SessionResponse>> {
    info!("{:<12} --> 로그인 요청 처리: {}", "Handler", cmd.username);
    let session = auth_commands::login(&db_manager, cmd).await?;
    Ok(Json(session))
}

/// 로그아웃 요청 처리
pub async fn handle_logout(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
) -> AppResult<Json<Value>> {
    info!("{:<12} --> 로그아웃 요청 처리: {}", "Handler", auth.user.username);
    auth_commands::logout(&db_manager, auth.token).await?;
    Ok(Json(json!({ "message": "logged out" })))
}

// endregion: --- Auth Handlers

// region:    --- Listing Handlers

/// 활성 리스팅 목록 조회
pub async fn handle_index(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> AppResult<Json<Vec<ListingSummary>>> {
    info!("{:<12} --> 활성 리스팅 목록 요청", "Handler");
    let listings = query::handlers::get_active_listings(&db_manager).await?;
    Ok(Json(listings))
}

/// 리스팅 상세 조회 (로그인 여부에 따라 파생 플래그가 달라진다)
pub async fn handle_get_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<ListingView>> {
    info!("{:<12} --> 리스팅 상세 요청 id: {}", "Handler", listing_id);
    let view = query::handlers::get_listing_view(&db_manager, listing_id, viewer.as_ref()).await?;
    Ok(Json(view))
}

/// 리스팅 생성
pub async fn handle_new_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Json(cmd): Json<CreateListingCommand>,
) -> AppResult<Json<Listing>> {
    info!("{:<12} --> 리스팅 생성 요청: {}", "Handler", auth.user.username);
    let listing = create_listing(&db_manager, auth.user.id, cmd).await?;
    Ok(Json(listing))
}

/// 카테고리 목록 조회
pub async fn handle_get_categories(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> AppResult<Json<Vec<Category>>> {
    info!("{:<12} --> 카테고리 목록 요청", "Handler");
    let categories = query::handlers::list_categories(&db_manager).await?;
    Ok(Json(categories))
}

/// 내 프로필: 소유한 리스팅 조회 (낙찰받은 리스팅 포함)
pub async fn handle_my_profile(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ListingSummary>>> {
    info!("{:<12} --> 프로필 요청: {}", "Handler", auth.user.username);
    let listings = query::handlers::get_listings_by_seller(&db_manager, auth.user.id).await?;
    Ok(Json(listings))
}

// endregion: --- Listing Handlers

// region:    --- Bidding Handlers

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Path(listing_id): Path<i64>,
    Json(cmd): Json<PlaceBidCommand>,
) -> AppResult<Json<Bid>> {
    info!(
        "{:<12} --> 입찰 요청 처리: listing={}, bidder={}",
        "Handler", listing_id, auth.user.username
    );
    let bid = place_bid(&db_manager, listing_id, auth.user.id, cmd.amount).await?;
    Ok(Json(bid))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Vec<Bid>>> {
    info!("{:<12} --> 입찰 이력 요청 id: {}", "Handler", listing_id);
    let bids = query::handlers::get_bid_history(&db_manager, listing_id).await?;
    Ok(Json(bids))
}

// endregion: --- Bidding Handlers

// region:    --- Closing Handlers

/// 리스팅 마감 요청 처리
pub async fn handle_close_listing(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Settlement>> {
    info!(
        "{:<12} --> 리스팅 마감 요청 처리: listing={}, actor={}",
        "Handler", listing_id, auth.user.username
    );
    let settlement = closing::close_listing(&db_manager, listing_id, auth.user.id).await?;
    Ok(Json(settlement))
}

/// 마감된 리스팅의 정산 조회
pub async fn handle_get_settlement(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Settlement>> {
    info!("{:<12} --> 정산 조회 요청 id: {}", "Handler", listing_id);
    let settlement = closing::get_settlement(&db_manager, listing_id).await?;
    Ok(Json(settlement))
}

// endregion: --- Closing Handlers

// region:    --- Watchlist Handlers

#[derive(Deserialize)]
pub struct WatchlistParams {
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}

/// 관심 목록 조회
pub async fn handle_get_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Query(params): Query<WatchlistParams>,
) -> AppResult<Json<Vec<ListingSummary>>> {
    info!("{:<12} --> 관심 목록 요청: {}", "Handler", auth.user.username);
    let listings =
        query::handlers::get_watched_listings(&db_manager, auth.user.id, params.active_only)
            .await?;
    Ok(Json(listings))
}

/// 관심 목록 추가
pub async fn handle_add_to_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Value>> {
    info!(
        "{:<12} --> 관심 목록 추가 요청: listing={}, user={}",
        "Handler", listing_id, auth.user.username
    );
    watchlist::add_to_watchlist(&db_manager, listing_id, auth.user.id).await?;
    Ok(Json(json!({ "message": "added to watchlist" })))
}

/// 관심 목록 제거
pub async fn handle_remove_from_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Value>> {
    info!(
        "{:<12} --> 관심 목록 제거 요청: listing={}, user={}",
        "Handler", listing_id, auth.user.username
    );
    watchlist::remove_from_watchlist(&db_manager, listing_id, auth.user.id).await?;
    Ok(Json(json!({ "message": "removed from watchlist" })))
}

// endregion: --- Watchlist Handlers

// region:    --- Comment Handlers

/// 댓글 작성 요청 처리
pub async fn handle_add_comment(
    State(db_manager): State<Arc<DatabaseManager>>,
    auth: AuthUser,
    Path(listing_id): Path<i64>,
    Json(cmd): Json<AddCommentCommand>,
) -> AppResult<Json<Comment>> {
    info!(
        "{:<12} --> 댓글 작성 요청 처리: listing={}, author={}",
        "Handler", listing_id, auth.user.username
    );
    let comment = comment::add_comment(&db_manager, listing_id, auth.user.id, cmd.content).await?;
    Ok(Json(comment))
}

// endregion: --- Comment Handlers
