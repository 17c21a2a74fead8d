// region:    --- Imports
use super::queries;
use crate::auth::model::User;
use crate::bidding::model::Bid;
use crate::closing;
use crate::comment::Comment;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::listing::model::{Category, Listing, ListingSummary, ListingView};
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Query Handlers

/// 활성 리스팅 목록 조회
pub async fn get_active_listings(db_manager: &DatabaseManager) -> AppResult<Vec<ListingSummary>> {
    info!("{:<12} --> 활성 리스팅 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, ListingSummary>(queries::GET_ACTIVE_LISTINGS)
                    .fetch_all(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 리스팅 조회
pub async fn get_listing(db_manager: &DatabaseManager, listing_id: i64) -> AppResult<Listing> {
    info!("{:<12} --> 리스팅 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("listing"))
            })
        })
        .await
}

/// 리스팅 상세 화면 조회: 파생 플래그와 댓글을 조립한다.
/// 마감된 리스팅이면 최고 입찰과 정산 메시지를 함께 싣는다.
pub async fn get_listing_view(
    db_manager: &DatabaseManager,
    listing_id: i64,
    viewer: Option<&User>,
) -> AppResult<ListingView> {
    info!("{:<12} --> 리스팅 상세 조회 id: {}", "Query", listing_id);

    let listing = get_listing(db_manager, listing_id).await?;

    let category_name = match listing.category_id {
        Some(category_id) => get_category_name(db_manager, category_id).await?,
        None => None,
    };

    let comments = get_comments(db_manager, listing_id).await?;

    let is_seller = viewer.map_or(false, |u| u.id == listing.seller_id);
    let is_watching = match viewer {
        Some(u) => is_on_watchlist(db_manager, listing_id, u.id).await?,
        None => false,
    };

    let (highest_bid, settlement) = if listing.is_active {
        (None, None)
    } else {
        let bid = match listing.winning_bid_id {
            Some(bid_id) => get_bid(db_manager, bid_id).await?,
            None => get_top_bid(db_manager, listing_id).await?,
        };
        let message = closing::settlement_message(bid.as_ref());
        (bid, Some(message))
    };

    Ok(ListingView {
        listing,
        category_name,
        is_seller,
        is_watching,
        comments,
        highest_bid,
        settlement,
    })
}

/// 판매자별 리스팅 조회 (낙찰로 넘어온 리스팅 포함)
pub async fn get_listings_by_seller(
    db_manager: &DatabaseManager,
    seller_id: i64,
) -> AppResult<Vec<ListingSummary>> {
    info!("{:<12} --> 판매자 리스팅 조회 id: {}", "Query", seller_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(
                    sqlx::query_as::<_, ListingSummary>(queries::GET_LISTINGS_BY_SELLER)
                        .bind(seller_id)
                        .fetch_all(&mut **tx)
                        .await?,
                )
            })
        })
        .await
}

/// 카테고리 목록 조회
pub async fn list_categories(db_manager: &DatabaseManager) -> AppResult<Vec<Category>> {
    info!("{:<12} --> 카테고리 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, Category>(queries::GET_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 카테고리 이름 조회
async fn get_category_name(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> AppResult<Option<String>> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_scalar(queries::GET_CATEGORY_NAME)
                    .bind(category_id)
                    .fetch_optional(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 리스팅 댓글 조회 (작성 순)
pub async fn get_comments(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> AppResult<Vec<Comment>> {
    info!("{:<12} --> 댓글 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(
                    sqlx::query_as::<_, Comment>(queries::GET_COMMENTS_FOR_LISTING)
                        .bind(listing_id)
                        .fetch_all(&mut **tx)
                        .await?,
                )
            })
        })
        .await
}

/// 최고 입찰 조회
pub async fn get_top_bid(db_manager: &DatabaseManager, listing_id: i64) -> AppResult<Option<Bid>> {
    info!("{:<12} --> 최고 입찰 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, Bid>(queries::GET_TOP_BID)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 입찰 단건 조회
pub async fn get_bid(db_manager: &DatabaseManager, bid_id: i64) -> AppResult<Option<Bid>> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, Bid>(queries::GET_BID)
                    .bind(bid_id)
                    .fetch_optional(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 입찰 이력 조회 (최근 순)
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> AppResult<Vec<Bid>> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 관심 목록 포함 여부 조회
pub async fn is_on_watchlist(
    db_manager: &DatabaseManager,
    listing_id: i64,
    user_id: i64,
) -> AppResult<bool> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_scalar(queries::IS_WATCHING)
                    .bind(listing_id)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 관심 목록 조회 (기본: 활성 리스팅만)
pub async fn get_watched_listings(
    db_manager: &DatabaseManager,
    user_id: i64,
    active_only: bool,
) -> AppResult<Vec<ListingSummary>> {
    info!(
        "{:<12} --> 관심 목록 조회 user: {}, active_only: {}",
        "Query", user_id, active_only
    );
    let query = if active_only {
        queries::GET_WATCHED_ACTIVE
    } else {
        queries::GET_WATCHED_ALL
    };
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, ListingSummary>(query)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 세션 토큰으로 사용자 조회
pub async fn get_session_user(
    db_manager: &DatabaseManager,
    token: Uuid,
) -> AppResult<Option<User>> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, User>(queries::GET_SESSION_USER)
                    .bind(token)
                    .fetch_optional(&mut **tx)
                    .await?)
            })
        })
        .await
}

/// 사용자 이름으로 조회
pub async fn get_user_by_username(
    db_manager: &DatabaseManager,
    username: &str,
) -> AppResult<Option<User>> {
    let username = username.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
                    .bind(&username)
                    .fetch_optional(&mut **tx)
                    .await?)
            })
        })
        .await
}

// endregion: --- Query Handlers
