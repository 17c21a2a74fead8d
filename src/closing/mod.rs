/// 리스팅 마감 및 정산 처리
// region:    --- Imports
use crate::bidding::model::Bid;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::listing::model::Listing;
use crate::query::{self, queries};
use serde::Serialize;
use tracing::info;

// endregion: --- Imports

// region:    --- Settlement

pub const MSG_SOLD: &str = "sold to highest bidder";
pub const MSG_NO_BIDS: &str = "closed by seller, no bids";

/// 정산 결과: 마감 시점의 리스팅과 낙찰 입찰(있다면)
#[derive(Serialize)]
pub struct Settlement {
    pub listing: Listing,
    pub winning_bid: Option<Bid>,
    pub message: &'static str,
}

pub fn settlement_message(winning_bid: Option<&Bid>) -> &'static str {
    if winning_bid.is_some() {
        MSG_SOLD
    } else {
        MSG_NO_BIDS
    }
}

// endregion: --- Settlement

// region:    --- Commands

/// 리스팅 마감.
/// 판매자 본인만 마감할 수 있고, is_active 전이는 단방향이다.
/// 낙찰 입찰이 있으면 소유권을 최고 입찰자에게 이전한다.
pub async fn close_listing(
    db_manager: &DatabaseManager,
    listing_id: i64,
    actor_id: i64,
) -> AppResult<Settlement> {
    info!(
        "{:<12} --> 리스팅 마감 요청: listing={}, actor={}",
        "Command", listing_id, actor_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("listing"))?;

                if listing.seller_id != actor_id {
                    return Err(AppError::Forbidden(
                        "only the seller may close this listing".to_string(),
                    ));
                }

                // 단방향 전이: 조건부 갱신이 이중 마감을 걸러낸다
                let closed = sqlx::query(
                    "UPDATE listings SET is_active = FALSE, closed_at = now()
                     WHERE id = $1 AND is_active",
                )
                .bind(listing_id)
                .execute(&mut **tx)
                .await?;

                if closed.rows_affected() == 0 {
                    return Err(AppError::AlreadyClosed);
                }

                // 최고 입찰 선택: 금액 내림차순, 같은 금액이면 먼저 들어온 입찰이 낙찰
                let winning_bid = sqlx::query_as::<_, Bid>(queries::GET_TOP_BID)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                if let Some(bid) = &winning_bid {
                    // 낙찰: 소유권을 최고 입찰자에게 이전
                    sqlx::query(
                        "UPDATE listings SET seller_id = $1, winning_bid_id = $2 WHERE id = $3",
                    )
                    .bind(bid.bidder_id)
                    .bind(bid.id)
                    .bind(listing_id)
                    .execute(&mut **tx)
                    .await?;
                }

                let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await?;

                let message = settlement_message(winning_bid.as_ref());
                info!(
                    "{:<12} --> 리스팅 마감 완료: listing={}, {}",
                    "Command", listing_id, message
                );

                Ok(Settlement {
                    listing,
                    winning_bid,
                    message,
                })
            })
        })
        .await
}

/// 마감된 리스팅의 정산 조회
pub async fn get_settlement(db_manager: &DatabaseManager, listing_id: i64) -> AppResult<Settlement> {
    info!("{:<12} --> 정산 조회: listing={}", "Query", listing_id);

    let listing = query::handlers::get_listing(db_manager, listing_id).await?;
    if listing.is_active {
        return Err(AppError::Validation("listing is still active".to_string()));
    }

    let winning_bid = match listing.winning_bid_id {
        Some(bid_id) => query::handlers::get_bid(db_manager, bid_id).await?,
        None => None,
    };

    Ok(Settlement {
        message: settlement_message(winning_bid.as_ref()),
        listing,
        winning_bid,
    })
}

// endregion: --- Commands

// region:    --- Tests


// endregion: --- Tests
