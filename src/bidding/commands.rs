/// 입찰 커맨드 처리
// region:    --- Imports
use crate::bidding::model::Bid;
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::listing::model::Listing;
use crate::query::queries;
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 입찰 처리.
/// 현재 가격의 읽기-비교-쓰기는 단일 트랜잭션 안의 조건부 UPDATE로 수행한다.
/// 같은 가격을 읽은 두 입찰 중 하나만 조건부 갱신을 통과할 수 있다.
pub async fn place_bid(
    db_manager: &DatabaseManager,
    listing_id: i64,
    bidder_id: i64,
    amount: i64,
) -> AppResult<Bid> {
    info!(
        "{:<12} --> 입찰 요청: listing={}, bidder={}, amount={}",
        "Command", listing_id, bidder_id, amount
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("listing"))?;

                // 읽은 스냅샷에 대한 선행 검증
                validate_bid(&listing, amount)?;

                // 수락 여부는 조건부 갱신이 결정한다
                let updated = sqlx::query(
                    "UPDATE listings SET current_price = $1
                     WHERE id = $2 AND is_active AND current_price < $1",
                )
                .bind(amount)
                .bind(listing_id)
                .execute(&mut **tx)
                .await?;

                if updated.rows_affected() == 0 {
                    return Err(AppError::Validation(
                        "bid must exceed the current price".to_string(),
                    ));
                }

                let bid = sqlx::query_as::<_, Bid>(
                    "INSERT INTO bids (listing_id, bidder_id, amount)
                     VALUES ($1, $2, $3)
                     RETURNING id, listing_id, bidder_id, amount, placed_at",
                )
                .bind(listing_id)
                .bind(bidder_id)
                .bind(amount)
                .fetch_one(&mut **tx)
                .await?;

                info!(
                    "{:<12} --> 입찰 수락: listing={}, 현재 가격 {}",
                    "Command", listing_id, amount
                );
                Ok(bid)
            })
        })
        .await
}

/// 입찰 검증: 마감 여부와 금액(현재 가격 초과, 엄격한 부등호)
fn validate_bid(listing: &Listing, amount: i64) -> AppResult<()> {
    if !listing.is_active {
        return Err(AppError::InactiveListing);
    }
    if amount <= listing.current_price {
        return Err(AppError::Validation(format!(
            "bid must exceed the current price of {}",
            listing.current_price
        )));
    }
    Ok(())
}

// endregion: --- Commands

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(current_price: i64, is_active: bool) -> Listing {
        Listing {
            id: 1,
            title: "Lamp".to_string(),
            description: String::new(),
            starting_price: 1000,
            current_price,
            photo: None,
            category_id: None,
            is_active,
            seller_id: 1,
            winning_bid_id: None,
            closed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rejects_bid_at_current_price() {
        let err = validate_bid(&listing(1200, true), 1200).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_bid_below_current_price() {
        let err = validate_bid(&listing(1200, true), 1100).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_accepts_bid_above_current_price() {
        assert!(validate_bid(&listing(1200, true), 1201).is_ok());
    }

    #[test]
    fn test_rejects_bid_on_inactive_listing() {
        let err = validate_bid(&listing(1200, false), 5000).unwrap_err();
        assert!(matches!(err, AppError::InactiveListing));
    }
}

// endregion: --- Tests
