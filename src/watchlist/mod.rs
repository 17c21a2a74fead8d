/// 관심 목록 처리 (추가/제거 모두 멱등)
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 관심 목록 추가: 이미 있으면 그대로 둔다
pub async fn add_to_watchlist(
    db_manager: &DatabaseManager,
    listing_id: i64,
    user_id: i64,
) -> AppResult<()> {
    info!(
        "{:<12} --> 관심 목록 추가: listing={}, user={}",
        "Command", listing_id, user_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM listings WHERE id = $1)")
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;
                if !exists {
                    return Err(AppError::NotFound("listing"));
                }

                sqlx::query(
                    "INSERT INTO watchlist (listing_id, user_id)
                     VALUES ($1, $2)
                     ON CONFLICT DO NOTHING",
                )
                .bind(listing_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;

                Ok(())
            })
        })
        .await
}

/// 관심 목록 제거: 없는 항목 제거는 no-op
pub async fn remove_from_watchlist(
    db_manager: &DatabaseManager,
    listing_id: i64,
    user_id: i64,
) -> AppResult<()> {
    info!(
        "{:<12} --> 관심 목록 제거: listing={}, user={}",
        "Command", listing_id, user_id
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("DELETE FROM watchlist WHERE listing_id = $1 AND user_id = $2")
                    .bind(listing_id)
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, AppError>(())
            })
        })
        .await
}

// endregion: --- Commands
