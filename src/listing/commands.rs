/// 리스팅 생성 커맨드 처리
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::listing::model::{CreateListingCommand, Listing};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 제목 최대 길이
pub const MAX_TITLE_LEN: usize = 64;

/// 리스팅 생성: 시작가가 곧 현재 가격이 된다
pub async fn create_listing(
    db_manager: &DatabaseManager,
    seller_id: i64,
    cmd: CreateListingCommand,
) -> AppResult<Listing> {
    info!("{:<12} --> 리스팅 생성 요청: {:?}", "Command", cmd);

    validate_new_listing(&cmd)?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 카테고리를 지정했다면 존재 여부 확인
                if let Some(category_id) = cmd.category_id {
                    let exists: bool =
                        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                            .bind(category_id)
                            .fetch_one(&mut **tx)
                            .await?;
                    if !exists {
                        return Err(AppError::NotFound("category"));
                    }
                }

                let listing = sqlx::query_as::<_, Listing>(
                    "INSERT INTO listings (title, description, starting_price, current_price, photo, category_id, seller_id)
                     VALUES ($1, $2, $3, $3, $4, $5, $6)
                     RETURNING id, title, description, starting_price, current_price, photo, category_id, is_active, seller_id, winning_bid_id, closed_at, created_at",
                )
                .bind(cmd.title.trim())
                .bind(&cmd.description)
                .bind(cmd.starting_price)
                .bind(&cmd.photo)
                .bind(cmd.category_id)
                .bind(seller_id)
                .fetch_one(&mut **tx)
                .await?;

                Ok(listing)
            })
        })
        .await
}

/// 리스팅 입력 검증
fn validate_new_listing(cmd: &CreateListingCommand) -> AppResult<()> {
    let title = cmd.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if cmd.starting_price <= 0 {
        return Err(AppError::Validation(
            "starting price must be positive".to_string(),
        ));
    }
    Ok(())
}

// endregion: --- Commands

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(title: &str, starting_price: i64) -> CreateListingCommand {
        CreateListingCommand {
            title: title.to_string(),
            description: String::new(),
            starting_price,
            photo: None,
            category_id: None,
        }
    }

    #[test]
    fn test_rejects_empty_title() {
        let err = validate_new_listing(&cmd("  ", 1000)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_overlong_title() {
        let long_title = "x".repeat(MAX_TITLE_LEN + 1);
        let err = validate_new_listing(&cmd(&long_title, 1000)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_accepts_title_at_limit() {
        let title = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_new_listing(&cmd(&title, 1000)).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_starting_price() {
        assert!(validate_new_listing(&cmd("Lamp", 0)).is_err());
        assert!(validate_new_listing(&cmd("Lamp", -500)).is_err());
        assert!(validate_new_listing(&cmd("Lamp", 1)).is_ok());
    }
}

// endregion: --- Tests
