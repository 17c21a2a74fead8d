/// 댓글 처리 (추가 전용)
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::listing::model::Listing;
use crate::query::queries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model

/// 댓글 최대 길이
pub const MAX_COMMENT_LEN: usize = 200;

// 댓글 모델 (작성자 이름 조인 포함)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 댓글 작성 명령
#[derive(Debug, Deserialize)]
pub struct AddCommentCommand {
    pub content: String,
}

// endregion: --- Model

// region:    --- Commands

/// 댓글 작성: 활성 리스팅에만 달 수 있다
pub async fn add_comment(
    db_manager: &DatabaseManager,
    listing_id: i64,
    author_id: i64,
    content: String,
) -> AppResult<Comment> {
    info!(
        "{:<12} --> 댓글 작성 요청: listing={}, author={}",
        "Command", listing_id, author_id
    );

    validate_comment(&content)?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound("listing"))?;

                if !listing.is_active {
                    return Err(AppError::InactiveListing);
                }

                let comment_id: i64 = sqlx::query_scalar(
                    "INSERT INTO comments (listing_id, author_id, content)
                     VALUES ($1, $2, $3)
                     RETURNING id",
                )
                .bind(listing_id)
                .bind(author_id)
                .bind(&content)
                .fetch_one(&mut **tx)
                .await?;

                let comment = sqlx::query_as::<_, Comment>(queries::GET_COMMENT)
                    .bind(comment_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(comment)
            })
        })
        .await
}

/// 댓글 검증: 비어 있지 않고 200자 이하
fn validate_comment(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("comment is required".to_string()));
    }
    if content.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::Validation(format!(
            "comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

// endregion: --- Commands

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_comment() {
        assert!(validate_comment("").is_err());
        assert!(validate_comment("   ").is_err());
    }

    #[test]
    fn test_rejects_overlong_comment() {
        let long = "y".repeat(MAX_COMMENT_LEN + 1);
        assert!(validate_comment(&long).is_err());
    }

    #[test]
    fn test_accepts_comment_at_limit() {
        let content = "y".repeat(MAX_COMMENT_LEN);
        assert!(validate_comment(&content).is_ok());
        assert!(validate_comment("nice lamp").is_ok());
    }
}

// endregion: --- Tests
