/// Bearer 세션 토큰 기반 요청 인증 추출기
// region:    --- Imports
use crate::auth::model::User;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::query;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Extractors

/// 인증 필수 요청의 현재 사용자
pub struct AuthUser {
    pub user: User,
    pub token: Uuid,
}

/// 인증 선택 요청의 현재 사용자 (세션이 없으면 None)
pub struct MaybeAuthUser(pub Option<User>);

/// `Authorization: Bearer <uuid>` 헤더 값 파싱
fn parse_bearer(value: &str) -> Option<Uuid> {
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    parse_bearer(value)
}

#[async_trait]
impl FromRequestParts<Arc<DatabaseManager>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<DatabaseManager>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user = query::handlers::get_session_user(state, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { user, token })
    }
}

#[async_trait]
impl FromRequestParts<Arc<DatabaseManager>> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<DatabaseManager>,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            None => Ok(MaybeAuthUser(None)),
            Some(token) => Ok(MaybeAuthUser(
                query::handlers::get_session_user(state, token).await?,
            )),
        }
    }
}

// endregion: --- Extractors

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_valid_token() {
        let token = Uuid::new_v4();
        let parsed = parse_bearer(&format!("Bearer {token}"));
        assert_eq!(parsed, Some(token));
    }

    #[test]
    fn test_parse_bearer_rejects_missing_scheme() {
        assert_eq!(parse_bearer("c0ffee"), None);
        assert_eq!(parse_bearer("Basic dXNlcjpwdw=="), None);
    }

    #[test]
    fn test_parse_bearer_rejects_malformed_uuid() {
        assert_eq!(parse_bearer("Bearer not-a-uuid"), None);
    }
}

// endregion: --- Tests
