// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- App Error

pub type AppResult<T> = Result<T, AppError>;

/// 요청 처리 중 발생하는 애플리케이션 오류
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 입력 (빈 제목, 낮은 입찰가 등)
    #[error("{0}")]
    Validation(String),

    /// 참조된 리소스 없음
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 마감된 리스팅에 대한 쓰기 시도
    #[error("listing is no longer active")]
    InactiveListing,

    /// 이미 마감된 리스팅의 재마감 시도
    #[error("listing is already closed")]
    AlreadyClosed,

    /// 인증 실패 (잘못된 자격 증명 또는 세션 없음)
    #[error("invalid username and/or password")]
    Unauthorized,

    /// 권한 없음 (예: 판매자가 아닌 사용자의 마감 요청)
    #[error("{0}")]
    Forbidden(String),

    /// 중복 (이미 사용 중인 사용자 이름)
    #[error("{0}")]
    Conflict(String),

    /// 데이터베이스 오류
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 기타 내부 오류 (해시 생성 실패 등)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP 상태 코드 매핑
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InactiveListing => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyClosed | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 응답 바디에 실리는 오류 코드
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InactiveListing => "LISTING_CLOSED",
            Self::AlreadyClosed => "ALREADY_CLOSED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

/// 모든 오류는 요청 경계에서 `{"error": .., "code": ..}` 형태로 변환된다
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!("{:<12} --> 서버 오류: {} ({})", "Error", self, code);
        } else {
            debug!("{:<12} --> 클라이언트 오류: {} ({})", "Error", self, code);
        }

        (
            status,
            Json(json!({
                "error": self.to_string(),
                "code": code,
            })),
        )
            .into_response()
    }
}

// endregion: --- App Error

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("listing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InactiveListing.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::AlreadyClosed.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Conflict("username already taken".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InactiveListing.error_code(), "LISTING_CLOSED");
        assert_eq!(AppError::AlreadyClosed.error_code(), "ALREADY_CLOSED");
        assert_eq!(AppError::NotFound("category").to_string(), "category not found");
    }
}

// endregion: --- Tests
