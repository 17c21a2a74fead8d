/// 인증 관련 커맨드 처리
/// 1. 회원가입
/// 2. 로그인
/// 3. 로그아웃
// region:    --- Imports
use crate::auth::model::{LoginCommand, RegisterCommand, SessionResponse, User};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use crate::query;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Commands

/// 1. 회원가입: 사용자 생성 후 바로 세션을 연다
pub async fn register(db_manager: &DatabaseManager, cmd: RegisterCommand) -> AppResult<SessionResponse> {
    info!("{:<12} --> 회원가입 요청: {}", "Auth", cmd.username);

    validate_registration(&cmd)?;

    let password_hash = hash_password(&cmd.password)?;
    let username = cmd.username.trim().to_string();
    let email = cmd.email.trim().to_string();

    let user = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let inserted = sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email, password_hash)
                     VALUES ($1, $2, $3)
                     RETURNING id, username, email, password_hash, created_at",
                )
                .bind(&username)
                .bind(&email)
                .bind(&password_hash)
                .fetch_one(&mut **tx)
                .await;

                match inserted {
                    Ok(user) => Ok(user),
                    Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                        Err(AppError::Conflict("username already taken".to_string()))
                    }
                    Err(e) => Err(AppError::Database(e)),
                }
            })
        })
        .await?;

    open_session(db_manager, user).await
}

/// 2. 로그인: 자격 증명 검증 후 세션을 연다
pub async fn login(db_manager: &DatabaseManager, cmd: LoginCommand) -> AppResult<SessionResponse> {
    info!("{:<12} --> 로그인 요청: {}", "Auth", cmd.username);

    let user = query::handlers::get_user_by_username(db_manager, &cmd.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&cmd.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    open_session(db_manager, user).await
}

/// 3. 로그아웃: 제시된 세션을 삭제한다
pub async fn logout(db_manager: &DatabaseManager, token: Uuid) -> AppResult<()> {
    info!("{:<12} --> 로그아웃 요청", "Auth");

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("DELETE FROM sessions WHERE token = $1")
                    .bind(token)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, AppError>(())
            })
        })
        .await
}

/// 세션 생성
async fn open_session(db_manager: &DatabaseManager, user: User) -> AppResult<SessionResponse> {
    let token = Uuid::new_v4();
    let user_id = user.id;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
                    .bind(token)
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, AppError>(())
            })
        })
        .await?;

    Ok(SessionResponse { token, user })
}

// endregion: --- Commands

// region:    --- Validation & Password Helpers

/// 회원가입 입력 검증
fn validate_registration(cmd: &RegisterCommand) -> AppResult<()> {
    if cmd.username.trim().is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if cmd.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }
    if cmd.password != cmd.confirmation {
        return Err(AppError::Validation("passwords must match".to_string()));
    }
    Ok(())
}

/// 비밀번호 해시 생성 (argon2, PHC 문자열 포맷)
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

/// 비밀번호 검증
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

// endregion: --- Validation & Password Helpers

// region:    --- Tests


// endregion: --- Tests
