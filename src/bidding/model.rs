use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델 (추가 전용: 수정/삭제되지 않는다)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
    pub placed_at: DateTime<Utc>,
}

/// 입찰 명령 (리스팅은 경로, 입찰자는 세션에서 온다)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub amount: i64,
}
