use crate::bidding::model::Bid;
use crate::comment::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 리스팅 모델 (모든 금액은 최소 화폐 단위의 정수)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_price: i64,
    pub current_price: i64,
    pub photo: Option<String>,
    pub category_id: Option<i64>,
    pub is_active: bool,
    pub seller_id: i64,
    pub winning_bid_id: Option<i64>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// 카테고리 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// 목록 화면용 요약 (카테고리/판매자 이름 조인 포함)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ListingSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub current_price: i64,
    pub photo: Option<String>,
    pub category_name: Option<String>,
    pub is_active: bool,
    pub seller_username: String,
    pub created_at: DateTime<Utc>,
}

/// 리스팅 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateListingCommand {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub starting_price: i64,
    pub photo: Option<String>,
    pub category_id: Option<i64>,
}

/// 리스팅 상세 화면: 파생 플래그와 댓글 목록을 함께 싣는다.
/// 마감된 리스팅이면 최고 입찰과 정산 메시지도 노출한다.
#[derive(Serialize)]
pub struct ListingView {
    pub listing: Listing,
    pub category_name: Option<String>,
    pub is_seller: bool,
    pub is_watching: bool,
    pub comments: Vec<Comment>,
    pub highest_bid: Option<Bid>,
    pub settlement: Option<&'static str>,
}
