use auction_house::closing::{MSG_NO_BIDS, MSG_SOLD};
use auction_house::database::DatabaseManager;
use auction_house::query;
use axum::http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

/// 트레이싱 초기화
fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 데이터베이스 매니저 설정
async fn setup() -> Arc<DatabaseManager> {
    Arc::new(DatabaseManager::new().await)
}

/// 테스트용 사용자 등록 (고유한 사용자 이름으로)
async fn register_user(client: &Client, prefix: &str) -> (String, i64) {
    let username = format!("{}-{}", prefix, Uuid::new_v4());
    let response = client
        .post(format!("{BASE_URL}/register"))
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2",
            "confirmation": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_i64().unwrap(),
    )
}

/// 테스트용 리스팅 생성
async fn create_listing(client: &Client, token: &str, title: &str, starting_price: i64) -> i64 {
    let response = client
        .post(format!("{BASE_URL}/new_listing"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({
            "title": title,
            "description": "integration test listing",
            "starting_price": starting_price
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

/// 입찰 요청 전송
async fn send_bid(client: &Client, token: &str, listing_id: i64, amount: i64) -> reqwest::Response {
    client
        .post(format!("{BASE_URL}/listing/{listing_id}/bid"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "amount": amount }))
        .send()
        .await
        .expect("Failed to send request")
}

/// 중복 사용자 이름 등록 테스트
#[tokio::test]
async fn test_register_duplicate_username_conflict() {
    let client = Client::new();
    let username = format!("alice-{}", Uuid::new_v4());

    let payload = json!({
        "username": username,
        "email": "alice@example.com",
        "password": "hunter2",
        "confirmation": "hunter2"
    });

    let first = client
        .post(format!("{BASE_URL}/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(first.status().is_success());

    // 같은 사용자 이름으로 재등록
    let second = client
        .post(format!("{BASE_URL}/register"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), StatusCode::CONFLICT.as_u16());
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["code"], "CONFLICT");
}

/// 비밀번호 확인 불일치 테스트
#[tokio::test]
async fn test_register_password_mismatch() {
    let client = Client::new();
    let response = client
        .post(format!("{BASE_URL}/register"))
        .json(&json!({
            "username": format!("bob-{}", Uuid::new_v4()),
            "email": "bob@example.com",
            "password": "hunter2",
            "confirmation": "hunter3"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION");
}

/// 로그인 실패 테스트
#[tokio::test]
async fn test_login_bad_credentials() {
    let client = Client::new();
    let response = client
        .post(format!("{BASE_URL}/login"))
        .json(&json!({
            "username": format!("ghost-{}", Uuid::new_v4()),
            "password": "whatever"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.status().as_u16(),
        StatusCode::UNAUTHORIZED.as_u16()
    );
}

/// 경매 전체 사이클 테스트: 생성 → 입찰 → 낮은 입찰 거부 → 마감 → 소유권 이전
#[tokio::test]
async fn test_listing_bidding_lifecycle() {
    let db_manager = setup().await;
    let client = Client::new();

    let (seller_token, seller_id) = register_user(&client, "seller").await;
    let (bidder1_token, _bidder1_id) = register_user(&client, "bidder1").await;
    let (bidder2_token, bidder2_id) = register_user(&client, "bidder2").await;

    // 시작가 10.00
    let listing_id = create_listing(&client, &seller_token, "Antique Lamp", 1000).await;

    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert!(listing.is_active);
    assert_eq!(listing.seller_id, seller_id);
    assert_eq!(listing.current_price, 1000);

    // 입찰 12.00 수락
    let response = send_bid(&client, &bidder1_token, listing_id, 1200).await;
    assert!(response.status().is_success());
    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, 1200);

    // 입찰 11.00 거부 (현재 가격 이하)
    let response = send_bid(&client, &bidder2_token, listing_id, 1100).await;
    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION");
    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, 1200);

    // 입찰 15.00 수락
    let response = send_bid(&client, &bidder2_token, listing_id, 1500).await;
    assert!(response.status().is_success());
    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, 1500);

    // 판매자가 아닌 사용자는 마감할 수 없다
    let response = client
        .post(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .header("Authorization", format!("Bearer {bidder1_token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), StatusCode::FORBIDDEN.as_u16());

    // 판매자가 마감: 최고 입찰자에게 낙찰
    let response = client
        .post(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .header("Authorization", format!("Bearer {seller_token}"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let settlement: Value = response.json().await.unwrap();
    assert_eq!(settlement["message"], MSG_SOLD);
    assert_eq!(settlement["winning_bid"]["amount"], 1500);
    assert_eq!(settlement["listing"]["seller_id"], bidder2_id);
    assert_eq!(settlement["listing"]["is_active"], false);

    // 이중 마감은 거부된다 (새 소유자인 bidder2가 시도해도)
    let response = client
        .post(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .header("Authorization", format!("Bearer {bidder2_token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), StatusCode::CONFLICT.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "ALREADY_CLOSED");

    // 마감된 리스팅에는 입찰할 수 없다
    let response = send_bid(&client, &bidder1_token, listing_id, 9900).await;
    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "LISTING_CLOSED");

    // 상세 화면에 정산 메시지가 노출된다
    let view: Value = client
        .get(format!("{BASE_URL}/listing/{listing_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["settlement"], MSG_SOLD);
    assert_eq!(view["highest_bid"]["amount"], 1500);
}

/// 없는 카테고리로 리스팅 생성 테스트
#[tokio::test]
async fn test_create_listing_unknown_category() {
    let client = Client::new();

    let (seller_token, _) = register_user(&client, "seller").await;

    let response = client
        .post(format!("{BASE_URL}/new_listing"))
        .header("Authorization", format!("Bearer {seller_token}"))
        .json(&json!({
            "title": "Mystery Box",
            "description": "no such category",
            "starting_price": 1000,
            "category_id": 999999999
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), StatusCode::NOT_FOUND.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

/// 아직 활성인 리스팅의 정산 조회 테스트
#[tokio::test]
async fn test_settlement_of_active_listing_rejected() {
    let client = Client::new();

    let (seller_token, _) = register_user(&client, "seller").await;
    let listing_id = create_listing(&client, &seller_token, "Still Going", 1000).await;

    let response = client
        .get(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION");
}

/// 입찰 없이 마감 테스트: 소유자 불변
#[tokio::test]
async fn test_close_without_bids() {
    let db_manager = setup().await;
    let client = Client::new();

    let (seller_token, seller_id) = register_user(&client, "seller").await;
    let listing_id = create_listing(&client, &seller_token, "Unloved Chair", 1000).await;

    let response = client
        .post(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .header("Authorization", format!("Bearer {seller_token}"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let settlement: Value = response.json().await.unwrap();
    assert_eq!(settlement["message"], MSG_NO_BIDS);
    assert!(settlement["winning_bid"].is_null());

    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert!(!listing.is_active);
    assert_eq!(listing.seller_id, seller_id);
    assert_eq!(listing.current_price, 1000);

    // 정산 조회도 같은 결과를 내놓는다
    let settlement: Value = client
        .get(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settlement["message"], MSG_NO_BIDS);
}

/// 관심 목록 멱등성 테스트
#[tokio::test]
async fn test_watchlist_idempotent() {
    let client = Client::new();

    let (seller_token, _) = register_user(&client, "seller").await;
    let (watcher_token, _) = register_user(&client, "watcher").await;
    let listing_id = create_listing(&client, &seller_token, "Shiny Teapot", 500).await;

    // 두 번 추가해도 하나만 남는다
    for _ in 0..2 {
        let response = client
            .post(format!("{BASE_URL}/add_to_watchlist/{listing_id}"))
            .header("Authorization", format!("Bearer {watcher_token}"))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let watched: Value = client
        .get(format!("{BASE_URL}/watchlist"))
        .header("Authorization", format!("Bearer {watcher_token}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let matching = watched
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["id"].as_i64() == Some(listing_id))
        .count();
    assert_eq!(matching, 1);

    // 두 번 제거해도 오류 없이 빈 상태
    for _ in 0..2 {
        let response = client
            .post(format!("{BASE_URL}/remove_from_watchlist/{listing_id}"))
            .header("Authorization", format!("Bearer {watcher_token}"))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let watched: Value = client
        .get(format!("{BASE_URL}/watchlist"))
        .header("Authorization", format!("Bearer {watcher_token}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(watched
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["id"].as_i64() != Some(listing_id)));

    // 없는 리스팅 추가는 404
    let response = client
        .post(format!("{BASE_URL}/add_to_watchlist/999999999"))
        .header("Authorization", format!("Bearer {watcher_token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), StatusCode::NOT_FOUND.as_u16());
}

/// 댓글 작성 순서 테스트
#[tokio::test]
async fn test_comments_in_submission_order() {
    let client = Client::new();

    let (seller_token, _) = register_user(&client, "seller").await;
    let (commenter_token, _) = register_user(&client, "commenter").await;
    let listing_id = create_listing(&client, &seller_token, "Old Globe", 800).await;

    for content in ["first!", "second thoughts"] {
        let response = client
            .post(format!("{BASE_URL}/listing/{listing_id}/comment"))
            .header("Authorization", format!("Bearer {commenter_token}"))
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let view: Value = client
        .get(format!("{BASE_URL}/listing/{listing_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let comments = view["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first!");
    assert_eq!(comments[1]["content"], "second thoughts");

    // 빈 댓글은 거부된다
    let response = client
        .post(format!("{BASE_URL}/listing/{listing_id}/comment"))
        .header("Authorization", format!("Bearer {commenter_token}"))
        .json(&json!({ "content": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());

    // 마감된 리스팅에는 댓글을 달 수 없다
    let response = client
        .post(format!("{BASE_URL}/closed_listing/{listing_id}"))
        .header("Authorization", format!("Bearer {seller_token}"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .post(format!("{BASE_URL}/listing/{listing_id}/comment"))
        .header("Authorization", format!("Bearer {commenter_token}"))
        .json(&json!({ "content": "too late" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "LISTING_CLOSED");
}

/// 동시성 입찰 테스트: 같은 가격을 읽은 두 입찰이 모두 수락되는 일이 없어야 한다
#[tokio::test]
async fn test_concurrent_bidding() {
    init_tracing();

    let db_manager = setup().await;
    let client = Client::new();

    let (seller_token, _) = register_user(&client, "seller").await;
    let (bidder_token, _) = register_user(&client, "racer").await;
    let listing_id = create_listing(&client, &seller_token, "Hot Item", 1000).await;

    // 50개의 동시 입찰 생성
    let mut handles = vec![];
    for i in 1..=50i64 {
        let token = bidder_token.clone();
        let amount = 1000 + i * 100;

        let handle = tokio::spawn(async move {
            let client = Client::new();
            let response = client
                .post(format!("{BASE_URL}/listing/{listing_id}/bid"))
                .header("Authorization", format!("Bearer {token}"))
                .json(&json!({ "amount": amount }))
                .send()
                .await
                .unwrap();
            (response.status(), amount)
        });
        handles.push(handle);
    }

    let mut accepted = vec![];
    for handle in handles {
        let (status, amount) = handle.await.unwrap();
        if status.is_success() {
            accepted.push(amount);
        }
    }

    info!("수락된 입찰 수: {}", accepted.len());
    assert!(!accepted.is_empty());

    // 최고 입찰(6000)은 어떤 가격보다 높으므로 반드시 수락된다
    let max_accepted = *accepted.iter().max().unwrap();
    assert_eq!(max_accepted, 6000);

    // 최종 가격은 수락된 입찰의 최대 금액과 같아야 한다
    let listing = query::handlers::get_listing(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(listing.current_price, max_accepted);

    // 입찰 이력과 수락 응답이 일치해야 한다
    let history = query::handlers::get_bid_history(&db_manager, listing_id)
        .await
        .unwrap();
    assert_eq!(history.len(), accepted.len());
    let max_in_history = history.iter().map(|b| b.amount).max().unwrap();
    assert_eq!(max_in_history, listing.current_price);
}
