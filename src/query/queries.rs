/// 활성 리스팅 목록 조회 (카테고리/판매자 이름 포함)
pub const GET_ACTIVE_LISTINGS: &str = r#"
    SELECT l.id, l.title, l.description, l.current_price, l.photo,
           c.name AS category_name, l.is_active, u.username AS seller_username, l.created_at
    FROM listings l
    LEFT JOIN categories c ON c.id = l.category_id
    JOIN users u ON u.id = l.seller_id
    WHERE l.is_active
    ORDER BY l.created_at DESC
"#;

/// 리스팅 조회
pub const GET_LISTING: &str = "SELECT id, title, description, starting_price, current_price, photo, category_id, is_active, seller_id, winning_bid_id, closed_at, created_at FROM listings WHERE id = $1";

/// 판매자별 리스팅 조회
pub const GET_LISTINGS_BY_SELLER: &str = r#"
    SELECT l.id, l.title, l.description, l.current_price, l.photo,
           c.name AS category_name, l.is_active, u.username AS seller_username, l.created_at
    FROM listings l
    LEFT JOIN categories c ON c.id = l.category_id
    JOIN users u ON u.id = l.seller_id
    WHERE l.seller_id = $1
    ORDER BY l.created_at DESC
"#;

/// 카테고리 목록 조회
pub const GET_CATEGORIES: &str = "SELECT id, name FROM categories ORDER BY name";

/// 카테고리 이름 조회
pub const GET_CATEGORY_NAME: &str = "SELECT name FROM categories WHERE id = $1";

/// 리스팅 댓글 조회 (작성 순)
pub const GET_COMMENTS_FOR_LISTING: &str = r#"
    SELECT cm.id, cm.listing_id, cm.author_id, u.username AS author_username, cm.content, cm.created_at
    FROM comments cm
    JOIN users u ON u.id = cm.author_id
    WHERE cm.listing_id = $1
    ORDER BY cm.created_at ASC, cm.id ASC
"#;

/// 댓글 단건 조회
pub const GET_COMMENT: &str = r#"
    SELECT cm.id, cm.listing_id, cm.author_id, u.username AS author_username, cm.content, cm.created_at
    FROM comments cm
    JOIN users u ON u.id = cm.author_id
    WHERE cm.id = $1
"#;

/// 최고 입찰 조회 (같은 금액이면 먼저 들어온 입찰 우선)
pub const GET_TOP_BID: &str = r#"
    SELECT id, listing_id, bidder_id, amount, placed_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY amount DESC, placed_at ASC, id ASC
    LIMIT 1
"#;

/// 입찰 단건 조회
pub const GET_BID: &str =
    "SELECT id, listing_id, bidder_id, amount, placed_at FROM bids WHERE id = $1";

/// 입찰 이력 조회 (최근 순)
pub const GET_BID_HISTORY: &str = r#"
    SELECT id, listing_id, bidder_id, amount, placed_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY placed_at DESC, id DESC
"#;

/// 관심 목록 포함 여부 조회
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE listing_id = $1 AND user_id = $2)";

/// 관심 목록 조회 (활성 리스팅만)
pub const GET_WATCHED_ACTIVE: &str = r#"
    SELECT l.id, l.title, l.description, l.current_price, l.photo,
           c.name AS category_name, l.is_active, u.username AS seller_username, l.created_at
    FROM listings l
    JOIN watchlist w ON w.listing_id = l.id
    LEFT JOIN categories c ON c.id = l.category_id
    JOIN users u ON u.id = l.seller_id
    WHERE w.user_id = $1 AND l.is_active
    ORDER BY w.added_at DESC
"#;

/// 관심 목록 조회 (전체)
pub const GET_WATCHED_ALL: &str = r#"
    SELECT l.id, l.title, l.description, l.current_price, l.photo,
           c.name AS category_name, l.is_active, u.username AS seller_username, l.created_at
    FROM listings l
    JOIN watchlist w ON w.listing_id = l.id
    LEFT JOIN categories c ON c.id = l.category_id
    JOIN users u ON u.id = l.seller_id
    WHERE w.user_id = $1
    ORDER BY w.added_at DESC
"#;

/// 세션 토큰으로 사용자 조회
pub const GET_SESSION_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.created_at
    FROM sessions s
    JOIN users u ON u.id = s.user_id
    WHERE s.token = $1
"#;

/// 사용자 이름으로 조회
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";
