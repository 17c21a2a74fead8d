pub mod auth;
pub mod bidding;
pub mod closing;
pub mod comment;
pub mod database;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod query;
pub mod watchlist;
