pub mod feed_follows;
pub mod feeds;
pub mod health;
pub mod users;
