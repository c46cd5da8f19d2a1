pub mod accounts;
pub mod feeds;
pub mod follows;

pub use accounts::AccountService;
pub use feeds::FeedService;
pub use follows::FollowService;
