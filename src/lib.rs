pub mod asset;
pub mod chat;
pub mod constants;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod keywords;

pub use asset::{AssetBook, AssetRecord};
pub use chat::ChatSession;
pub use engine::recommend;
pub use error::FetchError;
pub use fetcher::{MarketClient, RefreshReport};
