pub mod catalog;
pub mod client;
pub mod errors;
pub mod types;

pub use catalog::fetch_catalog;
pub use client::ApiClient;
pub use errors::FetchError;
pub use types::{EpisodeRecord, SeasonEpisodes};
