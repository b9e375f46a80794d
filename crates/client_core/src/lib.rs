//! Photo feed client: fetches the Mars photo list and publishes its progress.

pub mod error;
pub mod feed;
pub mod photo_client;

pub use error::FetchError;
pub use feed::PhotoFeed;
pub use photo_client::{HttpPhotoClient, PhotoFetchClient, DEFAULT_API_BASE_URL};
pub use shared::domain::{ApiStatus, PhotoId, PhotoRecord};
