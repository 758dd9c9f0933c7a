pub mod cli;
pub mod download;
pub mod error;
pub mod extract;
pub mod progress;
pub mod repository;

pub use error::HubzipError;
pub use repository::RepositoryRef;
