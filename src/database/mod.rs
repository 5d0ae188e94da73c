pub mod error;
pub mod repo;
pub mod schema;

pub use error::StoreError;
pub use repo::ArtifactStore;
