// Adapters layer: concrete implementations for external systems (search service API, state storage).

pub mod opensearch;
pub mod state_file;

#[cfg(feature = "aws")]
pub use opensearch::OpenSearchPackageApi;
pub use state_file::JsonFileStateStore;
