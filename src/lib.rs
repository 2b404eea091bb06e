pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

#[cfg(feature = "aws")]
pub use crate::adapters::OpenSearchPackageApi;

pub use crate::adapters::JsonFileStateStore;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{DeleteBehavior, PackageAssociationResource};
pub use crate::domain::model::PackageAssociation;
pub use crate::utils::error::{ApiError, AssociationError, Result};
