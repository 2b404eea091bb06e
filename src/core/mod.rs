pub mod resource;

pub use crate::domain::model::{PackageAssociation, PackageDetails};
pub use crate::domain::ports::{PackageApi, StateStore};
pub use crate::utils::error::Result;
pub use resource::{DeleteBehavior, PackageAssociationResource};
