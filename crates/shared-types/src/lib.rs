pub mod error;
pub mod feature_flags;

// Lead capture domain
pub mod call;
pub mod lead;
pub mod submission;

pub use error::*;
pub use feature_flags::*;

pub use call::*;
pub use lead::*;
pub use submission::*;

/// Selectable car models in display order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CatalogResponse {
    pub car_models: Vec<String>,
}
