pub mod auth;
pub mod catalog;
pub mod embedding;
pub mod similarity;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use embedding::EmbeddingService;
pub use similarity::{SimilarityError, SimilarityHit, SimilarityQuery, SimilarityService};
