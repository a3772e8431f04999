//! oncodex-civic — CIViC knowledgebase access.
//!
//! Typed GraphQL response model, query documents, the GraphQL client,
//! variant notation normalisation, and the Markdown converter.

pub mod client;
pub mod markdown;
pub mod normalise;
pub mod queries;
pub mod types;

pub use client::CivicClient;
pub use markdown::to_markdown;
pub use normalise::VariantNormaliser;
pub use types::{CivicQueryResponse, VariantInfo};
