//! CIViC GraphQL API client.
//!
//! Endpoint: https://civicdb.org/api/graphql
//!
//! The endpoint is passed in at construction; there are no ambient
//! environment lookups here. GraphQL-level errors are surfaced with the
//! upstream message intact so the boundary layer can relay it verbatim.

use oncodex_common::{OncodexError, Result, SandboxClient};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::queries::{
    GET_VARIANT_DETAILS_QUERY, SEARCH_GENE_BY_NAME_QUERY, SEARCH_VARIANTS_QUERY,
};
use crate::types::CivicQueryResponse;

pub const DEFAULT_GRAPHQL_URL: &str = "https://civicdb.org/api/graphql";

#[derive(Debug, Clone)]
pub struct CivicClient {
    endpoint: String,
    client: SandboxClient,
}

#[derive(Deserialize)]
struct GraphQlEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl CivicClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: SandboxClient::new()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL document with variables and deserialise `data`.
    pub async fn query<T: DeserializeOwned>(&self, document: &str, variables: Value) -> Result<T> {
        let resp = self
            .client
            .post(&self.endpoint)?
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OncodexError::Upstream(format!(
                "CIViC returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let envelope: GraphQlEnvelope<T> = resp.json().await?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(OncodexError::Upstream(message));
            }
        }

        envelope
            .data
            .ok_or_else(|| OncodexError::Upstream("CIViC response contained no data".to_string()))
    }

    /// Search a gene by Entrez symbol, optionally filtered to one variant
    /// name (already normalised by the caller).
    #[instrument(skip(self))]
    pub async fn search_variants(
        &self,
        gene: &str,
        variant: Option<&str>,
    ) -> Result<CivicQueryResponse> {
        let response: CivicQueryResponse = self
            .query(
                SEARCH_VARIANTS_QUERY,
                json!({ "geneName": gene, "variantName": variant }),
            )
            .await?;

        debug!(
            gene,
            variant,
            gene_found = response.gene.is_some(),
            "CIViC variant search complete"
        );
        Ok(response)
    }

    /// Fetch one variant's full evidence tree by CIViC id.
    #[instrument(skip(self))]
    pub async fn variant_details(&self, variant_id: i32) -> Result<CivicQueryResponse> {
        self.query(
            GET_VARIANT_DETAILS_QUERY,
            json!({ "variantId": variant_id }),
        )
        .await
    }

    /// Lightweight gene lookup without the variant tree.
    #[instrument(skip(self))]
    pub async fn gene_by_name(&self, gene: &str) -> Result<CivicQueryResponse> {
        self.query(SEARCH_GENE_BY_NAME_QUERY, json!({ "geneName": gene }))
            .await
    }
}
