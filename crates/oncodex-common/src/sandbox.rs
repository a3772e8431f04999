use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::OncodexError;

/// An allowlist-capped HTTP client. Every outbound request must target one of
/// the approved hosts; anything else is rejected before the request is built.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient permitting the service's two upstreams
    /// (CIViC and the Gemini API) plus localhost for development.
    pub fn new() -> Result<Self, OncodexError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "civicdb.org",                       // CIViC knowledgebase
            "generativelanguage.googleapis.com", // Google Gemini
            "localhost",                         // local Ollama
            "127.0.0.1",                         // localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| OncodexError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, OncodexError> {
        if !self.is_allowed(url) {
            return Err(OncodexError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for POST requests.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, OncodexError> {
        if !self.is_allowed(url) {
            return Err(OncodexError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civic_is_allowed() {
        let c = SandboxClient::new().unwrap();
        assert!(c.is_allowed("https://civicdb.org/api/graphql"));
        assert!(c.is_allowed("https://generativelanguage.googleapis.com/v1beta/models"));
    }

    #[test]
    fn test_unlisted_domain_is_rejected() {
        let c = SandboxClient::new().unwrap();
        assert!(!c.is_allowed("https://example.com/api"));
        assert!(c.post("https://example.com/api").is_err());
    }

    #[test]
    fn test_allow_domain_extends_allowlist() {
        let mut c = SandboxClient::new().unwrap();
        assert!(!c.is_allowed("https://staging.civic.example/graphql"));
        c.allow_domain("staging.civic.example");
        assert!(c.is_allowed("https://staging.civic.example/graphql"));
    }
}
