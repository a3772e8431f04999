//! Typed shape of the CIViC GraphQL response.
//!
//! Field names follow the GraphQL wire format (camelCase); every optional
//! field stays optional so a partially-populated response deserialises
//! without error. Entities are immutable once constructed.

use serde::{Deserialize, Serialize};

/// Identifies the clinical query subject as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    pub gene: String,
    pub variant: Option<String>,
    pub exon: Option<String>,
    pub nucleotide_change: Option<String>,
    pub amino_acid_change: Option<String>,
}

/// GraphQL connection wrapper; preserves the source order of `nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default)]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// CIViC's ordinal rating of clinical actionability.
/// A = validated/guideline-grade, E = inferential only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceLevel {
    A,
    B,
    C,
    D,
    E,
}

impl EvidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::A => "A",
            EvidenceLevel::B => "B",
            EvidenceLevel::C => "C",
            EvidenceLevel::D => "D",
            EvidenceLevel::E => "E",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    pub disease_aliases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Therapy {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    pub ncit_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: Option<i32>,
    pub citation: Option<String>,
    pub source_url: Option<String>,
    pub publication_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenotype {
    #[serde(default)]
    pub name: String,
}

/// One citable clinical claim tied to one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub evidence_level: Option<EvidenceLevel>,
    pub evidence_type: Option<String>,
    pub significance: Option<String>,
    pub therapy_interaction_type: Option<String>,
    pub disease: Option<Disease>,
    pub therapies: Option<Vec<Therapy>>,
    pub source: Option<Source>,
}

/// Curated consensus synthesis over multiple evidence items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub evidence_level: Option<EvidenceLevel>,
    pub significance: Option<String>,
    pub assertion_type: Option<String>,
    pub therapy_interaction_type: Option<String>,
    pub amp_level: Option<String>,
    pub nccn_guideline_version: Option<String>,
    pub fda_companion_test: Option<bool>,
    pub disease: Option<Disease>,
    pub therapies: Option<Vec<Therapy>>,
    pub phenotypes: Option<Vec<Phenotype>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantType {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

/// Aggregation point linking a variant to its evidence items and assertions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MolecularProfile {
    pub id: Option<i32>,
    pub molecular_profile_score: Option<f64>,
    pub description: Option<String>,
    pub evidence_items: Option<Connection<EvidenceItem>>,
    pub assertions: Option<Connection<Assertion>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    pub variant_aliases: Option<Vec<String>>,
    pub variant_types: Option<Vec<VariantType>>,
    pub single_variant_molecular_profile: Option<Box<MolecularProfile>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub variants: Option<Connection<Variant>>,
}

/// Top-level result of a knowledgebase query; either half may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CivicQueryResponse {
    pub gene: Option<Gene>,
    pub variant: Option<Variant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::json!({
            "gene": {
                "id": 19,
                "name": "EGFR",
                "variants": {
                    "nodes": [{
                        "id": 33,
                        "name": "L858R",
                        "variantAliases": ["LEU858ARG"],
                        "variantTypes": [{"id": 47, "name": "Missense Variant"}],
                        "singleVariantMolecularProfile": {
                            "id": 33,
                            "molecularProfileScore": 407.5
                        }
                    }]
                }
            }
        });

        let response: CivicQueryResponse = serde_json::from_value(json).unwrap();
        let gene = response.gene.unwrap();
        assert_eq!(gene.name, "EGFR");
        let variant = &gene.variants.unwrap().nodes[0];
        assert_eq!(variant.variant_aliases.as_deref(), Some(&["LEU858ARG".to_string()][..]));
        let profile = variant.single_variant_molecular_profile.as_ref().unwrap();
        assert_eq!(profile.molecular_profile_score, Some(407.5));
    }

    #[test]
    fn test_missing_nodes_defaults_to_empty() {
        let gene: Gene = serde_json::from_value(serde_json::json!({
            "id": 19,
            "name": "EGFR",
            "variants": {}
        }))
        .unwrap();
        assert!(gene.variants.unwrap().nodes.is_empty());
    }

    #[test]
    fn test_assertion_flags_deserialise() {
        let assertion: Assertion = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "AID7",
            "ampLevel": "TIER_I_LEVEL_A",
            "nccnGuidelineVersion": "3.2018",
            "fdaCompanionTest": true,
            "evidenceLevel": "A"
        }))
        .unwrap();
        assert_eq!(assertion.fda_companion_test, Some(true));
        assert_eq!(assertion.evidence_level, Some(EvidenceLevel::A));
    }

    #[test]
    fn test_empty_response_deserialises() {
        let response: CivicQueryResponse =
            serde_json::from_value(serde_json::json!({ "gene": null })).unwrap();
        assert!(response.gene.is_none());
        assert!(response.variant.is_none());
    }
}
