//! CIViC GraphQL query documents.

/// Gene lookup by Entrez symbol with optional variant-name filter; pulls the
/// full evidence tree for each matching variant.
pub const SEARCH_VARIANTS_QUERY: &str = r#"
  query SearchVariants($geneName: String!, $variantName: String) {
    gene(entrezSymbol: $geneName) {
      id
      name
      description
      variants(name: $variantName) {
        nodes {
          id
          name
          variantAliases
          variantTypes {
            id
            name
          }
          singleVariantMolecularProfile {
            id
            molecularProfileScore
            description
            evidenceItems {
              nodes {
                id
                name
                description
                status
                evidenceLevel
                evidenceType
                significance
                therapyInteractionType
                disease {
                  id
                  name
                  diseaseAliases
                }
                therapies {
                  id
                  name
                  ncitId
                }
                source {
                  id
                  citation
                  sourceUrl
                  publicationDate
                }
              }
            }
            assertions {
              nodes {
                id
                name
                summary
                description
                status
                significance
                assertionType
                therapyInteractionType
                ampLevel
                nccnGuidelineVersion
                fdaCompanionTest
                disease {
                  id
                  name
                  diseaseAliases
                }
                therapies {
                  id
                  name
                  ncitId
                }
                phenotypes {
                  name
                }
              }
            }
          }
        }
      }
    }
  }
"#;

/// Single-variant lookup by CIViC id.
pub const GET_VARIANT_DETAILS_QUERY: &str = r#"
  query GetVariantDetails($variantId: Int!) {
    variant(id: $variantId) {
      id
      name
      variantAliases
      variantTypes {
        id
        name
      }
      singleVariantMolecularProfile {
        id
        molecularProfileScore
        description
        evidenceItems {
          nodes {
            id
            name
            description
            status
            evidenceLevel
            evidenceType
            significance
            therapyInteractionType
            disease {
              id
              name
              diseaseAliases
            }
            therapies {
              id
              name
              ncitId
            }
            source {
              id
              citation
              sourceUrl
              publicationDate
              pmid
            }
          }
        }
        assertions {
          nodes {
            id
            name
            summary
            description
            status
            significance
            assertionType
            therapyInteractionType
            evidenceLevel
            ampLevel
            nccnGuidelineVersion
            fdaCompanionTest
            disease {
              id
              name
              diseaseAliases
            }
            therapies {
              id
              name
              ncitId
            }
            phenotypes {
              name
            }
          }
        }
      }
    }
  }
"#;

/// Lightweight gene existence check.
pub const SEARCH_GENE_BY_NAME_QUERY: &str = r#"
  query SearchGeneByName($geneName: String!) {
    gene(entrezSymbol: $geneName) {
      id
      name
      description
    }
  }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_request_the_rendered_fields() {
        for field in [
            "molecularProfileScore",
            "evidenceLevel",
            "therapyInteractionType",
            "ncitId",
            "publicationDate",
        ] {
            assert!(SEARCH_VARIANTS_QUERY.contains(field), "missing {field}");
        }
        assert!(SEARCH_VARIANTS_QUERY.contains("fdaCompanionTest"));
        assert!(GET_VARIANT_DETAILS_QUERY.contains("$variantId: Int!"));
        assert!(SEARCH_GENE_BY_NAME_QUERY.contains("entrezSymbol"));
    }
}
