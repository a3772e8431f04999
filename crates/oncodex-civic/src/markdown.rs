//! CIViC response → Markdown conversion.
//!
//! Every entity carrying a numeric id is rendered as a link back to the
//! CIViC web UI (`https://civicdb.org/<kind>/<id>`); entities without an id
//! render as plain text. Absent fields produce no output line. Collections
//! keep their source order and subsection headings carry the rendered count.
//!
//! Rendering is a pure read-only traversal over the [`crate::types`] model.
//! Nesting is threaded through an explicit depth parameter: depth 0 entities
//! get their own heading, nested entities render as labeled list items, and
//! composite sub-blocks (disease, therapy, source) indent two spaces per
//! level. The emitted text is stable and consumed verbatim by downstream
//! prompts, so the exact indentation and blank-line placement matter.

use crate::types::{
    Assertion, CivicQueryResponse, Disease, EvidenceItem, Gene, MolecularProfile, Source, Therapy,
    Variant,
};

const CIVIC_WEB_URL: &str = "https://civicdb.org";

/// Depth-aware rendering of one knowledgebase entity into Markdown lines.
trait Render {
    fn render(&self, depth: usize) -> Vec<String>;
}

/// Convert a full knowledgebase response to a Markdown document.
/// Gene section first, then the standalone variant section, separated by a
/// blank line; an empty response yields an empty string.
pub fn to_markdown(response: &CivicQueryResponse) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(gene) = &response.gene {
        sections.push(gene.render(0).join("\n"));
    }

    if let Some(variant) = &response.variant {
        sections.push(variant.render(0).join("\n"));
    }

    sections.join("\n\n")
}

/// `[name](https://civicdb.org/<kind>/<id>)` when an id exists, else `name`.
fn entity_link(name: &str, kind: &str, id: Option<i32>) -> String {
    match id {
        Some(id) => format!("[{}]({}/{}/{})", name, CIVIC_WEB_URL, kind, id),
        None => name.to_string(),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Some(&str) only for present, non-empty strings.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Append a detail block, separated from what precedes it by a blank line.
fn push_block(lines: &mut Vec<String>, details: Vec<String>) {
    if !details.is_empty() {
        lines.push(String::new());
        lines.extend(details);
    }
}

impl Render for Gene {
    fn render(&self, _depth: usize) -> Vec<String> {
        let mut lines = vec![format!(
            "# Gene: {}",
            entity_link(&self.name, "genes", self.id)
        )];

        let mut details = Vec::new();
        if let Some(id) = self.id {
            details.push(format!("- **Gene ID:** {}", id));
        }
        if let Some(description) = present(&self.description) {
            details.push(format!("- **Description:** {}", description));
        }
        push_block(&mut lines, details);

        if let Some(variants) = &self.variants {
            if !variants.nodes.is_empty() {
                lines.push(String::new());
                lines.push(format!("## Variants ({})", variants.nodes.len()));

                for (index, variant) in variants.nodes.iter().enumerate() {
                    lines.push(String::new());
                    lines.push(format!("### Variant {}", index + 1));
                    lines.extend(variant.render(1));
                }
            }
        }

        lines
    }
}

impl Render for Variant {
    fn render(&self, depth: usize) -> Vec<String> {
        let name = entity_link(&self.name, "variants", self.id);
        // Top-level variants get a document heading; variants listed under a
        // gene render as a labeled list item to avoid heading collisions.
        let mut lines = vec![if depth == 0 {
            format!("# Variant: {}", name)
        } else {
            format!("- **Name:** {}", name)
        }];

        let mut details = Vec::new();
        if let Some(id) = self.id {
            details.push(format!("- **Variant ID:** {}", id));
        }
        if let Some(aliases) = &self.variant_aliases {
            if !aliases.is_empty() {
                details.push(format!("- **Aliases:** {}", aliases.join(", ")));
            }
        }
        if let Some(types) = &self.variant_types {
            if !types.is_empty() {
                let list = types
                    .iter()
                    .map(|t| match t.id {
                        Some(id) => format!("{} (ID: {})", t.name, id),
                        None => t.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                details.push(format!("- **Variant Types:** {}", list));
            }
        }
        push_block(&mut lines, details);

        if let Some(profile) = &self.single_variant_molecular_profile {
            lines.push(String::new());
            // The profile block always renders at the base column; only its
            // own composite sub-blocks indent.
            lines.extend(profile.render(0));
        }

        lines
    }
}

impl Render for MolecularProfile {
    fn render(&self, depth: usize) -> Vec<String> {
        let mut lines = vec!["## Molecular Profile".to_string()];

        let mut details = Vec::new();
        if let Some(id) = self.id {
            details.push(format!("- **Molecular Profile ID:** {}", id));
        }
        if let Some(score) = self.molecular_profile_score {
            details.push(format!("- **Molecular Profile Score:** {}", score));
        }
        if let Some(description) = present(&self.description) {
            details.push(format!("- **Description:** {}", description));
        }
        push_block(&mut lines, details);

        if let Some(items) = &self.evidence_items {
            if !items.nodes.is_empty() {
                lines.push(String::new());
                lines.push(format!("### Evidence Items ({})", items.nodes.len()));

                for (index, item) in items.nodes.iter().enumerate() {
                    lines.push(String::new());
                    lines.push(format!("#### Evidence Item {}", index + 1));
                    lines.extend(item.render(depth));
                }
            }
        }

        if let Some(assertions) = &self.assertions {
            if !assertions.nodes.is_empty() {
                lines.push(String::new());
                lines.push(format!("### Assertions ({})", assertions.nodes.len()));

                for (index, assertion) in assertions.nodes.iter().enumerate() {
                    lines.push(String::new());
                    lines.push(format!("#### Assertion {}", index + 1));
                    lines.extend(assertion.render(depth));
                }
            }
        }

        lines
    }
}

impl Render for EvidenceItem {
    fn render(&self, depth: usize) -> Vec<String> {
        let mut lines = Vec::new();

        let mut details = Vec::new();
        if let Some(id) = self.id {
            details.push(format!("- **Evidence Item ID:** {}", id));
        }
        if let Some(name) = present(&self.name) {
            details.push(format!(
                "- **Name:** {}",
                entity_link(name, "evidence", self.id)
            ));
        }
        if let Some(description) = present(&self.description) {
            details.push(format!("- **Description:** {}", description));
        }
        if let Some(status) = present(&self.status) {
            details.push(format!("- **Status:** {}", status));
        }
        if let Some(level) = self.evidence_level {
            details.push(format!("- **Evidence Level:** {}", level.as_str()));
        }
        if let Some(evidence_type) = present(&self.evidence_type) {
            details.push(format!("- **Evidence Type:** {}", evidence_type));
        }
        if let Some(significance) = present(&self.significance) {
            details.push(format!("- **Significance:** {}", significance));
        }
        if let Some(interaction) = present(&self.therapy_interaction_type) {
            details.push(format!("- **Therapy Interaction Type:** {}", interaction));
        }
        lines.extend(details);

        render_clinical_context(
            &mut lines,
            depth,
            self.disease.as_ref(),
            self.therapies.as_deref(),
        );

        if let Some(source) = &self.source {
            lines.push(String::new());
            lines.push(format!("{}- **Source:**", indent(depth)));
            lines.extend(source.render(depth + 1));
        }

        lines
    }
}

impl Render for Assertion {
    fn render(&self, depth: usize) -> Vec<String> {
        let mut lines = Vec::new();

        let mut details = Vec::new();
        if let Some(id) = self.id {
            details.push(format!("- **Assertion ID:** {}", id));
        }
        if let Some(name) = present(&self.name) {
            details.push(format!(
                "- **Name:** {}",
                entity_link(name, "assertions", self.id)
            ));
        }
        if let Some(summary) = present(&self.summary) {
            details.push(format!("- **Summary:** {}", summary));
        }
        if let Some(description) = present(&self.description) {
            details.push(format!("- **Description:** {}", description));
        }
        if let Some(status) = present(&self.status) {
            details.push(format!("- **Status:** {}", status));
        }
        if let Some(significance) = present(&self.significance) {
            details.push(format!("- **Significance:** {}", significance));
        }
        if let Some(assertion_type) = present(&self.assertion_type) {
            details.push(format!("- **Assertion Type:** {}", assertion_type));
        }
        if let Some(interaction) = present(&self.therapy_interaction_type) {
            details.push(format!("- **Therapy Interaction Type:** {}", interaction));
        }
        if let Some(amp_level) = present(&self.amp_level) {
            details.push(format!("- **AMP Level:** {}", amp_level));
        }
        if let Some(nccn) = present(&self.nccn_guideline_version) {
            details.push(format!("- **NCCN Guideline Version:** {}", nccn));
        }
        if let Some(fda) = self.fda_companion_test {
            details.push(format!(
                "- **FDA Companion Test:** {}",
                if fda { "Yes" } else { "No" }
            ));
        }
        lines.extend(details);

        render_clinical_context(
            &mut lines,
            depth,
            self.disease.as_ref(),
            self.therapies.as_deref(),
        );

        if let Some(phenotypes) = &self.phenotypes {
            if !phenotypes.is_empty() {
                lines.push(String::new());
                lines.push(format!("{}- **Phenotypes:**", indent(depth)));
                for phenotype in phenotypes {
                    lines.push(format!("{}- {}", indent(depth + 1), phenotype.name));
                }
            }
        }

        lines
    }
}

/// Disease and therapy sub-blocks shared by evidence items and assertions.
fn render_clinical_context(
    lines: &mut Vec<String>,
    depth: usize,
    disease: Option<&Disease>,
    therapies: Option<&[Therapy]>,
) {
    if let Some(disease) = disease {
        lines.push(String::new());
        lines.push(format!("{}- **Disease:**", indent(depth)));
        lines.extend(disease.render(depth + 1));
    }

    if let Some(therapies) = therapies {
        if !therapies.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}- **Therapies:**", indent(depth)));
            for therapy in therapies {
                lines.extend(therapy.render(depth + 1));
            }
        }
    }
}

impl Render for Disease {
    fn render(&self, depth: usize) -> Vec<String> {
        let ind = indent(depth);
        let mut lines = vec![format!(
            "{}- **Name:** {}",
            ind,
            entity_link(&self.name, "diseases", self.id)
        )];

        if let Some(id) = self.id {
            lines.push(format!("{}- **Disease ID:** {}", ind, id));
        }
        if let Some(aliases) = &self.disease_aliases {
            if !aliases.is_empty() {
                lines.push(format!("{}- **Aliases:** {}", ind, aliases.join(", ")));
            }
        }

        lines
    }
}

impl Render for Therapy {
    fn render(&self, depth: usize) -> Vec<String> {
        let ind = indent(depth);
        let mut lines = vec![format!(
            "{}- **Name:** {}",
            ind,
            entity_link(&self.name, "therapies", self.id)
        )];

        if let Some(id) = self.id {
            lines.push(format!("{}- **Therapy ID:** {}", ind, id));
        }
        if let Some(ncit_id) = present(&self.ncit_id) {
            lines.push(format!("{}- **NCIT ID:** {}", ind, ncit_id));
        }

        lines
    }
}

impl Render for Source {
    fn render(&self, depth: usize) -> Vec<String> {
        let ind = indent(depth);
        let mut lines = Vec::new();

        if let Some(id) = self.id {
            lines.push(format!("{}- **Source ID:** {}", ind, id));
        }
        if let Some(citation) = present(&self.citation) {
            lines.push(format!(
                "{}- **Citation:** {}",
                ind,
                entity_link(citation, "sources", self.id)
            ));
        }
        if let Some(url) = present(&self.source_url) {
            lines.push(format!("{}- **URL:** [{}]({})", ind, url, url));
        }
        if let Some(date) = present(&self.publication_date) {
            lines.push(format!("{}- **Publication Date:** {}", ind, date));
        }

        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Connection, EvidenceLevel, Phenotype, VariantType};

    fn nsclc() -> Disease {
        Disease {
            id: Some(8),
            name: "Lung Non-small Cell Carcinoma".to_string(),
            disease_aliases: Some(vec!["NSCLC".to_string()]),
        }
    }

    fn evidence_item() -> EvidenceItem {
        EvidenceItem {
            id: Some(123),
            name: Some("EID123".to_string()),
            description: Some("Strong response to afatinib.".to_string()),
            status: Some("ACCEPTED".to_string()),
            evidence_level: Some(EvidenceLevel::A),
            evidence_type: Some("PREDICTIVE".to_string()),
            significance: Some("SENSITIVITYRESPONSE".to_string()),
            disease: Some(nsclc()),
            therapies: Some(vec![Therapy {
                id: Some(146),
                name: "Afatinib".to_string(),
                ncit_id: Some("C66940".to_string()),
            }]),
            source: Some(Source {
                id: Some(1296),
                citation: Some("Sequist et al., 2013".to_string()),
                source_url: Some("http://www.ncbi.nlm.nih.gov/pubmed/23816960".to_string()),
                publication_date: Some("2013-7-1".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_response_renders_empty_string() {
        assert_eq!(to_markdown(&CivicQueryResponse::default()), "");
    }

    #[test]
    fn test_gene_heading_links_to_civic() {
        let response = CivicQueryResponse {
            gene: Some(Gene {
                id: Some(19),
                name: "EGFR".to_string(),
                ..Default::default()
            }),
            variant: None,
        };
        let md = to_markdown(&response);
        assert!(md.starts_with("# Gene: [EGFR](https://civicdb.org/genes/19)"));
        assert!(md.contains("- **Gene ID:** 19"));
    }

    #[test]
    fn test_gene_without_id_renders_plain_name() {
        let response = CivicQueryResponse {
            gene: Some(Gene {
                name: "EGFR".to_string(),
                ..Default::default()
            }),
            variant: None,
        };
        assert_eq!(to_markdown(&response), "# Gene: EGFR");
    }

    #[test]
    fn test_variant_count_matches_rendered_entries() {
        let gene = Gene {
            id: Some(19),
            name: "EGFR".to_string(),
            variants: Some(Connection {
                nodes: vec![
                    Variant {
                        id: Some(33),
                        name: "L858R".to_string(),
                        ..Default::default()
                    },
                    Variant {
                        id: Some(34),
                        name: "T790M".to_string(),
                        ..Default::default()
                    },
                ],
            }),
            ..Default::default()
        };
        let md = to_markdown(&CivicQueryResponse {
            gene: Some(gene),
            variant: None,
        });

        assert!(md.contains("## Variants (2)"));
        assert_eq!(md.matches("### Variant ").count(), 2);
        // Source order preserved: L858R first.
        let l858r = md.find("L858R").unwrap();
        let t790m = md.find("T790M").unwrap();
        assert!(l858r < t790m);
    }

    #[test]
    fn test_nested_variant_renders_as_list_item_not_heading() {
        let gene = Gene {
            id: Some(19),
            name: "EGFR".to_string(),
            variants: Some(Connection {
                nodes: vec![Variant {
                    id: Some(33),
                    name: "L858R".to_string(),
                    variant_aliases: Some(vec!["LEU858ARG".to_string()]),
                    variant_types: Some(vec![VariantType {
                        id: Some(47),
                        name: "Missense Variant".to_string(),
                    }]),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        };
        let md = to_markdown(&CivicQueryResponse {
            gene: Some(gene),
            variant: None,
        });

        assert!(md.contains("### Variant 1\n- **Name:** [L858R](https://civicdb.org/variants/33)"));
        assert!(!md.contains("# Variant: [L858R]"));
        assert!(md.contains("- **Aliases:** LEU858ARG"));
        assert!(md.contains("- **Variant Types:** Missense Variant (ID: 47)"));
    }

    #[test]
    fn test_top_level_variant_gets_heading() {
        let md = to_markdown(&CivicQueryResponse {
            gene: None,
            variant: Some(Variant {
                id: Some(33),
                name: "L858R".to_string(),
                ..Default::default()
            }),
        });
        assert!(md.starts_with("# Variant: [L858R](https://civicdb.org/variants/33)"));
    }

    #[test]
    fn test_evidence_item_name_links_by_id() {
        let md = evidence_item().render(0).join("\n");
        assert!(md.contains("[EID123](https://civicdb.org/evidence/123)"));
        assert!(md.contains("- **Evidence Level:** A"));
    }

    #[test]
    fn test_evidence_item_without_id_has_no_link() {
        let item = EvidenceItem {
            name: Some("EID123".to_string()),
            ..Default::default()
        };
        let md = item.render(0).join("\n");
        assert_eq!(md, "- **Name:** EID123");
        assert!(!md.contains("civicdb.org"));
    }

    #[test]
    fn test_nested_blocks_indent_two_spaces() {
        let md = evidence_item().render(0).join("\n");
        assert!(md.contains(
            "- **Disease:**\n  - **Name:** [Lung Non-small Cell Carcinoma](https://civicdb.org/diseases/8)\n  - **Disease ID:** 8\n  - **Aliases:** NSCLC"
        ));
        assert!(md.contains(
            "- **Therapies:**\n  - **Name:** [Afatinib](https://civicdb.org/therapies/146)\n  - **Therapy ID:** 146\n  - **NCIT ID:** C66940"
        ));
        assert!(md.contains(
            "- **Source:**\n  - **Source ID:** 1296\n  - **Citation:** [Sequist et al., 2013](https://civicdb.org/sources/1296)"
        ));
        assert!(md.contains("  - **URL:** [http://www.ncbi.nlm.nih.gov/pubmed/23816960](http://www.ncbi.nlm.nih.gov/pubmed/23816960)"));
    }

    #[test]
    fn test_fda_companion_test_renders_yes_no_or_nothing() {
        let mut assertion = Assertion {
            id: Some(7),
            name: Some("AID7".to_string()),
            fda_companion_test: Some(true),
            ..Default::default()
        };
        assert!(assertion
            .render(0)
            .join("\n")
            .contains("- **FDA Companion Test:** Yes"));

        assertion.fda_companion_test = Some(false);
        assert!(assertion
            .render(0)
            .join("\n")
            .contains("- **FDA Companion Test:** No"));

        assertion.fda_companion_test = None;
        assert!(!assertion.render(0).join("\n").contains("FDA Companion Test"));
    }

    #[test]
    fn test_assertion_phenotypes_render_as_bullets() {
        let assertion = Assertion {
            id: Some(7),
            name: Some("AID7".to_string()),
            phenotypes: Some(vec![
                Phenotype {
                    name: "Childhood onset".to_string(),
                },
                Phenotype {
                    name: "Autosomal dominant inheritance".to_string(),
                },
            ]),
            ..Default::default()
        };
        let md = assertion.render(0).join("\n");
        assert!(md.contains(
            "- **Phenotypes:**\n  - Childhood onset\n  - Autosomal dominant inheritance"
        ));
    }

    #[test]
    fn test_molecular_profile_score_zero_still_renders() {
        let profile = MolecularProfile {
            id: Some(33),
            molecular_profile_score: Some(0.0),
            ..Default::default()
        };
        let md = profile.render(0).join("\n");
        assert!(md.contains("- **Molecular Profile Score:** 0"));
    }

    #[test]
    fn test_evidence_count_equals_rendered_items() {
        let profile = MolecularProfile {
            id: Some(33),
            evidence_items: Some(Connection {
                nodes: vec![evidence_item(), evidence_item(), evidence_item()],
            }),
            ..Default::default()
        };
        let md = profile.render(0).join("\n");
        assert!(md.contains("### Evidence Items (3)"));
        assert_eq!(md.matches("#### Evidence Item ").count(), 3);
    }

    #[test]
    fn test_gene_and_variant_sections_joined_by_blank_line() {
        let response = CivicQueryResponse {
            gene: Some(Gene {
                name: "EGFR".to_string(),
                ..Default::default()
            }),
            variant: Some(Variant {
                name: "L858R".to_string(),
                ..Default::default()
            }),
        };
        assert_eq!(to_markdown(&response), "# Gene: EGFR\n\n# Variant: L858R");
    }

    #[test]
    fn test_blank_line_between_name_and_details() {
        // Exactly one blank line separates the name line from the detail
        // block; downstream prompt construction depends on the spacing.
        let variant = Variant {
            id: Some(33),
            name: "L858R".to_string(),
            ..Default::default()
        };
        assert_eq!(
            variant.render(0).join("\n"),
            "# Variant: [L858R](https://civicdb.org/variants/33)\n\n- **Variant ID:** 33"
        );
    }
}
