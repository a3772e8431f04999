//! Prompt construction for report generation and chat.
//!
//! Pure string templating over the CIViC Markdown and variant metadata; no
//! validation or normalisation happens here.

use oncodex_civic::VariantInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Context carried from a generated report into the follow-up chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub variant_info: VariantInfo,
    pub report: String,
    pub civic_markdown: Option<String>,
}

/// Builds the prompt for generating a comprehensive variant interpretation
/// report.
pub fn build_report_prompt(civic_markdown: &str, info: &VariantInfo) -> String {
    let mut metadata = vec![
        format!("- Gene: {}", info.gene),
        format!(
            "- Variant: {}",
            info.variant.as_deref().unwrap_or("Not specified")
        ),
    ];
    if let Some(exon) = info.exon.as_deref().filter(|s| !s.is_empty()) {
        metadata.push(format!("- Exon: {}", exon));
    }
    if let Some(nt) = info.nucleotide_change.as_deref().filter(|s| !s.is_empty()) {
        metadata.push(format!("- Nucleotide Change: {}", nt));
    }
    if let Some(aa) = info.amino_acid_change.as_deref().filter(|s| !s.is_empty()) {
        metadata.push(format!("- Amino Acid Change: {}", aa));
    }

    format!(
        r###"You are an expert oncology AI assistant specializing in genomic variant interpretation. Generate a comprehensive, structured clinical report based on the provided CIViC database information.

**Variant Information:**
{metadata}

**CIViC Database Information (Markdown format):**
{civic_markdown}

**Instructions:**
Generate a structured clinical report in markdown format. Start directly with the report content - do not include any introductory text, conversational phrases, or acknowledgments. Begin immediately with the first section heading.

The report should include the following sections:

## 1. Variant Significance
- Biological description of the variant
- Molecular mechanism and functional impact
- Protein domain affected (if applicable)
- Oncogenic potential

## 2. Clinical Relevance
- **Diagnostic Implications**: How this variant aids in disease classification
- **Prognostic Significance**: Impact on disease outcome independent of therapy
- **Predictive Biomarker Status**: Value for treatment selection

## 3. Treatment Options
Organize treatments by evidence level:

### FDA-Approved Therapies
List therapies with Level A evidence and FDA approval for this variant/disease combination.

### NCCN Category 1 Recommendations
List therapies recommended by NCCN guidelines (Category 1).

### Clinical Trials and Investigational Therapies
List therapies with Level B/C evidence or in clinical trials.

### Resistance Patterns
Document any known resistance mechanisms or therapies to avoid.

## 4. Evidence Summary
- Key publications and sources
- Evidence levels (A-E) with brief descriptions
- Number of supporting studies
- Most recent evidence dates

**Important Guidelines:**
- Use clear, professional medical language appropriate for oncologists
- Cite specific evidence levels (A, B, C, D, E) when discussing treatments
- Distinguish between on-label and off-label use
- Highlight any FDA companion diagnostic approvals
- If no evidence is found, clearly state this
- Be precise about disease contexts (e.g., "in NSCLC" vs "in colorectal cancer")
- Format the output in clean, structured markdown with proper headings
- Start directly with the first section heading (e.g., "## 1. Variant Significance") - no introductory text or conversational phrases

**Source Citation and Grounding:**
- The CIViC Database Information above contains clickable links to specific evidence items, molecular profiles, genes, variants, diseases, therapies, and sources
- When referencing information from the CIViC database, include the relevant CIViC link as a citation using markdown link format: [descriptive text](https://civicdb.org/...)
- For example, when discussing an evidence item, cite it as: "Evidence suggests... [CIViC Evidence Item](https://civicdb.org/evidence/123)"
- When mentioning therapies, diseases, or other entities, include their CIViC links to provide readers with direct access to the source data
- Use these links throughout the report to ground your statements and improve credibility
- In the Evidence Summary section, include links to key evidence items and sources
- This allows readers to verify information and access the original CIViC database entries

Generate the report now, starting immediately with the first section:"###,
        metadata = metadata.join("\n"),
        civic_markdown = civic_markdown,
    )
}

/// Builds the prompt for conversational chat grounded in a generated report.
pub fn build_chat_prompt(history: &[ChatMessage], question: &str, ctx: &ReportContext) -> String {
    let history_text = if history.is_empty() {
        "No previous conversation.".to_string()
    } else {
        history
            .iter()
            .map(|msg| format!("{}: {}", msg.role.label(), msg.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let civic_block = match ctx.civic_markdown.as_deref().filter(|s| !s.is_empty()) {
        Some(markdown) => format!(
            "**CIViC Database Information (Markdown format):**\n{}\n\n",
            markdown
        ),
        None => String::new(),
    };

    format!(
        r#"You are an expert oncology AI assistant helping interpret genomic variants. You have access to a previously generated clinical report and CIViC database information.

**Report Context:**
Variant: {gene} {variant}

**Generated Report:**
{report}

{civic_block}**Conversation History:**
{history}

**User Question:** {question}

**Instructions:**
- Provide a clear, concise answer to the user's question
- Use simple language when defining medical/genetic terms
- Cite evidence levels (A, B, C, D, E) when discussing treatments
- Reference specific information from the report when relevant
- If asked about something not in the report, acknowledge this and provide general guidance if appropriate
- Maintain a professional but approachable tone
- If the question is about a term or concept, provide a brief educational explanation

**Source Citation and Grounding:**
- When referencing information from the CIViC database, include the relevant CIViC link as a citation using markdown link format: [descriptive text](https://civicdb.org/...)
- Use the links from the CIViC Database Information to ground your answers and provide credibility
- For example, when discussing evidence items, therapies, or diseases, include their CIViC links so users can verify the information
- This helps users access the original source data and improves the trustworthiness of your responses

Provide your response:"#,
        gene = ctx.variant_info.gene,
        variant = ctx.variant_info.variant.as_deref().unwrap_or(""),
        report = ctx.report,
        civic_block = civic_block,
        history = history_text,
        question = question,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> VariantInfo {
        VariantInfo {
            gene: "EGFR".to_string(),
            variant: Some("L858R".to_string()),
            exon: Some("21".to_string()),
            nucleotide_change: None,
            amino_acid_change: None,
        }
    }

    #[test]
    fn test_report_prompt_embeds_metadata_and_context() {
        let prompt = build_report_prompt("# Gene: EGFR", &info());
        assert!(prompt.contains("- Gene: EGFR"));
        assert!(prompt.contains("- Variant: L858R"));
        assert!(prompt.contains("- Exon: 21"));
        assert!(!prompt.contains("Nucleotide Change"));
        assert!(prompt.contains("# Gene: EGFR"));
    }

    #[test]
    fn test_report_prompt_has_all_sections() {
        let prompt = build_report_prompt("", &info());
        for section in [
            "## 1. Variant Significance",
            "## 2. Clinical Relevance",
            "## 3. Treatment Options",
            "## 4. Evidence Summary",
            "### Resistance Patterns",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn test_report_prompt_unspecified_variant() {
        let prompt = build_report_prompt(
            "",
            &VariantInfo {
                gene: "KRAS".to_string(),
                ..Default::default()
            },
        );
        assert!(prompt.contains("- Variant: Not specified"));
    }

    #[test]
    fn test_chat_prompt_empty_history_fallback() {
        let ctx = ReportContext {
            variant_info: info(),
            report: "## 1. Variant Significance".to_string(),
            civic_markdown: None,
        };
        let prompt = build_chat_prompt(&[], "What does Level A mean?", &ctx);
        assert!(prompt.contains("No previous conversation."));
        assert!(prompt.contains("**User Question:** What does Level A mean?"));
        assert!(!prompt.contains("**CIViC Database Information"));
    }

    #[test]
    fn test_chat_prompt_formats_history_and_context() {
        let ctx = ReportContext {
            variant_info: info(),
            report: "report body".to_string(),
            civic_markdown: Some("# Gene: EGFR".to_string()),
        };
        let history = vec![
            ChatMessage {
                role: ChatRole::User,
                content: "Is this actionable?".to_string(),
            },
            ChatMessage {
                role: ChatRole::Assistant,
                content: "Yes, Level A evidence exists.".to_string(),
            },
        ];
        let prompt = build_chat_prompt(&history, "Which therapy?", &ctx);
        assert!(prompt.contains("User: Is this actionable?"));
        assert!(prompt.contains("Assistant: Yes, Level A evidence exists."));
        assert!(prompt.contains("**CIViC Database Information (Markdown format):**\n# Gene: EGFR"));
        assert!(prompt.contains("Variant: EGFR L858R"));
    }

    #[test]
    fn test_chat_role_wire_format() {
        let msg: ChatMessage =
            serde_json::from_value(serde_json::json!({ "role": "user", "content": "hi" })).unwrap();
        assert_eq!(msg.role, ChatRole::User);
    }
}
