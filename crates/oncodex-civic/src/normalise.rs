//! Variant notation normalisation.
//!
//! Maps HGVS protein notation (e.g. "p.Arg361Cys") into the short residue
//! form CIViC names its variants with ("R361C"). Unrecognised formats pass
//! through unchanged; normalisation is best effort and never fails.
//!
//! # Example
//! ```ignore
//! let norm = VariantNormaliser::new();
//! assert_eq!(norm.normalise("p.Arg361Cys"), "R361C");
//! assert_eq!(norm.normalise("Exon 14 Skipping"), "Exon 14 Skipping");
//! ```

use regex::Regex;

/// Three-letter amino acid code → single-letter code.
/// Title-case and lowercase spellings are accepted; mixed case is not.
fn aa3_to_aa1(aa: &str) -> Option<char> {
    match aa {
        "Ala" | "ala" => Some('A'),
        "Arg" | "arg" => Some('R'),
        "Asn" | "asn" => Some('N'),
        "Asp" | "asp" => Some('D'),
        "Cys" | "cys" => Some('C'),
        "Gln" | "gln" => Some('Q'),
        "Glu" | "glu" => Some('E'),
        "Gly" | "gly" => Some('G'),
        "His" | "his" => Some('H'),
        "Ile" | "ile" => Some('I'),
        "Leu" | "leu" => Some('L'),
        "Lys" | "lys" => Some('K'),
        "Met" | "met" => Some('M'),
        "Phe" | "phe" => Some('F'),
        "Pro" | "pro" => Some('P'),
        "Ser" | "ser" => Some('S'),
        "Thr" | "thr" => Some('T'),
        "Trp" | "trp" => Some('W'),
        "Tyr" | "tyr" => Some('Y'),
        "Val" | "val" => Some('V'),
        _ => None,
    }
}

pub struct VariantNormaliser {
    /// Short residue form, e.g. R361C, g12s
    re_short: Regex,
    /// HGVS protein notation, e.g. p.Arg361Cys
    re_hgvs: Regex,
}

impl VariantNormaliser {
    pub fn new() -> Self {
        Self {
            re_short: Regex::new(r"^[A-Za-z]\d+[A-Za-z]$").unwrap(),
            re_hgvs: Regex::new(r"^p\.([A-Za-z]{3})(\d+)([A-Za-z]{3})$").unwrap(),
        }
    }

    /// Normalise a variant string to CIViC's short residue form.
    ///
    /// Total function: anything that is not a recognised substitution
    /// notation comes back unchanged apart from trimming and an upper-cased
    /// leading letter.
    pub fn normalise(&self, raw: &str) -> String {
        let cleaned = raw.trim();
        if cleaned.is_empty() {
            return cleaned.to_string();
        }

        // Already in short residue form; uppercase the whole token so
        // "g12s" comes out as "G12S".
        if self.re_short.is_match(cleaned) {
            return cleaned.to_ascii_uppercase();
        }

        // HGVS protein notation: p.Arg361Cys → R361C
        if let Some(caps) = self.re_hgvs.captures(cleaned) {
            if let (Some(from), Some(to)) = (aa3_to_aa1(&caps[1]), aa3_to_aa1(&caps[3])) {
                return format!("{}{}{}", from, &caps[2], to);
            }
        }

        // Exon-level nomenclature ("Exon 14 Skipping") and anything else
        // unrecognised falls through unchanged.
        capitalise_first(cleaned)
    }
}

impl Default for VariantNormaliser {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalise_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
        }
        _ => s.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
