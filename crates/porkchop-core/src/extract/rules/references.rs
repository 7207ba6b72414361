//! Legal citation extraction (U.S. Code, Public Laws, named Acts).

use crate::models::bill::{RefType, ReferenceFact};
use crate::text::collapse_whitespace;

use super::patterns::{ACT_NAME, PUBLIC_LAW, US_CODE};
use super::FieldExtractor;

/// Citation extractor. Each category is deduplicated separately.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn us_code(&self, text: &str) -> Vec<String> {
        dedup(US_CODE.captures_iter(text).map(|caps| {
            let suffix = caps[2].trim_end_matches('.');
            format!("{} U.S.C. {}", &caps[1], suffix).trim().to_string()
        }))
    }

    pub fn public_laws(&self, text: &str) -> Vec<String> {
        dedup(
            PUBLIC_LAW
                .captures_iter(text)
                .map(|caps| format!("Public Law {}-{}", &caps[1], &caps[2])),
        )
    }

    pub fn acts(&self, text: &str) -> Vec<String> {
        dedup(
            ACT_NAME
                .captures_iter(text)
                .map(|caps| collapse_whitespace(&caps[1]))
                .filter(|name| name.chars().count() > 10),
        )
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = ReferenceFact;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let us_code = self.us_code(text).into_iter().map(|r| ReferenceFact::new(RefType::UsCode, r));
        let public_laws = self
            .public_laws(text)
            .into_iter()
            .map(|r| ReferenceFact::new(RefType::PublicLaw, r));
        let acts = self.acts(text).into_iter().map(|r| ReferenceFact::new(RefType::Act, r));

        us_code.chain(public_laws).chain(acts).collect()
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_us_code_citations() {
        let refs = ReferenceExtractor::new().us_code("Pursuant to 42 U.S.C. 3030a and 10 USC 2 and 5 U.S.C. 552(b).");
        assert_eq!(refs, vec!["42 U.S.C. 3030a", "5 U.S.C. 552(b)"]);
    }

    #[test]
    fn test_us_code_without_section() {
        let refs = ReferenceExtractor::new().us_code("see title 31 U.S.C.");
        assert_eq!(refs, vec!["31 U.S.C."]);
    }

    #[test]
    fn test_deduplicates_us_code() {
        let text = "42 U.S.C. 3030a appears here. Also 42 U.S.C. 3030a appears again.";
        let refs = ReferenceExtractor::new().extract_all(text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0], ReferenceFact::new(RefType::UsCode, "42 U.S.C. 3030a"));
    }

    #[test]
    fn test_public_laws_accept_en_dash() {
        let refs = ReferenceExtractor::new().public_laws("Public Law 118–42 and public law 118-42 and Public Law 117-58");
        assert_eq!(refs, vec!["Public Law 118-42", "Public Law 117-58"]);
    }

    #[test]
    fn test_act_names() {
        let text = "the Robert T. Stafford Disaster Relief and Emergency Assistance Act authorizes \
                    funds. The Internal Revenue Code applies. An Act is short.";
        let acts = ReferenceExtractor::new().acts(text);
        assert_eq!(acts, vec!["Emergency Assistance Act", "The Internal Revenue Code"]);
    }

    #[test]
    fn test_categories_are_ordered() {
        let text = "Public Law 118-42 amends 42 U.S.C. 1395 under the Social Security Act.";
        let refs = ReferenceExtractor::new().extract_all(text);
        let kinds: Vec<RefType> = refs.iter().map(|r| r.ref_type).collect();
        assert_eq!(kinds, vec![RefType::UsCode, RefType::PublicLaw, RefType::Act]);
    }
}
