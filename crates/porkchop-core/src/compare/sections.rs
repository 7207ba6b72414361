//! Heading-keyed section split and pairing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::comparison::SectionPair;

/// Key for text before the first heading.
pub const PREAMBLE: &str = "Preamble";

lazy_static! {
    static ref SECTION_HEADING: Regex =
        Regex::new(r"^(DIVISION\s+[A-Z]+|TITLE\s+[IVXLCDM]+|SEC(?:TION)?\.?\s+\d+)\b").unwrap();
}

/// Split text into `(heading, body)` segments in first-appearance order.
///
/// Each body starts with its heading line. A heading seen twice appends to
/// its first segment.
pub fn split_sections(text: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut heading = PREAMBLE.to_string();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = SECTION_HEADING.captures(line.trim()) {
            push_section(&mut sections, &heading, &lines);
            heading = caps[1].to_string();
            lines.clear();
        }
        lines.push(line);
    }
    push_section(&mut sections, &heading, &lines);

    sections
}

fn push_section(sections: &mut Vec<(String, String)>, heading: &str, lines: &[&str]) {
    if lines.is_empty() {
        return;
    }
    let body = lines.join("\n");
    if heading == PREAMBLE && body.trim().is_empty() {
        return;
    }

    match sections.iter_mut().find(|(h, _)| h == heading) {
        Some((_, existing)) => {
            existing.push('\n');
            existing.push_str(&body);
        }
        None => sections.push((heading.to_string(), body)),
    }
}

/// Join two section lists on heading: A's headings first, then B-only ones.
pub fn pair_sections(a: &[(String, String)], b: &[(String, String)]) -> Vec<SectionPair> {
    let lookup = |sections: &[(String, String)], heading: &str| {
        sections
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, body)| body.clone())
    };

    let mut pairs: Vec<SectionPair> = a
        .iter()
        .map(|(heading, body)| SectionPair {
            heading: heading.clone(),
            text_a: Some(body.clone()),
            text_b: lookup(b, heading),
        })
        .collect();

    for (heading, body) in b {
        if !pairs.iter().any(|p| &p.heading == heading) {
            pairs.push(SectionPair {
                heading: heading.clone(),
                text_a: None,
                text_b: Some(body.clone()),
            });
        }
    }

    pairs
}
