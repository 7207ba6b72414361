//! Removal of GPO publishing artifacts from raw bill text.
//!
//! Cleaning runs in three phases, each feeding the next:
//!
//! 1. drop whole lines matching a noise signature (print headers, job
//!    tickets, file paths, `(n|n)` markers, timestamps, bare page numbers);
//! 2. repair surviving lines (injected line numbers, digits spliced into words);
//! 3. normalize whitespace.
//!
//! The output is a fixed point: cleaning it again changes nothing.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// Line-level noise signatures, applied in order.
    static ref NOISE_SIGNATURES: Vec<Regex> = [
        // VerDate print header
        r"^VerDate.*$",
        // Jkt job ticket
        r"^.*Jkt.*$",
        // Windows paths (C:\USERS\..., I:\FY25\...)
        r"^[A-Z]:\\.*$",
        // XML file reference with pipe marker
        r"^\s*[A-Za-z]:\\.*\.xml\s*\(\d+\|\d+\)\s*$",
        // Number-prefixed XML reference
        r"^\s*\d*,?\s*[A-Za-z]:\\.*\.xml\s*\(\d+\|\d+\)\s*$",
        // Any (###|###) marker
        r"^\s*.*\(\d+\|\d+\).*$",
        // "December 17, 2024 (5:46 p.m.)"
        r"^\w+\s+\d{1,2},\s+\d{4}\s*\(\d{1,2}:\d{2}\s*[ap]\.m\.\).*$",
        // Bare page numbers
        r"^\s*\d+(\s*,\s*\d+)*\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref LEADING_LINE_NUMBER: Regex = Regex::new(r"^\d+\s+").unwrap();

    /// A leading number that is really a U.S. Code title.
    static ref US_CODE_START: Regex = Regex::new(r"(?i)^\d+\s+U\.S\.C\b").unwrap();

    /// "strate2 gies": digits spliced between lowercase letters. Uppercase or
    /// punctuation on either side ("42 U.S.C.") is left alone.
    static ref EMBEDDED_NUMBER_ARTIFACT: Regex = Regex::new(r"([a-z])(\d+)\s+([a-z])").unwrap();

    static ref INLINE_WHITESPACE: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Raw bill text cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Clean raw bill text.
    pub fn clean(&self, raw: &str) -> String {
        let kept = remove_noise_lines(raw);
        let repaired = repair_lines(&kept);
        normalize_whitespace(&repaired)
    }
}

/// Clean raw bill text with the default cleaner.
pub fn clean_text(raw: &str) -> String {
    Cleaner::new().clean(raw)
}

fn is_noise(line: &str) -> bool {
    NOISE_SIGNATURES.iter().any(|sig| sig.is_match(line))
}

fn remove_noise_lines(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = raw.lines().collect();
    let before = lines.len();

    for signature in NOISE_SIGNATURES.iter() {
        lines.retain(|line| !signature.is_match(line));
    }

    debug!("Removed {} noise lines of {}", before - lines.len(), before);
    lines
}

fn repair_lines(lines: &[&str]) -> Vec<String> {
    let mut repaired = Vec::with_capacity(lines.len());

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            repaired.push(String::new());
            continue;
        }

        let fixed = repair_embedded_digits(strip_line_numbers(trimmed));
        let fixed = fixed.trim();

        // Stripping "3 12" leaves "12", which is noise in its own right.
        if fixed.is_empty() || is_noise(fixed) {
            continue;
        }
        repaired.push(fixed.to_string());
    }

    repaired
}

/// Strip every leading number, not just the first, so that cleaning is
/// idempotent. A line that genuinely starts with a number loses it too:
/// "14 90 days after enactment" becomes "days after enactment". Only a
/// leading U.S. Code title number survives.
fn strip_line_numbers(line: &str) -> &str {
    let mut rest = line;
    while let Some(m) = LEADING_LINE_NUMBER.find(rest) {
        if US_CODE_START.is_match(rest) {
            break;
        }
        rest = &rest[m.end()..];
    }
    rest
}

fn repair_embedded_digits(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = EMBEDDED_NUMBER_ARTIFACT
            .replace_all(&current, "${1}${3}")
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_whitespace(lines: &[String]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut previous_blank = false;

    for line in lines {
        let collapsed = INLINE_WHITESPACE.replace_all(line, " ");
        let collapsed = collapsed.trim();
        let blank = collapsed.is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push(collapsed.to_string());
        previous_blank = blank;
    }

    out.join("\n").trim().to_string()
}
