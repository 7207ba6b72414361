//! Common regex patterns for bill fact extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Month-name alternation shared by every long-date pattern.
pub const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

lazy_static! {
    // Legal citations
    pub static ref US_CODE: Regex = Regex::new(
        r"(?i)\b(\d+)\s*U\.S\.C\.?\s*([\w().\-]*)"
    ).unwrap();

    pub static ref PUBLIC_LAW: Regex = Regex::new(
        r"(?i)Public Law (\d+)[–-](\d+)"
    ).unwrap();

    pub static ref ACT_NAME: Regex = Regex::new(
        r"\b((?:[A-Z][a-zA-Z.]+\s+){1,6}(?:Act|Code))\b"
    ).unwrap();

    // Dollar amounts: "$5,691,000,000", "$1.5 billion"
    pub static ref DOLLAR: Regex = Regex::new(
        r"(?i)\$\s*(\d+(?:,\d{3})*(?:\.\d+)?)(?:\s*(thousand|million|billion|trillion)\b)?"
    ).unwrap();

    // Dates
    pub static ref LONG_DATE: Regex = Regex::new(
        &format!(r"(?i)\b(?:{})\s+\d{{1,2}},\s*\d{{4}}", MONTHS)
    ).unwrap();

    pub static ref FISCAL_YEAR: Regex = Regex::new(
        r"(?i)fiscal year (\d{4})"
    ).unwrap();

    pub static ref FISCAL_YEAR_SPAN: Regex = Regex::new(
        r"(?i)fiscal years?\s+(\d{4})(?:\s+(through|and)\s+(\d{4}))?"
    ).unwrap();

    pub static ref AVAILABILITY: Regex = Regex::new(
        &format!(
            r"(?i)(?:to remain available(?:\s+until)?|until|through)\s+((?:{})\s+\d{{1,2}},\s*\d{{4}}|expended)",
            MONTHS
        )
    ).unwrap();

    pub static ref NOT_LATER_THAN: Regex = Regex::new(
        &format!(
            r"(?i)not later than\s+(?:(\d+)\s+days?\s+after\s+[^,;.]+|((?:{})\s+\d{{1,2}},\s*\d{{4}}))",
            MONTHS
        )
    ).unwrap();

    // "The Secretary of Defense shall ..."
    pub static ref DUTY: Regex = Regex::new(
        r"(?im)(The (?:Secretary|Administrator|Comptroller General|Director|Commissioner|Attorney General|Inspector General|Chairman|President)(?:\s+of\s+[A-Za-z& ]+)?)\s+(shall|may|must)\s+(.{10,300}?)(?:\.|;|$)"
    ).unwrap();

    pub static ref ENTITY: Regex = Regex::new(
        r"\b(Department of [A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}|Office of [A-Z][a-z]+(?:\s+(?:and\s+)?[A-Z][a-z]+){0,3}|Bureau of [A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}|(?:Federal|National) [A-Z][a-z]+ (?:Agency|Administration|Commission|Authority)|(?:Environmental Protection|Small Business|General Services) (?:Agency|Administration)|Inspector General)\b"
    ).unwrap();

    // Purpose chain, most specific first
    pub static ref PURPOSE_NECESSARY_EXPENSES: Regex = Regex::new(
        r"(?i)necessary expenses\s+(?:related to|of|for)\s+([^,;]+)"
    ).unwrap();

    pub static ref PURPOSE_ADDITIONAL_AMOUNT: Regex = Regex::new(
        r"(?i)additional amount for fiscal year \d{4}.*?\bfor the\s+([^,;]+)"
    ).unwrap();

    pub static ref PURPOSE_MADE_AVAILABLE: Regex = Regex::new(
        r"(?i)shall be made available\s+for\s+([^,;]+)"
    ).unwrap();

    pub static ref PURPOSE_TO_VERB: Regex = Regex::new(
        r"(?i)\bto\s+(?:carry out|conduct|provide|make|fund)\s+([^,;]+)"
    ).unwrap();

    pub static ref PURPOSE_GENERIC_FOR: Regex = Regex::new(
        r"(?i)\bfor\s+([^,;]+)"
    ).unwrap();

    /// Candidates that name a time span rather than a purpose.
    pub static ref PURPOSE_TIME_SPAN: Regex = Regex::new(
        r"(?i)^(?:the\s+|each\s+|any\s+)?(?:current\s+)?(?:fiscal\s+years?|period)\b"
    ).unwrap();

    // Recipient chain
    pub static ref RECIPIENT_TRANSFERRED: Regex = Regex::new(
        r#"(?i)transferred to\s+(?:the\s+)?["“]([^"”]+)["”]"#
    ).unwrap();

    pub static ref RECIPIENT_SECRETARY: Regex = Regex::new(
        r"[Tt]o the (Secretary of (?:the\s+)?[A-Z][A-Za-z]*(?:\s+(?:and\s+)?[A-Z][A-Za-z]*)*)"
    ).unwrap();

    pub static ref RECIPIENT_DEPARTMENT: Regex = Regex::new(
        r"[Tt]o the (Department of (?:the\s+)?[A-Z][A-Za-z]*(?:\s+(?:and\s+)?[A-Z][A-Za-z]*)*)"
    ).unwrap();

    pub static ref RECIPIENT_AGENCY: Regex = Regex::new(
        r"[Tt]o the ((?:[A-Z][A-Za-z]*\s+){1,5}(?:Administration|Agency|Commission|Authority))"
    ).unwrap();

    // Headings used as purpose fallbacks
    pub static ref STRUCTURE_HEADING: Regex = Regex::new(
        r"(?m)^(?:DIVISION\s+[A-Z]+|TITLE\s+[IVXLCDM]+)\s*[—–-]+\s*(.+?)\s*$"
    ).unwrap();

    pub static ref CAPS_HEADING: Regex = Regex::new(
        r"(?m)^([A-Z][A-Z ,&'\-]*[A-Z])\s*$"
    ).unwrap();

    /// "[the] Secretary [of X] shall" at the start of a deadline action.
    pub static ref ACTION_SUBJECT: Regex = Regex::new(
        r"^(?i:the\s+)?(?:Secretary|Administrator|Director|Commissioner|Comptroller General|Attorney General|Inspector General|head of each (?:agency|department))(?:\s+of\s+(?:the\s+)?[A-Z][A-Za-z]*(?:\s+(?:and\s+)?[A-Z][A-Za-z]*)*)?\s+(?:shall|must|may)\s+"
    ).unwrap();
}
