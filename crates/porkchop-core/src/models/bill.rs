//! Bill text segments and the facts extracted from them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Placeholder used when a purpose or action cannot be resolved.
pub const UNSPECIFIED: &str = "unspecified";

/// A contiguous, ordered segment of cleaned bill text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequential identifier, e.g. `003_div_a_title_ii_part2`.
    pub id: String,

    /// Segment text (whole lines only).
    pub text: String,

    /// Enclosing division letter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,

    /// Enclosing title numeral, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// 1-based position within the document.
    pub position: usize,

    /// Length of `text` in characters.
    pub char_count: usize,
}

impl Chunk {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        division: Option<String>,
        title: Option<String>,
        position: usize,
    ) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            id: id.into(),
            text,
            division,
            title,
            position,
            char_count,
        }
    }
}

/// A dollar amount found in bill text with its resolved context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingFact {
    /// Amount as written, e.g. `$1.5 billion`.
    pub display_amount: String,

    /// Literal amount times the scale multiplier.
    pub amount_numeric: f64,

    /// What the money is for, or `"unspecified"`.
    pub purpose: String,

    /// Who receives the money.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Expiry of the funds (a date or `until expended`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    /// Fiscal years mentioned alongside the amount, comma separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_years: Option<String>,

    /// Amount plus trailing context, at most 300 characters.
    pub source_text: String,
}

/// Kind of legal citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefType {
    /// `42 U.S.C. 3030a`
    UsCode,
    /// `Public Law 118-42`
    PublicLaw,
    /// `Robert T. Stafford Disaster Relief and Emergency Assistance Act`
    Act,
}

impl RefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::UsCode => "us_code",
            RefType::PublicLaw => "public_law",
            RefType::Act => "act",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFact {
    pub ref_type: RefType,
    pub ref_text: String,
}

impl ReferenceFact {
    pub fn new(ref_type: RefType, ref_text: impl Into<String>) -> Self {
        Self {
            ref_type,
            ref_text: ref_text.into(),
        }
    }
}

/// A "not later than" obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineFact {
    /// Absolute date (`January 15, 2025`) or relative day count (`60 days`).
    pub date: String,

    /// What must happen, or `"unspecified"`.
    pub action: String,
}

impl DeadlineFact {
    /// Resolve the deadline to a calendar date.
    ///
    /// Absolute dates parse on their own; day counts need the enactment date.
    pub fn due_date(&self, enacted: Option<NaiveDate>) -> Option<NaiveDate> {
        if let Some(days) = self.relative_days() {
            return enacted?.checked_add_days(Days::new(days));
        }
        parse_long_date(&self.date)
    }

    /// Day count for relative deadlines.
    pub fn relative_days(&self) -> Option<u64> {
        self.date.strip_suffix(" days")?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    Shall,
    May,
    Must,
}

impl Modal {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shall" => Some(Self::Shall),
            "may" => Some(Self::May),
            "must" => Some(Self::Must),
            _ => None,
        }
    }
}

/// An official's obligation or permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyFact {
    pub entity: String,
    pub modal: Modal,
    pub action: String,
}

/// Everything extracted from one chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactBundle {
    pub chunk_id: String,
    pub references: Vec<ReferenceFact>,
    pub funding: Vec<FundingFact>,
    /// Absolute dates mentioned anywhere in the chunk.
    pub dates: Vec<String>,
    pub deadlines: Vec<DeadlineFact>,
    pub duties: Vec<DutyFact>,
    pub entities: Vec<String>,
    /// Four-digit fiscal years mentioned anywhere in the chunk.
    pub fiscal_years: Vec<String>,
}

impl FactBundle {
    pub fn new(chunk_id: impl Into<String>) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            ..Default::default()
        }
    }

    /// References of a single kind, in extraction order.
    pub fn references_of(&self, ref_type: RefType) -> impl Iterator<Item = &ReferenceFact> {
        self.references.iter().filter(move |r| r.ref_type == ref_type)
    }

    /// Sum of all numeric funding amounts.
    pub fn total_funding(&self) -> f64 {
        self.funding.iter().map(|f| f.amount_numeric).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
            && self.funding.is_empty()
            && self.dates.is_empty()
            && self.deadlines.is_empty()
            && self.duties.is_empty()
            && self.entities.is_empty()
            && self.fiscal_years.is_empty()
    }
}

/// A spending record as consumed by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingItem {
    pub amount: String,
    pub amount_numeric: f64,
    pub purpose: Option<String>,
    pub recipient: Option<String>,
    pub source_text: Option<String>,
}

impl From<&FundingFact> for SpendingItem {
    fn from(fact: &FundingFact) -> Self {
        Self {
            amount: fact.display_amount.clone(),
            amount_numeric: fact.amount_numeric,
            purpose: Some(fact.purpose.clone()),
            recipient: fact.recipient.clone(),
            source_text: Some(fact.source_text.clone()),
        }
    }
}

/// Bill metadata the scorer compares spending against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillContext {
    pub title: String,
    pub purpose: String,
}

impl BillContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            purpose: String::new(),
        }
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }
}

/// Parse a `Month D, YYYY` date.
pub fn parse_long_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let (month, rest) = s.split_once(char::is_whitespace)?;
    let (day, year) = rest.split_once(',')?;
    let day: u32 = day.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month_to_number(month)?, day)
}

fn month_to_number(month: &str) -> Option<u32> {
    let n = match month.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}
