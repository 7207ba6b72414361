//! Dollar amount extraction.

use super::patterns::DOLLAR;
use super::FieldExtractor;

/// A dollar amount located in text.
#[derive(Debug, Clone, PartialEq)]
pub struct DollarMatch {
    /// `$<literal>[ <scale>]`
    pub display: String,
    /// Literal amount times the scale multiplier.
    pub value: f64,
    /// Byte span of the match in the source text.
    pub start: usize,
    pub end: usize,
}

/// Dollar amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = DollarMatch;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DOLLAR
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let literal = caps.get(1)?.as_str();
                let scale = caps.get(2).map(|m| m.as_str());

                let display = match scale {
                    Some(scale) => format!("${} {}", literal, scale),
                    None => format!("${}", literal),
                };

                Some(DollarMatch {
                    display,
                    value: parse_amount(literal, scale),
                    start: full.start(),
                    end: full.end(),
                })
            })
            .collect()
    }
}

fn scale_multiplier(scale: &str) -> f64 {
    match scale.to_lowercase().as_str() {
        "thousand" => 1e3,
        "million" => 1e6,
        "billion" => 1e9,
        "trillion" => 1e12,
        _ => 1.0,
    }
}

/// Parse a dollar literal such as `5,691,000,000` with an optional scale word.
///
/// Never fails: anything unparseable, negative or non-finite is `0.0`.
pub fn parse_amount(literal: &str, scale: Option<&str>) -> f64 {
    let cleaned: String = literal.trim().chars().filter(|c| *c != ',').collect();
    let value = match cleaned.parse::<f64>() {
        Ok(v) => v * scale.map(scale_multiplier).unwrap_or(1.0),
        Err(_) => return 0.0,
    };

    if value.is_finite() && value >= 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100,000,000", None), 100_000_000.0);
        assert_eq!(parse_amount("500", Some("million")), 500_000_000.0);
        assert_eq!(parse_amount("1.5", Some("billion")), 1_500_000_000.0);
        assert_eq!(parse_amount("2", Some("Trillion")), 2e12);
        assert_eq!(parse_amount("7", Some("dozen")), 7.0);
    }

    #[test]
    fn test_parse_amount_never_fails() {
        assert_eq!(parse_amount("not-a-number", None), 0.0);
        assert_eq!(parse_amount("", Some("million")), 0.0);
        assert_eq!(parse_amount("-5", None), 0.0);
        assert_eq!(parse_amount("inf", None), 0.0);
        assert_eq!(parse_amount("NaN", None), 0.0);
    }

    #[test]
    fn test_extract_all_amounts() {
        let text = "$5,691,000,000, for ships and $1.5 billion for aircraft";
        let amounts = AmountExtractor::new().extract_all(text);

        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts[0].display, "$5,691,000,000");
        assert_eq!(amounts[0].value, 5_691_000_000.0);
        assert_eq!(&text[amounts[0].start..amounts[0].end], "$5,691,000,000");
        assert_eq!(amounts[1].display, "$1.5 billion");
        assert_eq!(amounts[1].value, 1_500_000_000.0);
    }

    #[test]
    fn test_extract_first() {
        let amount = AmountExtractor::new().extract("pay $ 250 Million now").unwrap();
        assert_eq!(amount.display, "$250 Million");
        assert_eq!(amount.value, 250_000_000.0);
        assert!(AmountExtractor::new().extract("no money here").is_none());
    }
}
