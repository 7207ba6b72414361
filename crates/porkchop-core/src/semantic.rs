//! Seams for the optional semantic-analysis collaborator.
//!
//! The pipeline never talks to a language model itself. Callers plug in
//! implementations of these traits; every call runs under a timeout and a
//! failure only degrades the section or item it was made for.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::models::bill::{BillContext, SpendingItem};
use crate::models::comparison::SemanticDiff;
use crate::models::score::SemanticScore;

/// Two versions of one section, labelled for the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionComparisonRequest {
    pub text_a: String,
    pub text_b: String,
    /// `"<version> - <heading>"`
    pub label_a: String,
    pub label_b: String,
}

/// Explains what changed between two versions of a section.
#[async_trait]
pub trait SemanticDiffer: Send + Sync {
    async fn compare_sections(
        &self,
        request: SectionComparisonRequest,
    ) -> Result<SemanticDiff, CollaboratorError>;
}

/// Judges how out of place a spending item is within its bill.
#[async_trait]
pub trait SemanticScorer: Send + Sync {
    async fn score_item(
        &self,
        item: &SpendingItem,
        bill: &BillContext,
    ) -> Result<SemanticScore, CollaboratorError>;
}

/// Run a collaborator call, turning an expired deadline into `Timeout`.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CollaboratorError::Timeout(limit)),
    }
}

/// Decode a JSON answer that may be wrapped in a Markdown code fence.
///
/// For collaborator implementations whose provider replies in prose.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, CollaboratorError> {
    let body = fenced_body(raw).unwrap_or(raw).trim();
    serde_json::from_str(body).map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))
}

fn fenced_body(raw: &str) -> Option<&str> {
    let (_, rest) = raw
        .split_once("```json")
        .or_else(|| raw.split_once("```"))?;
    Some(rest.split_once("```").map(|(body, _)| body).unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let ok = with_timeout(Duration::from_secs(1), async { Ok::<_, CollaboratorError>(7) }).await;
        assert_eq!(ok, Ok(7));

        let err = with_timeout(Duration::from_secs(1), async {
            Err::<u8, _>(CollaboratorError::Request("503".into()))
        })
        .await;
        assert_eq!(err, Err(CollaboratorError::Request("503".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let limit = Duration::from_millis(50);
        let result = with_timeout(limit, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, CollaboratorError>(())
        })
        .await;
        assert_eq!(result, Err(CollaboratorError::Timeout(limit)));
    }

    #[test]
    fn test_parse_reply_strips_fences() {
        let raw = "Here you go:\n```json\n{\"score\": 72, \"reasoning\": \"local\"}\n```\nThanks";
        let score: SemanticScore = parse_reply(raw).unwrap();
        assert_eq!(score.score, 72.0);
        assert_eq!(score.reasoning, "local");

        let bare: SemanticScore = parse_reply("```\n{\"score\": 5}\n```").unwrap();
        assert_eq!(bare.score, 5.0);

        let plain: SemanticDiff = parse_reply(r#"{"summary": "No change"}"#).unwrap();
        assert_eq!(plain.summary, "No change");
    }

    #[test]
    fn test_parse_reply_rejects_prose() {
        let err = parse_reply::<SemanticDiff>("I could not compare these.").unwrap_err();
        assert!(matches!(err, CollaboratorError::MalformedResponse(_)));
    }
}
