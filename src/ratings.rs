//! Typed client for the ratings REST service.
//!
//! Five operations, one request path: every call goes out through
//! [`RatingsClient`] with a fixed timeout, non-2xx responses are turned into
//! [`RatingsError::Server`] with a best-effort `message` extraction from the
//! JSON body. The wire structs pin the service's field names; both the client
//! and the bundled dev backend share them.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::review::{RatingSummary, VoteChoice};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Page size the review panel loads; the service itself accepts any limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Where the ratings service lives. Empty base means same origin, which is
/// the bundled dev backend. Point `RATINGS_BASE` at an external service at
/// build time to override.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingsConfig {
    pub base_url: String,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("RATINGS_BASE")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingsError {
    /// Transport failure or timeout; no response from the service.
    #[error("request failed: {0}")]
    Network(String),
    /// The service answered with a non-2xx status.
    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },
}

impl RatingsError {
    /// Message for the notification channel: the server's own message when it
    /// sent one, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RatingsError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// --- wire shapes -----------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePayload {
    #[serde(rename = "idComprador")]
    pub buyer_id: i64,
    #[serde(rename = "idVendedor")]
    pub seller_id: i64,
    #[serde(rename = "nombreComprador")]
    pub buyer_name: String,
    #[serde(rename = "puntuacion")]
    pub rating: u8,
    #[serde(rename = "comentario", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateAction {
    Created,
    Updated,
}

/// Upsert outcome; the server decides created-vs-updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateOutcome {
    #[serde(rename = "idResena")]
    pub review_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RateAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotePayload {
    #[serde(rename = "idUsuario")]
    pub user_id: i64,
    #[serde(rename = "voto")]
    pub vote: VoteChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "idComprador")]
    pub buyer_id: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VoteTotals {
    pub up: u32,
    pub down: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireReview {
    #[serde(rename = "idResena")]
    pub review_id: String,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "puntuacion")]
    pub rating: u8,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "idComprador")]
    pub buyer_id: i64,
    #[serde(rename = "nombreComprador")]
    pub buyer_name: String,
    #[serde(rename = "votos", default)]
    pub votes: VoteTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsPage {
    pub items: Vec<WireReview>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageResponse {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub average: f64,
    pub count: u32,
}

// --- client ----------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RatingsClient {
    base_url: String,
}

impl RatingsClient {
    pub fn new(config: &RatingsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
        }
    }

    /// Aggregate rating for a product. A product nobody rated yet is not an
    /// error: a 404 from the service normalizes to `{0, 0}`.
    pub async fn get_average(&self, product_id: i64) -> Result<RatingSummary, RatingsError> {
        let url = format!("{}/ratings/{}/average", self.base_url, product_id);
        match execute(Request::get(&url).send()).await {
            Ok(response) => {
                let body: AverageResponse = parse_json(response).await?;
                Ok(RatingSummary {
                    average: body.average,
                    count: body.count,
                })
            }
            Err(RatingsError::Server { status: 404, .. }) => Ok(RatingSummary::default()),
            Err(e) => Err(e),
        }
    }

    /// One page of comments, newest first (ordering is the server's job).
    pub async fn list_comments(
        &self,
        product_id: i64,
        limit: u32,
        offset: u32,
    ) -> Result<CommentsPage, RatingsError> {
        let url = format!(
            "{}/ratings/{}/comments?limit={}&offset={}",
            self.base_url, product_id, limit, offset
        );
        let response = execute(Request::get(&url).send()).await?;
        parse_json(response).await
    }

    /// Create-or-update, keyed by (product, buyer) on the server.
    pub async fn rate_product(
        &self,
        product_id: i64,
        payload: &RatePayload,
    ) -> Result<RateOutcome, RatingsError> {
        let url = format!("{}/ratings/{}", self.base_url, product_id);
        let request = Request::post(&url)
            .json(payload)
            .map_err(|e| RatingsError::Network(e.to_string()))?;
        let response = execute(request.send()).await?;
        parse_json(response).await
    }

    /// Cast a helpfulness vote. Repeated identical votes are the server's
    /// concern, nothing is validated client-side here.
    pub async fn vote_review(
        &self,
        review_id: &str,
        payload: &VotePayload,
    ) -> Result<(), RatingsError> {
        let url = format!("{}/ratings/comments/{}/vote", self.base_url, review_id);
        let request = Request::post(&url)
            .json(payload)
            .map_err(|e| RatingsError::Network(e.to_string()))?;
        execute(request.send()).await?;
        Ok(())
    }

    /// Delete a review. Authorship is enforced server-side; the caller only
    /// pre-checks identity to gate the affordance.
    pub async fn delete_review(
        &self,
        review_id: &str,
        payload: &DeletePayload,
    ) -> Result<(), RatingsError> {
        let url = format!("{}/ratings/comments/{}", self.base_url, review_id);
        let request = Request::delete(&url)
            .json(payload)
            .map_err(|e| RatingsError::Network(e.to_string()))?;
        execute(request.send()).await?;
        Ok(())
    }
}

/// Awaits the request against the fixed timeout and classifies the outcome.
async fn execute<F>(send: F) -> Result<Response, RatingsError>
where
    F: Future<Output = Result<Response, gloo_net::Error>>,
{
    let timeout = gloo_timers::future::sleep(REQUEST_TIMEOUT);
    pin_mut!(send, timeout);
    let response = match future::select(send, timeout).await {
        Either::Left((result, _)) => result.map_err(|e| RatingsError::Network(e.to_string()))?,
        Either::Right(_) => return Err(RatingsError::Network("request timed out".to_string())),
    };
    if response.ok() {
        Ok(response)
    } else {
        Err(error_from(response).await)
    }
}

/// Best-effort extraction of the service's `message` field.
async fn error_from(response: Response) -> RatingsError {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });
    RatingsError::Server { status, message }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, RatingsError> {
    response
        .json::<T>()
        .await
        .map_err(|e| RatingsError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rate_payload_uses_service_field_names() {
        let payload = RatePayload {
            buyer_id: 10,
            seller_id: 45,
            buyer_name: "UserTest".into(),
            rating: 5,
            comment: Some("Great jacket".into()),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "idComprador": 10,
                "idVendedor": 45,
                "nombreComprador": "UserTest",
                "puntuacion": 5,
                "comentario": "Great jacket",
            })
        );
    }

    #[test]
    fn empty_comment_is_omitted_from_the_payload() {
        let payload = RatePayload {
            buyer_id: 10,
            seller_id: 45,
            buyer_name: "UserTest".into(),
            rating: 3,
            comment: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("comentario").is_none());
    }

    #[test]
    fn vote_payload_serializes_choice_lowercase() {
        let up = serde_json::to_value(VotePayload {
            user_id: 10,
            vote: VoteChoice::Up,
        })
        .unwrap();
        assert_eq!(up, json!({ "idUsuario": 10, "voto": "up" }));
        let down = serde_json::to_value(VotePayload {
            user_id: 10,
            vote: VoteChoice::Down,
        })
        .unwrap();
        assert_eq!(down["voto"], "down");
    }

    #[test]
    fn delete_payload_carries_buyer_id() {
        let value = serde_json::to_value(DeletePayload { buyer_id: 10 }).unwrap();
        assert_eq!(value, json!({ "idComprador": 10 }));
    }

    #[test]
    fn parses_comments_page() {
        let body = json!({
            "items": [{
                "idResena": "r-9",
                "comentario": null,
                "puntuacion": 5,
                "fecha": "2026-08-02T09:00:00Z",
                "idComprador": 7,
                "nombreComprador": "Ana",
                "votos": { "up": 2, "down": 0 },
            }],
            "total": 11,
            "limit": 10,
            "offset": 0,
        });
        let page: CommentsPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.total, 11);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].review_id, "r-9");
        assert!(page.items[0].comment.is_none());
        assert_eq!(page.items[0].votes.up, 2);
    }

    #[test]
    fn parses_upsert_outcome_action() {
        let outcome: RateOutcome =
            serde_json::from_value(json!({ "idResena": "r-1", "action": "updated" })).unwrap();
        assert_eq!(outcome.action, Some(RateAction::Updated));

        // older deployments omit the action field
        let outcome: RateOutcome = serde_json::from_value(json!({ "idResena": "r-1" })).unwrap();
        assert!(outcome.action.is_none());
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = RatingsError::Server {
            status: 400,
            message: Some("rating must be between 1 and 5".into()),
        };
        assert_eq!(
            err.user_message("Could not submit the review."),
            "rating must be between 1 and 5"
        );

        let err = RatingsError::Network("timed out".into());
        assert_eq!(
            err.user_message("Could not submit the review."),
            "Could not submit the review."
        );
    }
}
