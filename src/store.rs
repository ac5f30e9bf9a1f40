//! Client for the spreadsheet-backed check-in store.
//!
//! The store exposes a single endpoint: a form-encoded `POST` appends a row,
//! and a `GET` with `action=getAllData` returns every row ever written.

use crate::models::{Entry, NewEntry, StoreReply};
use thiserror::Error;

const READ_ACTION: (&str, &str) = ("action", "getAllData");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store rejected the write: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    endpoint: String,
}

impl StoreClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the complete record set. There is no paging or delta query.
    pub async fn fetch_all(&self) -> Result<Vec<Entry>, StoreError> {
        let resp = self.http.get(&self.endpoint).query(&[READ_ACTION]).send().await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    /// Append one check-in. Succeeds only when the store answers
    /// `{"result": "success"}`.
    pub async fn append(&self, entry: &NewEntry) -> Result<(), StoreError> {
        let resp = self.http.post(&self.endpoint).form(entry).send().await?;
        let resp = check_response(resp).await?;
        let reply: StoreReply = resp.json().await?;
        interpret_reply(reply)
    }
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if !resp.status().is_success() {
        return Err(StoreError::Status {
            status: resp.status().as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn interpret_reply(reply: StoreReply) -> Result<(), StoreError> {
    if reply.result == "success" {
        Ok(())
    } else {
        Err(StoreError::Rejected {
            message: reply.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_result_is_accepted() {
        let ok = StoreReply {
            result: "success".to_string(),
            message: None,
        };
        assert!(interpret_reply(ok).is_ok());

        let rejected = StoreReply {
            result: "error".to_string(),
            message: Some("quota exceeded".to_string()),
        };
        match interpret_reply(rejected) {
            Err(StoreError::Rejected { message }) => {
                assert_eq!(message.as_deref(), Some("quota exceeded"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn new_entry_is_form_encoded_with_string_level() {
        let entry = NewEntry {
            name: "Mina".to_string(),
            level: "4".to_string(),
            keywords: "sunny, calm".to_string(),
        };
        let client = StoreClient::new("http://127.0.0.1:9/exec");
        let request = client.http.post(client.endpoint()).form(&entry).build().unwrap();
        let body = request.body().and_then(|body| body.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "name=Mina&level=4&keywords=sunny%2C+calm"
        );
    }
}
