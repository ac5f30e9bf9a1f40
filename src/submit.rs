use crate::errors::{AppError, BUSY_MESSAGE, VALIDATION_MESSAGE};
use crate::models::{CheckinRequest, NewEntry};
use crate::store::StoreClient;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::info;

pub const SUCCESS_MESSAGE: &str = "✅ Submitted!";

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Tracks which submitters have a write in flight. Each submitter (one open
/// page) gets at most one; different submitters never block each other.
#[derive(Debug, Default)]
pub struct SubmitGate {
    in_flight: Mutex<HashSet<String>>,
}

/// Held for the duration of one write; frees the submitter's slot on drop.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    gate: &'a SubmitGate,
    submitter: String,
}

impl SubmitGate {
    pub fn try_acquire(&self, submitter: &str) -> Option<SubmitPermit<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.insert(submitter.to_string()).then(|| SubmitPermit {
            gate: self,
            submitter: submitter.to_string(),
        })
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .gate
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.remove(&self.submitter);
    }
}

/// Checks the presence of a level and trims the free-text fields.
pub fn validate(request: CheckinRequest) -> Result<NewEntry, AppError> {
    let level = request
        .level
        .filter(|level| (MIN_LEVEL..=MAX_LEVEL).contains(level))
        .ok_or_else(|| AppError::bad_request(VALIDATION_MESSAGE))?;

    Ok(NewEntry {
        name: request.name.trim().to_string(),
        level: level.to_string(),
        keywords: request.keywords.trim().to_string(),
    })
}

/// Validates and writes one check-in. Validation runs before the gate, so an
/// invalid request never blocks a valid one. Requests without a client id
/// (plain form posts) are not gated.
pub async fn submit_checkin(
    store: &StoreClient,
    gate: &SubmitGate,
    request: CheckinRequest,
) -> Result<(), AppError> {
    let submitter = request.client_id.trim().to_string();
    let entry = validate(request)?;
    let _permit = if submitter.is_empty() {
        None
    } else {
        Some(
            gate.try_acquire(&submitter)
                .ok_or_else(|| AppError::conflict(BUSY_MESSAGE))?,
        )
    };

    store.append(&entry).await?;
    info!(level = %entry.level, "check-in stored");
    Ok(())
}
