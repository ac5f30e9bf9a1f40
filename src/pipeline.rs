use crate::day::{filter_today, local_date};
use crate::display::{DisplayState, LOAD_ERROR};
use crate::errors::AppError;
use crate::keywords::keyword_frequencies;
use crate::models::Entry;
use crate::state::AppState;
use crate::stats::summarize;
use chrono::{DateTime, FixedOffset, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Builds the display state for `now` from the full record set.
pub fn build_display(entries: Vec<Entry>, now: DateTime<Utc>, tz: FixedOffset) -> DisplayState {
    let total = entries.len();
    let todays = filter_today(entries, now, tz);
    debug!(total, today = todays.len(), "filtered record set");

    let summary = summarize(&todays, tz);
    let freq = keyword_frequencies(&todays);
    DisplayState::project(local_date(&now, tz).to_string(), &summary, &freq)
}

/// Orders concurrent refreshes. Each refresh takes a ticket before it
/// fetches; a result is published only if no newer ticket has already
/// published one.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    issued: AtomicU64,
    latest: Mutex<Option<(u64, DisplayState)>>,
}

impl RefreshSequencer {
    pub fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes `state` under `ticket` and returns what callers should show:
    /// `state` itself, or the newer state when `ticket` is stale.
    pub async fn publish(&self, ticket: u64, state: DisplayState) -> DisplayState {
        let mut latest = self.latest.lock().await;
        if let Some((published, newer)) = latest.as_ref() {
            if *published > ticket {
                debug!(ticket, published, "discarding stale refresh");
                return newer.clone();
            }
        }
        *latest = Some((ticket, state.clone()));
        state
    }

    /// The newer published state, if `ticket` has been overtaken.
    pub async fn newer_than(&self, ticket: u64) -> Option<DisplayState> {
        let latest = self.latest.lock().await;
        latest
            .as_ref()
            .filter(|(published, _)| *published > ticket)
            .map(|(_, state)| state.clone())
    }
}

/// Fetch, filter, aggregate and project one refresh cycle.
pub async fn refresh(state: &AppState) -> Result<DisplayState, AppError> {
    let ticket = state.refreshes.ticket();

    match state.store.fetch_all().await {
        Ok(entries) => {
            let display = build_display(entries, Utc::now(), state.timezone);
            Ok(state.refreshes.publish(ticket, display).await)
        }
        Err(err) => {
            if let Some(newer) = state.refreshes.newer_than(ticket).await {
                debug!(ticket, "ignoring failure of stale refresh");
                return Ok(newer);
            }
            error!("failed to load check-ins: {err}");
            Err(AppError::bad_gateway(LOAD_ERROR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_timezone;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn checkin(level: u8, keywords: &str, timestamp: &str) -> Entry {
        Entry {
            name: String::new(),
            level: Some(level),
            keywords: keywords.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn build_display_uses_only_todays_entries() {
        let now = at("2026-01-05T06:00:00Z");
        let entries = vec![
            checkin(1, "gloomy", "2026-01-03T06:00:00Z"),
            checkin(5, "happy, sunny", "2026-01-05T01:00:00Z"),
            checkin(4, "sunny!", "2026-01-05T02:00:00Z"),
            checkin(3, "", "2026-01-05T03:00:00Z"),
        ];

        let state = build_display(entries, now, default_timezone());
        let DisplayState::Ready(view) = state else {
            panic!("expected ready state");
        };
        assert_eq!(view.date, "2026-01-05");
        assert_eq!(view.count, "3");
        assert_eq!(view.average, "4.0");
        assert_eq!(view.fill_percent, 75.0);
        assert_eq!(view.log.len(), 3);
        match view.cloud {
            crate::display::WordCloud::Words { list, .. } => {
                assert_eq!(list, vec![("sunny".to_string(), 2), ("happy".to_string(), 1)]);
            }
            other => panic!("expected words, got {other:?}"),
        }
    }

    #[test]
    fn nothing_today_is_empty_state() {
        let now = at("2026-01-05T06:00:00Z");
        let entries = vec![checkin(4, "old", "2026-01-01T06:00:00Z")];
        assert!(matches!(
            build_display(entries, now, default_timezone()),
            DisplayState::Empty(_)
        ));
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let sequencer = RefreshSequencer::default();
        let first = sequencer.ticket();
        let second = sequencer.ticket();
        assert!(second > first);

        let fresh = DisplayState::unavailable();
        let stale = build_display(Vec::new(), Utc::now(), default_timezone());

        assert_eq!(sequencer.publish(second, fresh.clone()).await, fresh);
        assert_eq!(sequencer.publish(first, stale).await, fresh);
        assert_eq!(sequencer.newer_than(first).await, Some(fresh));
        assert_eq!(sequencer.newer_than(second).await, None);
    }

    #[tokio::test]
    async fn newer_results_replace_older_ones() {
        let sequencer = RefreshSequencer::default();
        let first = sequencer.ticket();
        let second = sequencer.ticket();

        let older = DisplayState::unavailable();
        let newer = build_display(Vec::new(), Utc::now(), default_timezone());
        sequencer.publish(first, older).await;
        assert_eq!(sequencer.publish(second, newer.clone()).await, newer);
    }
}
