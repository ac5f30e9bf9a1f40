use crate::config::Config;
use crate::pipeline::RefreshSequencer;
use crate::store::StoreClient;
use crate::submit::SubmitGate;
use chrono::FixedOffset;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
    pub timezone: FixedOffset,
    pub refreshes: Arc<RefreshSequencer>,
    pub submits: Arc<SubmitGate>,
}

impl AppState {
    pub fn new(store: StoreClient, timezone: FixedOffset) -> Self {
        Self {
            store,
            timezone,
            refreshes: Arc::new(RefreshSequencer::default()),
            submits: Arc::new(SubmitGate::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(StoreClient::new(config.store_url.clone()), config.timezone)
    }
}
