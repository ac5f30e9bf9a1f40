use chrono::{FixedOffset, Offset, Utc};
use std::env;
use tracing::warn;

pub const DEFAULT_STORE_URL: &str = "https://script.google.com/macros/s/AKfycbyUwmm_Pst17S3uWwQxf0SoYTLmumCJoo5eZ4ybBoVqsPWHv0X213371N01kPgiaPG_/exec";

/// Korea Standard Time, which has no daylight saving.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_url: String,
    pub timezone: FixedOffset,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let store_url = env::var("MOOD_STORE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());

        let timezone = match env::var("MOOD_UTC_OFFSET_HOURS") {
            Ok(value) => parse_offset(&value).unwrap_or_else(|| {
                warn!("ignoring invalid MOOD_UTC_OFFSET_HOURS={value:?}");
                default_timezone()
            }),
            Err(_) => default_timezone(),
        };

        Self {
            port,
            store_url,
            timezone,
        }
    }
}

pub fn default_timezone() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let hours = value.trim().trim_start_matches('+').parse::<i32>().ok()?;
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}
