use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One mood check-in as the spreadsheet store returns it.
///
/// Spreadsheet cells come back loosely typed, so every field is parsed
/// leniently: a level may arrive as `5`, `"5"` or an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub keywords: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
}

impl Entry {
    /// Level used for sums; missing levels count as zero.
    pub fn level_or_zero(&self) -> u32 {
        u32::from(self.level.unwrap_or(0))
    }
}

/// Check-in fields sent by the page, either as JSON or as a plain form post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckinRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub keywords: String,
    /// Identifies the open page; one write in flight per client.
    #[serde(default, deserialize_with = "lenient_text")]
    pub client_id: String,
}

/// Validated check-in, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEntry {
    pub name: String,
    pub level: String,
    pub keywords: String,
}

/// Reply body of the store's write call.
#[derive(Debug, Deserialize)]
pub struct StoreReply {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    pub result: &'static str,
    pub message: String,
    pub today: crate::display::DisplayState,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

fn lenient_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LevelVisitor;

    impl<'de> Visitor<'de> for LevelVisitor {
        type Value = Option<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mood level as a number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Option<u8>, E> {
            Ok(u8::try_from(v).ok())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Option<u8>, E> {
            Ok(u8::try_from(v).ok())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Option<u8>, E> {
            if v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&v) {
                Ok(Some(v as u8))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<u8>, E> {
            let trimmed = v.trim();
            if let Ok(level) = trimmed.parse::<u8>() {
                return Ok(Some(level));
            }
            match trimmed.parse::<f64>() {
                Ok(number) => self.visit_f64(number),
                Err(_) => Ok(None),
            }
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Option<u8>, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Option<u8>, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Option<u8>, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Option<u8>, D::Error> {
            d.deserialize_any(LevelVisitor)
        }
    }

    deserializer.deserialize_any(LevelVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_accepts_spreadsheet_shaped_values() {
        let raw = r#"[
            {"name": "Mina", "level": 5, "keywords": "happy", "timestamp": "2026-01-05T01:00:00.000Z"},
            {"name": null, "level": "3", "keywords": 42, "timestamp": "2026-01-05T02:00:00.000Z"},
            {"name": "", "level": "", "keywords": "", "timestamp": ""},
            {"level": 4.0}
        ]"#;
        let entries: Vec<Entry> = serde_json::from_str(raw).unwrap();

        assert_eq!(entries[0].level, Some(5));
        assert_eq!(entries[0].name, "Mina");
        assert_eq!(entries[1].name, "");
        assert_eq!(entries[1].level, Some(3));
        assert_eq!(entries[1].keywords, "42");
        assert_eq!(entries[2].level, None);
        assert_eq!(entries[2].level_or_zero(), 0);
        assert_eq!(entries[3].level, Some(4));
        assert_eq!(entries[3].timestamp, "");
    }

    #[test]
    fn checkin_request_parses_json_without_level() {
        let request: CheckinRequest =
            serde_json::from_str(r#"{"name": "Jun", "keywords": "tired"}"#).unwrap();
        assert_eq!(request.level, None);
        assert_eq!(request.name, "Jun");
    }

    #[test]
    fn store_reply_tolerates_missing_message() {
        let reply: StoreReply = serde_json::from_str(r#"{"result": "error"}"#).unwrap();
        assert_eq!(reply.result, "error");
        assert!(reply.message.is_none());
    }
}
