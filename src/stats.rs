use crate::day::parse_timestamp;
use crate::models::Entry;
use chrono::FixedOffset;
use serde::Serialize;
use std::fmt;

pub const RECENT_LOG_LEN: usize = 5;
pub const ANONYMOUS: &str = "anonymous";

pub const EMPTY_STATUS: &str = "No check-ins yet today.";
pub const EMPTY_MISSION: &str = "Leave the first check-in of the day!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Neutral,
    Low,
}

impl Tone {
    pub fn from_average(average: f64) -> Self {
        if average >= 4.0 {
            Tone::Positive
        } else if average >= 2.5 {
            Tone::Neutral
        } else {
            Tone::Low
        }
    }

    fn status_suffix(self) -> &'static str {
        match self {
            Tone::Positive => " 😊 The mood is great!",
            Tone::Neutral => " 🙂 A steady day.",
            Tone::Low => " 🫤 Energy is a little low today.",
        }
    }

    pub fn mission(self) -> &'static str {
        match self {
            Tone::Positive => "✨ Mission: give the person next to you a compliment",
            Tone::Neutral => "🤝 Mission: recall one thing you were grateful for today",
            Tone::Low => "🙏 Mission: take a deep breath and rest your eyes for 10 seconds",
        }
    }
}

/// One line of the recent-entries log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub time: String,
    pub name: String,
    pub level: Option<u8>,
    pub keywords: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.time, self.name)?;
        match self.level {
            Some(level) if level > 0 => write!(f, "{level} pts")?,
            _ => f.write_str("? pts")?,
        }
        if !self.keywords.is_empty() {
            write!(f, " (keywords: {})", self.keywords)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySummary {
    pub count: usize,
    pub average: f64,
    pub fill_percent: f64,
    pub tone: Option<Tone>,
    pub status_message: String,
    pub mission_message: String,
    pub recent_log: Vec<LogLine>,
}

impl TodaySummary {
    fn empty() -> Self {
        Self {
            count: 0,
            average: 0.0,
            fill_percent: 0.0,
            tone: None,
            status_message: EMPTY_STATUS.to_string(),
            mission_message: EMPTY_MISSION.to_string(),
            recent_log: Vec::new(),
        }
    }

    pub fn average_text(&self) -> String {
        format_average(self.average)
    }
}

/// Aggregates today's entries. `todays` is expected in fetch order.
pub fn summarize(todays: &[Entry], tz: FixedOffset) -> TodaySummary {
    if todays.is_empty() {
        return TodaySummary::empty();
    }

    let count = todays.len();
    let total: u32 = todays.iter().map(Entry::level_or_zero).sum();
    let average = f64::from(total) / count as f64;
    let tone = Tone::from_average(average);

    let noun = if count == 1 { "check-in" } else { "check-ins" };
    let status_message = format!(
        "{count} {noun} today. Average {}{}",
        format_average(average),
        tone.status_suffix()
    );

    TodaySummary {
        count,
        average,
        fill_percent: fill_percent(average),
        tone: Some(tone),
        status_message,
        mission_message: tone.mission().to_string(),
        recent_log: recent_log(todays, tz),
    }
}

/// Maps an average on the 1..=5 scale onto 0..=100, clamped.
pub fn fill_percent(average: f64) -> f64 {
    (((average - 1.0) / 4.0) * 100.0).clamp(0.0, 100.0)
}

/// One decimal place, halves rounded away from zero.
pub fn format_average(average: f64) -> String {
    format!("{:.1}", (average * 10.0).round() / 10.0)
}

fn recent_log(todays: &[Entry], tz: FixedOffset) -> Vec<LogLine> {
    let start = todays.len().saturating_sub(RECENT_LOG_LEN);
    todays[start..]
        .iter()
        .rev()
        .map(|entry| LogLine {
            time: parse_timestamp(&entry.timestamp, tz)
                .map(|stamp| stamp.with_timezone(&tz).format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string()),
            name: display_name(&entry.name),
            level: entry.level,
            keywords: entry.keywords.trim().to_string(),
        })
        .collect()
}

fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        ANONYMOUS.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_timezone;

    fn entry(level: Option<u8>, timestamp: &str) -> Entry {
        Entry {
            name: String::new(),
            level,
            keywords: String::new(),
            timestamp: timestamp.to_string(),
        }
    }

    fn levels(levels: &[u8]) -> Vec<Entry> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| entry(Some(*level), &format!("2026-01-05T0{i}:00:00Z")))
            .collect()
    }

    #[test]
    fn empty_day_has_placeholder_summary() {
        let summary = summarize(&[], default_timezone());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_text(), "0.0");
        assert_eq!(summary.fill_percent, 0.0);
        assert_eq!(summary.tone, None);
        assert_eq!(summary.status_message, EMPTY_STATUS);
        assert_eq!(summary.mission_message, EMPTY_MISSION);
        assert!(summary.recent_log.is_empty());
    }

    #[test]
    fn three_entries_example() {
        let summary = summarize(&levels(&[5, 4, 3]), default_timezone());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.average_text(), "4.0");
        assert_eq!(summary.fill_percent, 75.0);
        assert_eq!(summary.tone, Some(Tone::Positive));
        assert_eq!(
            summary.status_message,
            "3 check-ins today. Average 4.0 😊 The mood is great!"
        );
        assert_eq!(summary.mission_message, Tone::Positive.mission());
    }

    #[test]
    fn single_entry_status_is_singular() {
        let summary = summarize(&levels(&[2]), default_timezone());
        assert_eq!(
            summary.status_message,
            "1 check-in today. Average 2.0 🫤 Energy is a little low today."
        );
    }

    #[test]
    fn average_is_exact_before_rounding() {
        let summary = summarize(&levels(&[1, 2, 2]), default_timezone());
        assert_eq!(summary.average, 5.0 / 3.0);
        assert_eq!(summary.average_text(), "1.7");
        assert_eq!(summary.tone, Some(Tone::Low));

        let halves = summarize(&levels(&[4, 4, 5, 4]), default_timezone());
        assert_eq!(halves.average, 4.25);
        assert_eq!(halves.average_text(), "4.3");
    }

    #[test]
    fn missing_levels_count_as_zero() {
        let entries = vec![
            entry(Some(5), "2026-01-05T01:00:00Z"),
            entry(None, "2026-01-05T02:00:00Z"),
        ];
        let summary = summarize(&entries, default_timezone());
        assert_eq!(summary.average, 2.5);
        assert_eq!(summary.tone, Some(Tone::Neutral));
        assert_eq!(summary.recent_log[0].to_string(), "[11:00] anonymous: ? pts");
    }

    #[test]
    fn fill_percent_is_clamped() {
        assert_eq!(fill_percent(0.0), 0.0);
        assert_eq!(fill_percent(1.0), 0.0);
        assert_eq!(fill_percent(3.0), 50.0);
        assert_eq!(fill_percent(5.0), 100.0);
        assert_eq!(fill_percent(7.5), 100.0);
        assert_eq!(fill_percent(-2.0), 0.0);
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(Tone::from_average(4.0), Tone::Positive);
        assert_eq!(Tone::from_average(3.99), Tone::Neutral);
        assert_eq!(Tone::from_average(2.5), Tone::Neutral);
        assert_eq!(Tone::from_average(2.49), Tone::Low);
        assert_eq!(Tone::from_average(0.0), Tone::Low);
    }

    #[test]
    fn recent_log_is_last_five_newest_first() {
        let mut entries = levels(&[1, 2, 3, 4, 5, 5, 4]);
        entries[6].name = "Mina".to_string();
        entries[6].keywords = " sunny ".to_string();

        let log = summarize(&entries, default_timezone()).recent_log;
        assert_eq!(log.len(), 5);
        let levels: Vec<Option<u8>> = log.iter().map(|line| line.level).collect();
        assert_eq!(levels, vec![Some(4), Some(5), Some(5), Some(4), Some(3)]);
        assert_eq!(log[0].to_string(), "[15:00] Mina: 4 pts (keywords: sunny)");
        assert_eq!(log[1].to_string(), "[14:00] anonymous: 5 pts");
    }

    #[test]
    fn short_day_logs_every_entry() {
        let log = summarize(&levels(&[3, 4]), default_timezone()).recent_log;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].time, "10:00");
        assert_eq!(log[1].time, "09:00");
    }
}
