//! Projection of the aggregated day onto what the dashboard shows.
//!
//! Every variant, including the load error, carries a full [`TodayView`], so
//! the page script applies it verbatim and never keeps numbers from an
//! earlier state.

use crate::keywords::ranked;
use crate::stats::TodaySummary;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NO_KEYWORDS: &str = "No keywords yet today.";
pub const LOAD_ERROR: &str = "There was a problem loading the data.";

/// Options handed to the word cloud widget, named as the widget expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCloudConfig {
    pub grid_size: u32,
    pub weight_factor: u32,
    pub font_family: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
    pub rotate_ratio: f64,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            weight_factor: 12,
            font_family: r#"-apple-system,BlinkMacSystemFont,"Pretendard",system-ui,sans-serif"#,
            color: "random-dark",
            background_color: "#fafafa",
            rotate_ratio: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordCloud {
    Words {
        list: Vec<(String, u32)>,
        config: WordCloudConfig,
    },
    Placeholder {
        text: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayView {
    pub date: String,
    pub count: String,
    pub average: String,
    pub fill_percent: f64,
    pub status: String,
    pub mission: String,
    pub log: Vec<String>,
    pub cloud: WordCloud,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    /// At least one check-in today.
    Ready(TodayView),
    /// Nothing recorded yet today; every number reads zero.
    Empty(TodayView),
    /// The fetch failed. Numbers read `-`, the log is cleared and both
    /// panels show the load error instead of data.
    Unavailable(TodayView),
}

impl DisplayState {
    pub fn project(date: String, summary: &TodaySummary, freq: &BTreeMap<String, u32>) -> Self {
        let cloud = if freq.is_empty() {
            WordCloud::Placeholder { text: NO_KEYWORDS }
        } else {
            WordCloud::Words {
                list: ranked(freq),
                config: WordCloudConfig::default(),
            }
        };

        let view = TodayView {
            date,
            count: summary.count.to_string(),
            average: summary.average_text(),
            fill_percent: summary.fill_percent,
            status: summary.status_message.clone(),
            mission: summary.mission_message.clone(),
            log: summary.recent_log.iter().map(ToString::to_string).collect(),
            cloud,
        };

        if summary.count == 0 {
            DisplayState::Empty(view)
        } else {
            DisplayState::Ready(view)
        }
    }

    pub fn unavailable() -> Self {
        DisplayState::Unavailable(TodayView {
            date: String::new(),
            count: "-".to_string(),
            average: "-".to_string(),
            fill_percent: 0.0,
            status: LOAD_ERROR.to_string(),
            mission: String::new(),
            log: Vec::new(),
            cloud: WordCloud::Placeholder { text: LOAD_ERROR },
        })
    }

    pub fn view(&self) -> &TodayView {
        match self {
            DisplayState::Ready(view)
            | DisplayState::Empty(view)
            | DisplayState::Unavailable(view) => view,
        }
    }
}
