//! Analytics event types and aggregation.
//!
//! Events are append-only rows of `(event_type, event_data, user_agent,
//! created_at)`. `event_data` is free JSON so older rows with unexpected
//! shapes still count toward totals; only the typed views here interpret it.

use core::fmt;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of events shown in the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Kind of analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    ButtonClick,
}

impl EventType {
    /// Value stored in the `event_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageView => "page_view",
            Self::ButtonClick => "button_click",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised event type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_view" => Ok(Self::PageView),
            "button_click" => Ok(Self::ButtonClick),
            other => Err(UnknownEventType(other.to_owned())),
        }
    }
}

/// Payload of a `page_view` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub page_path: String,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            page_path: "/".to_owned(),
        }
    }
}

/// Payload of a `button_click` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonClick {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_href: Option<String>,
}

impl ButtonClick {
    #[must_use]
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            button_title: Some(title.into()),
            button_href: Some(href.into()),
        }
    }

    /// Read the click fields out of a stored payload, ignoring anything else.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };
        Self {
            button_title: field("button_title"),
            button_href: field("button_href"),
        }
    }
}

/// Click count for one button title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonStat {
    pub button_title: String,
    pub click_count: u64,
}

/// Count clicks per button title.
///
/// Payloads without a non-empty `button_title` are skipped. The result is
/// sorted by count descending, ties by title ascending.
pub fn aggregate_button_clicks<'a, I>(payloads: I) -> Vec<ButtonStat>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for payload in payloads {
        match ButtonClick::from_value(payload).button_title {
            Some(title) if !title.is_empty() => *counts.entry(title).or_default() += 1,
            _ => {}
        }
    }

    let mut stats: Vec<ButtonStat> = counts
        .into_iter()
        .map(|(button_title, click_count)| ButtonStat {
            button_title,
            click_count,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.click_count
            .cmp(&a.click_count)
            .then_with(|| a.button_title.cmp(&b.button_title))
    });
    stats
}

/// One entry in the recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl RecentActivity {
    /// Human readable description shown on the dashboard.
    #[must_use]
    pub fn label(&self) -> String {
        if self.event_type == EventType::PageView.as_str() {
            return "Visita na página".to_owned();
        }

        let title = ButtonClick::from_value(&self.event_data)
            .button_title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Botão".to_owned());
        format!("Clique: {title}")
    }

    /// Timestamp in the dashboard's `dd/mm/yyyy, hh:mm:ss` format (UTC).
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.created_at.format("%d/%m/%Y, %H:%M:%S").to_string()
    }
}

/// Dashboard numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_clicks: u64,
    pub button_stats: Vec<ButtonStat>,
    /// Newest first, at most [`RECENT_ACTIVITY_LIMIT`] entries.
    pub recent_activity: Vec<RecentActivity>,
}

impl AnalyticsSummary {
    /// Assemble a summary from raw counts, click payloads and recent rows.
    ///
    /// `recent` is sorted newest first and truncated, so callers may pass
    /// more rows than needed.
    #[must_use]
    pub fn build<'a, I>(
        total_views: u64,
        total_clicks: u64,
        click_payloads: I,
        mut recent: Vec<RecentActivity>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a serde_json::Value>,
    {
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total_views,
            total_clicks,
            button_stats: aggregate_button_clicks(click_payloads),
            recent_activity: recent,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        assert_eq!("page_view".parse::<EventType>().unwrap(), EventType::PageView);
        assert_eq!(EventType::ButtonClick.to_string(), "button_click");
        assert!("scroll".parse::<EventType>().is_err());
        assert_eq!(
            serde_json::to_string(&EventType::ButtonClick).unwrap(),
            "\"button_click\""
        );
    }

    #[test]
    fn test_aggregate_counts_and_sorts() {
        let payloads = [
            json!({"button_title": "FRETE", "button_href": "#frete"}),
            json!({"button_title": "CATÁLOGO"}),
            json!({"button_title": "FRETE"}),
            json!({"button_title": "AVALIAÇÕES"}),
            json!({"button_href": "#nothing"}),
            json!({"button_title": ""}),
            json!(null),
        ];

        let stats = aggregate_button_clicks(&payloads);

        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].button_title, "FRETE");
        assert_eq!(stats[0].click_count, 2);
        assert_eq!(stats[1].button_title, "AVALIAÇÕES");
        assert_eq!(stats[2].button_title, "CATÁLOGO");
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_button_clicks(&[]).is_empty());
    }

    fn activity(event_type: &str, data: serde_json::Value, minute: u32) -> RecentActivity {
        RecentActivity {
            event_type: event_type.to_owned(),
            event_data: data,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            activity("page_view", json!({"page_path": "/"}), 0).label(),
            "Visita na página"
        );
        assert_eq!(
            activity("button_click", json!({"button_title": "FRETE"}), 0).label(),
            "Clique: FRETE"
        );
        assert_eq!(
            activity("button_click", json!({}), 0).label(),
            "Clique: Botão"
        );
    }

    #[test]
    fn test_formatted_date() {
        assert_eq!(
            activity("page_view", json!({}), 7).formatted_date(),
            "01/05/2024, 12:07:00"
        );
    }

    #[test]
    fn test_summary_keeps_ten_newest() {
        let recent: Vec<_> = (0..15)
            .map(|m| activity("page_view", json!({}), m))
            .collect();

        let summary = AnalyticsSummary::build(15, 0, &[], recent);

        assert_eq!(summary.recent_activity.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(summary.recent_activity[0].created_at.format("%M").to_string(), "14");
        assert_eq!(summary.total_views, 15);
    }

    #[test]
    fn test_summary_json_keys() {
        let json = serde_json::to_value(AnalyticsSummary::default()).unwrap();
        assert!(json.get("totalViews").is_some());
        assert!(json.get("buttonStats").is_some());
        assert!(json.get("recentActivity").is_some());
    }

    #[test]
    fn test_page_view_default_path() {
        assert_eq!(PageView::default().page_path, "/");
    }
}
