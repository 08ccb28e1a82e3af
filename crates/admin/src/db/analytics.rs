//! Dashboard queries over the `analytics` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use linkbio_core::analytics::RECENT_ACTIVITY_LIMIT;
use linkbio_core::{AnalyticsSummary, EventType, RecentActivity};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct RecentRow {
    event_type: String,
    event_data: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<RecentRow> for RecentActivity {
    fn from(row: RecentRow) -> Self {
        Self {
            event_type: row.event_type,
            event_data: row.event_data.0,
            created_at: row.created_at,
        }
    }
}

/// Read-only analytics queries.
pub struct AnalyticsQueries<'a> {
    pool: &'a PgPool,
}

impl<'a> AnalyticsQueries<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Totals per event type, per-button click counts and the latest events.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn summary(&self) -> Result<AnalyticsSummary, RepositoryError> {
        let counts: Vec<(String, i64)> = sqlx::query_as(
            r"
            SELECT event_type, COUNT(*)
            FROM analytics
            GROUP BY event_type
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let count_of = |event_type: EventType| {
            counts
                .iter()
                .find(|(name, _)| name == event_type.as_str())
                .map_or(0, |(_, n)| u64::try_from(*n).unwrap_or(0))
        };

        let clicks: Vec<Json<serde_json::Value>> = sqlx::query_scalar(
            r"
            SELECT event_data
            FROM analytics
            WHERE event_type = $1
            ",
        )
        .bind(EventType::ButtonClick.as_str())
        .fetch_all(self.pool)
        .await?;

        let recent = sqlx::query_as::<_, RecentRow>(
            r"
            SELECT event_type, event_data, created_at
            FROM analytics
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(i64::try_from(RECENT_ACTIVITY_LIMIT).unwrap_or(10))
        .fetch_all(self.pool)
        .await?;

        Ok(AnalyticsSummary::build(
            count_of(EventType::PageView),
            count_of(EventType::ButtonClick),
            clicks.iter().map(|Json(value)| value),
            recent.into_iter().map(RecentActivity::from).collect(),
        ))
    }
}
