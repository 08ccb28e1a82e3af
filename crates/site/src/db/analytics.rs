//! Analytics event recording.

use sqlx::PgPool;
use sqlx::types::Json;

use linkbio_core::{AnalyticsEventId, EventType};

use super::RepositoryError;

/// Longest user agent string stored with an event.
const MAX_USER_AGENT_LEN: usize = 512;

/// Repository for appending analytics events.
pub struct AnalyticsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnalyticsRepository<'a> {
    /// Create a new analytics repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record(
        &self,
        event_type: EventType,
        event_data: &serde_json::Value,
        user_agent: Option<&str>,
    ) -> Result<AnalyticsEventId, RepositoryError> {
        let user_agent = user_agent.map(truncate_user_agent);

        let id = sqlx::query_scalar::<_, AnalyticsEventId>(
            r"
            INSERT INTO analytics (event_type, event_data, user_agent)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(event_type.as_str())
        .bind(Json(event_data))
        .bind(user_agent)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}

fn truncate_user_agent(user_agent: &str) -> &str {
    if user_agent.len() <= MAX_USER_AGENT_LEN {
        return user_agent;
    }
    let mut end = MAX_USER_AGENT_LEN;
    while !user_agent.is_char_boundary(end) {
        end -= 1;
    }
    user_agent.get(..end).unwrap_or_default()
}
