use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use sqlx::PgPool;

use crate::models::{Exercise, ExerciseAnalytics, StatsSummary, Workout, WorkoutSet};

const RECENT_LIMIT: i64 = 5;
const HISTORY_LIMIT: i64 = 100;

/// Optional, conjunctive filters for the workout history listing.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub search: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Read-only queries over committed workout data.
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Dashboard totals: workout count, heaviest single set, and average
    /// workouts per week over the recorded span.
    pub async fn stats(&self) -> Result<StatsSummary> {
        let workouts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
            .fetch_one(&self.db)
            .await?;

        let heaviest: Option<f64> = sqlx::query_scalar("SELECT MAX(weight_kg) FROM sets")
            .fetch_one(&self.db)
            .await?;

        let (first, last): (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(start_time), MAX(start_time) FROM workouts")
                .fetch_one(&self.db)
                .await?;

        Ok(StatsSummary {
            workouts,
            avg_per_week: average_per_week(workouts, first, last),
            heaviest,
        })
    }

    pub async fn recent(&self) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            "SELECT id, title, start_time, notes FROM workouts ORDER BY start_time DESC LIMIT $1",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(workouts)
    }

    /// Workout history, newest first, capped at 100 rows. Each supplied
    /// filter narrows the result; filters combine with AND.
    pub async fn history(&self, filter: &HistoryFilter) -> Result<Vec<Workout>> {
        let query = build_history_query(filter);

        let mut query_builder = sqlx::query_as::<_, Workout>(&query);

        if let Some(search) = &filter.search {
            query_builder = query_builder.bind(format!("%{}%", search));
        }
        if let Some(start) = filter.start_date {
            query_builder = query_builder.bind(start);
        }
        if let Some(end) = filter.end_date {
            query_builder = query_builder.bind(end);
        }

        let workouts = query_builder.fetch_all(&self.db).await?;
        Ok(workouts)
    }

    /// All sets of one workout with their exercise titles, in insertion
    /// order.
    pub async fn workout_detail(&self, workout_id: i64) -> Result<Vec<WorkoutSet>> {
        let sets = sqlx::query_as::<_, WorkoutSet>(
            "SELECT s.id, s.workout_id, s.exercise_id, s.set_order, s.weight_kg, s.reps, s.rpe, s.set_type, s.notes, \
                    e.title AS exercise_name \
             FROM sets s \
             JOIN exercises e ON s.exercise_id = e.id \
             WHERE s.workout_id = $1 \
             ORDER BY s.id ASC",
        )
        .bind(workout_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sets)
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let exercises =
            sqlx::query_as::<_, Exercise>("SELECT id, title FROM exercises ORDER BY title ASC")
                .fetch_all(&self.db)
                .await?;

        Ok(exercises)
    }

    /// Progress series for one exercise: working sets only, grouped by the
    /// parent workout's start time. Per group: max weight and total volume
    /// (sum of weight times reps).
    pub async fn exercise_analytics(&self, exercise_id: i64) -> Result<ExerciseAnalytics> {
        let rows: Vec<(DateTime<Utc>, f64, f64)> = sqlx::query_as(
            "SELECT w.start_time, MAX(s.weight_kg) AS max_weight, SUM(s.weight_kg * s.reps) AS total_volume \
             FROM sets s \
             JOIN workouts w ON s.workout_id = w.id \
             WHERE s.exercise_id = $1 AND s.set_type = 'normal' \
             GROUP BY w.start_time \
             ORDER BY w.start_time ASC",
        )
        .bind(exercise_id)
        .fetch_all(&self.db)
        .await?;

        let mut analytics = ExerciseAnalytics {
            labels: Vec::with_capacity(rows.len()),
            weight_data: Vec::with_capacity(rows.len()),
            volume_data: Vec::with_capacity(rows.len()),
        };

        for (start_time, max_weight, total_volume) in rows {
            analytics.labels.push(date_label(start_time));
            analytics.weight_data.push(max_weight);
            analytics.volume_data.push(total_volume);
        }

        Ok(analytics)
    }
}

fn build_history_query(filter: &HistoryFilter) -> String {
    let mut query = "SELECT id, title, start_time, notes FROM workouts WHERE 1=1".to_string();
    let mut param_count = 1;

    if filter.search.is_some() {
        query.push_str(&format!(
            " AND (title ILIKE ${} OR notes ILIKE ${})",
            param_count, param_count
        ));
        param_count += 1;
    }

    if filter.start_date.is_some() {
        query.push_str(&format!(" AND start_time >= ${}", param_count));
        param_count += 1;
    }

    if filter.end_date.is_some() {
        query.push_str(&format!(" AND start_time <= ${}", param_count));
    }

    query.push_str(&format!(" ORDER BY start_time DESC LIMIT {}", HISTORY_LIMIT));
    query
}

/// Parse a history date bound: a bare date (UTC midnight) or a full
/// RFC 3339 / `YYYY-MM-DD HH:MM:SS` timestamp. Unparseable input is
/// treated as no bound.
pub fn parse_date_bound(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Average workouts per week over the inclusive day span between the first
/// and last workout, the span rounded up to whole days. Histories shorter
/// than a week report the raw workout count instead of a rate.
fn average_per_week(
    total: i64,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
) -> String {
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return "0.0".to_string(),
    };

    let span_secs = (last - first).num_seconds().max(0);
    let days = (span_secs as f64 / 86_400.0).ceil();
    let weeks = days / 7.0;

    if weeks < 1.0 {
        total.to_string()
    } else {
        format!("{:.1}", total as f64 / weeks)
    }
}

fn date_label(ts: DateTime<Utc>) -> String {
    format!("{}/{}/{}", ts.month(), ts.day(), ts.year())
}
