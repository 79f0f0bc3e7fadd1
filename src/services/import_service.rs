use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use std::path::Path;
use tracing::info;

/// Raw CSV record as exported by the logging app. Every column except the
/// timestamp and the exercise title may be missing or empty.
#[derive(Debug, Deserialize)]
struct RawRecord {
    start_time: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    exercise_title: String,
    #[serde(default)]
    weight_kg: Option<String>,
    #[serde(default)]
    reps: Option<String>,
    #[serde(default)]
    rpe: Option<String>,
    #[serde(default)]
    set_index: Option<String>,
    #[serde(default)]
    set_type: Option<String>,
    #[serde(default)]
    exercise_notes: Option<String>,
}

/// One fully-coerced row of an import file, ready for reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub start_time: DateTime<Utc>,
    pub workout_title: String,
    pub workout_notes: String,
    pub exercise_title: String,
    pub set_order: i32,
    pub weight_kg: f64,
    pub reps: i32,
    pub rpe: Option<f64>,
    pub set_type: String,
    pub set_notes: String,
}

impl ImportRow {
    fn from_raw(raw: RawRecord) -> Result<Self> {
        let start_time = parse_start_time(&raw.start_time)?;

        Ok(ImportRow {
            start_time,
            workout_title: raw.title.unwrap_or_default(),
            workout_notes: raw.description.unwrap_or_default(),
            exercise_title: raw.exercise_title,
            set_order: parse_int_or_zero(raw.set_index.as_deref()),
            weight_kg: parse_float_or_zero(raw.weight_kg.as_deref()),
            reps: parse_int_or_zero(raw.reps.as_deref()),
            rpe: parse_optional_float(raw.rpe.as_deref()),
            set_type: normalize_set_type(raw.set_type.as_deref()),
            set_notes: raw.exercise_notes.unwrap_or_default(),
        })
    }
}

/// Decode an import file into typed rows. Any record the decoder rejects,
/// and any unparseable start_time, fails the whole file.
pub fn parse_rows<R: std::io::Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // Line 1 is the header row.
        let line = idx + 2;
        let record = result.with_context(|| format!("malformed record at line {}", line))?;
        let row = ImportRow::from_raw(record)
            .with_context(|| format!("invalid record at line {}", line))?;
        rows.push(row);
    }

    Ok(rows)
}

fn parse_start_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Naive timestamps are taken as UTC.
    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d %b %Y, %H:%M"];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    Err(anyhow!("could not parse start_time: {}", raw))
}

fn parse_float_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

fn parse_int_or_zero(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse::<i32>().ok()).unwrap_or(0)
}

fn parse_optional_float(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
}

fn normalize_set_type(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "normal".to_string(),
    }
}

/// Bulk import of workout CSV files.
///
/// Each file is processed as one transaction: workouts are reconciled by
/// start_time and exercises by title (lookup-or-create), then a set row is
/// appended per record. Any failure rolls the whole file back.
#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

impl ImportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Parse and import a CSV file from disk.
    pub async fn import_file(&self, path: &Path) -> Result<usize> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read upload {}", path.display()))?;
        let rows = parse_rows(data.as_slice())?;

        info!("parsed {} rows from {}", rows.len(), path.display());
        self.import_rows(&rows).await
    }

    /// Import already-parsed rows as a single unit of work. Returns the
    /// number of sets inserted.
    ///
    /// Rows are processed strictly in file order so that later rows see
    /// workouts and exercises created by earlier ones within the same
    /// transaction. Re-importing a file appends duplicate sets but never
    /// duplicates a workout or exercise.
    pub async fn import_rows(&self, rows: &[ImportRow]) -> Result<usize> {
        let mut tx = self.db.begin().await?;

        let mut inserted = 0usize;
        for row in rows {
            let workout_id = resolve_workout(&mut tx, row).await?;
            let exercise_id = resolve_exercise(&mut tx, &row.exercise_title).await?;

            sqlx::query(
                "INSERT INTO sets (workout_id, exercise_id, set_order, weight_kg, reps, rpe, set_type, notes) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(workout_id)
            .bind(exercise_id)
            .bind(row.set_order)
            .bind(row.weight_kg)
            .bind(row.reps)
            .bind(row.rpe)
            .bind(&row.set_type)
            .bind(&row.set_notes)
            .execute(&mut *tx)
            .await?;

            inserted += 1;
        }

        tx.commit().await?;
        info!("import committed: {} sets", inserted);

        Ok(inserted)
    }
}

/// Resolve a workout id by start_time, creating the workout from this row's
/// title and notes when no workout exists yet. The first row seen for a
/// given start_time fixes the stored title and notes.
async fn resolve_workout(conn: &mut PgConnection, row: &ImportRow) -> Result<i64> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM workouts WHERE start_time = $1")
        .bind(row.start_time)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id: i64 =
        sqlx::query_scalar("INSERT INTO workouts (title, start_time, notes) VALUES ($1, $2, $3) RETURNING id")
            .bind(&row.workout_title)
            .bind(row.start_time)
            .bind(&row.workout_notes)
            .fetch_one(&mut *conn)
            .await?;

    Ok(id)
}

/// Resolve an exercise id by exact title match, creating it on first sight.
async fn resolve_exercise(conn: &mut PgConnection, title: &str) -> Result<i64> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM exercises WHERE title = $1")
        .bind(title)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id: i64 = sqlx::query_scalar("INSERT INTO exercises (title) VALUES ($1) RETURNING id")
        .bind(title)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 15, 18, 30, 0).unwrap();

        assert_eq!(parse_start_time("2026-03-15T18:30:00Z").unwrap(), expected);
        assert_eq!(parse_start_time("2026-03-15 18:30:00").unwrap(), expected);
        assert_eq!(parse_start_time("2026-03-15T18:30:00").unwrap(), expected);
        assert_eq!(parse_start_time("15 Mar 2026, 18:30").unwrap(), expected);

        let midnight = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_start_time("2026-03-15").unwrap(), midnight);
    }

    #[test]
    fn test_start_time_rejects_garbage() {
        assert!(parse_start_time("yesterday").is_err());
        assert!(parse_start_time("").is_err());
        assert!(parse_start_time("15/99/2026").is_err());
    }

    #[test]
    fn test_numeric_coercion_defaults() {
        assert_eq!(parse_float_or_zero(Some("102.5")), 102.5);
        assert_eq!(parse_float_or_zero(Some("")), 0.0);
        assert_eq!(parse_float_or_zero(Some("heavy")), 0.0);
        assert_eq!(parse_float_or_zero(None), 0.0);

        assert_eq!(parse_int_or_zero(Some("8")), 8);
        assert_eq!(parse_int_or_zero(Some("eight")), 0);
        assert_eq!(parse_int_or_zero(None), 0);

        assert_eq!(parse_optional_float(Some("9.5")), Some(9.5));
        assert_eq!(parse_optional_float(Some("")), None);
        assert_eq!(parse_optional_float(None), None);
    }

    #[test]
    fn test_set_type_defaults_to_normal() {
        assert_eq!(normalize_set_type(Some("warmup")), "warmup");
        assert_eq!(normalize_set_type(Some("")), "normal");
        assert_eq!(normalize_set_type(Some("  ")), "normal");
        assert_eq!(normalize_set_type(None), "normal");
    }
}
