use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use liftlog::services::import_service::parse_rows;

#[cfg(test)]
mod csv_import_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "start_time,title,description,exercise_title,weight_kg,reps,rpe,set_index,set_type,exercise_notes";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_parses_a_full_row() {
        let file = csv(&[
            "2026-03-15 18:30:00,Leg Day,Felt strong,Back Squat,102.5,5,8.5,1,normal,belt on",
        ]);

        let rows = parse_rows(file.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(
            row.start_time,
            Utc.with_ymd_and_hms(2026, 3, 15, 18, 30, 0).unwrap()
        );
        assert_eq!(row.workout_title, "Leg Day");
        assert_eq!(row.workout_notes, "Felt strong");
        assert_eq!(row.exercise_title, "Back Squat");
        assert_eq!(row.weight_kg, 102.5);
        assert_eq!(row.reps, 5);
        assert_eq!(row.rpe, Some(8.5));
        assert_eq!(row.set_order, 1);
        assert_eq!(row.set_type, "normal");
        assert_eq!(row.set_notes, "belt on");
    }

    #[test]
    fn test_rows_sharing_a_start_time_keep_their_own_set_fields() {
        let file = csv(&[
            "2026-03-15 18:30:00,Leg Day,first row notes,Back Squat,100,5,,1,normal,",
            "2026-03-15 18:30:00,Renamed Later,ignored notes,Back Squat,80,5,,2,normal,",
        ]);

        let rows = parse_rows(file.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].start_time, rows[1].start_time);
        assert_eq!(rows[0].weight_kg, 100.0);
        assert_eq!(rows[1].weight_kg, 80.0);
        // Reconciliation takes workout metadata from the first row seen for
        // a timestamp; the parser itself keeps both as read.
        assert_eq!(rows[0].workout_title, "Leg Day");
        assert_eq!(rows[1].workout_title, "Renamed Later");
    }

    #[test]
    fn test_empty_and_malformed_numerics_fall_back_to_defaults() {
        let file = csv(&[
            "2026-03-15 18:30:00,Push Day,,Bench Press,,five,,,," ,
        ]);

        let rows = parse_rows(file.as_bytes()).unwrap();
        let row = &rows[0];
        assert_eq!(row.weight_kg, 0.0);
        assert_eq!(row.reps, 0);
        assert_eq!(row.rpe, None);
        assert_eq!(row.set_order, 0);
        assert_eq!(row.set_type, "normal");
        assert_eq!(row.workout_notes, "");
        assert_eq!(row.set_notes, "");
    }

    #[test]
    fn test_unparseable_start_time_fails_the_file() {
        let file = csv(&[
            "2026-03-15 18:30:00,Leg Day,,Back Squat,100,5,,1,normal,",
            "not a date,Leg Day,,Back Squat,80,5,,2,normal,",
        ]);

        let err = parse_rows(file.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_short_rows_are_padded_with_defaults() {
        // Trailing columns missing entirely.
        let file = csv(&["2026-03-15 18:30:00,Pull Day,,Deadlift,140,3"]);

        let rows = parse_rows(file.as_bytes()).unwrap();
        let row = &rows[0];
        assert_eq!(row.weight_kg, 140.0);
        assert_eq!(row.reps, 3);
        assert_eq!(row.rpe, None);
        assert_eq!(row.set_type, "normal");
    }

    #[test]
    fn test_exercise_titles_are_kept_case_sensitive() {
        let file = csv(&[
            "2026-03-15 18:30:00,Leg Day,,Back Squat,100,5,,1,normal,",
            "2026-03-15 18:30:00,Leg Day,,back squat,60,10,,2,warmup,",
        ]);

        let rows = parse_rows(file.as_bytes()).unwrap();
        assert_eq!(rows[0].exercise_title, "Back Squat");
        assert_eq!(rows[1].exercise_title, "back squat");
    }
}
