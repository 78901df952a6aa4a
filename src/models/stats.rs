//! Weekly dashboard aggregates.
//!
//! Workouts are bucketed into 7 consecutive calendar-day buckets ending
//! "today", oldest first, with per-bucket and total sums. Everything here
//! is derived and transient; the dashboard recomputes it on every view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Workout;
use crate::time_utils::{add_days, short_weekday, start_of_day};

/// Number of day buckets in the reporting window.
pub const WEEK_DAYS: i64 = 7;

/// One calendar-day bucket of the reporting window.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPoint {
    /// Abbreviated weekday label, display only
    pub label: String,
    pub calories: u32,
    pub minutes: u32,
    pub sessions: u32,
}

/// Derived 7-day aggregates for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_sessions: u32,
    pub total_calories: u32,
    pub total_minutes: u32,
    /// Exactly [`WEEK_DAYS`] points, oldest first, ending today
    pub week: Vec<WeekPoint>,
}

impl DashboardStats {
    /// Bucket `workouts` into the 7-day window ending at
    /// `start_of_day(now)` and sum per-bucket aggregates.
    ///
    /// Buckets are half-open `[day, next_day)`: a workout logged exactly
    /// at midnight belongs to that day, not the previous one. Records
    /// outside the window are silently excluded; empty buckets yield
    /// all-zero points rather than being omitted.
    pub fn compute(now: DateTime<Utc>, workouts: &[Workout]) -> Self {
        let today = start_of_day(now);

        let mut week = Vec::with_capacity(WEEK_DAYS as usize);
        let mut total_sessions = 0u32;
        let mut total_calories = 0u32;
        let mut total_minutes = 0u32;

        for i in (0..WEEK_DAYS).rev() {
            let day = add_days(today, -i);
            let next = add_days(day, 1);

            let mut point = WeekPoint {
                label: short_weekday(day),
                calories: 0,
                minutes: 0,
                sessions: 0,
            };

            // Stored documents are not re-validated on read; saturate
            // instead of wrapping on absurd counter values.
            for w in workouts.iter().filter(|w| w.date >= day && w.date < next) {
                point.calories = point.calories.saturating_add(w.calories);
                point.minutes = point.minutes.saturating_add(w.duration_min);
                point.sessions += 1;
            }

            total_sessions += point.sessions;
            total_calories = total_calories.saturating_add(point.calories);
            total_minutes = total_minutes.saturating_add(point.minutes);
            week.push(point);
        }

        Self {
            total_sessions,
            total_calories,
            total_minutes,
            week,
        }
    }
}

/// One chart bar position, on a 0..100 viewBox like the SPA renders.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    /// Vertical position: 100 is the baseline, 0 the top of the scale
    pub y: f64,
    pub label: String,
    pub calories: u32,
    pub minutes: u32,
    pub sessions: u32,
}

/// Scale each bucket's calorie sum against the week maximum.
///
/// The denominator is floored at 1 so an all-zero week normalizes to the
/// baseline instead of dividing by zero. Presentation only; not part of
/// the aggregate data model.
pub fn chart_points(stats: &DashboardStats) -> Vec<ChartPoint> {
    let max = stats
        .week
        .iter()
        .map(|p| p.calories)
        .max()
        .unwrap_or(0)
        .max(1);

    stats
        .week
        .iter()
        .enumerate()
        .map(|(idx, p)| ChartPoint {
            x: (idx as f64 + 0.5) * (100.0 / WEEK_DAYS as f64),
            y: 100.0 - (p.calories as f64 / max as f64) * 100.0,
            label: p.label.clone(),
            calories: p.calories,
            minutes: p.minutes,
            sessions: p.sessions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutType;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn workout(date: &str, calories: u32, minutes: u32) -> Workout {
        Workout {
            id: "test".to_string(),
            workout_type: WorkoutType::Cardio,
            duration_min: minutes,
            calories,
            date: ts(date),
            created_at: ts(date),
        }
    }

    // Window under test: day0 = 2026-08-24 (Mon) .. day6 = 2026-08-30 (Sun).
    const NOW: &str = "2026-08-30T15:30:00Z";

    #[test]
    fn test_empty_window_yields_seven_zero_points() {
        let stats = DashboardStats::compute(ts(NOW), &[]);

        assert_eq!(stats.week.len(), 7);
        for p in &stats.week {
            assert_eq!(p.sessions, 0);
            assert_eq!(p.calories, 0);
            assert_eq!(p.minutes, 0);
        }
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_calories, 0);
        assert_eq!(stats.total_minutes, 0);
    }

    #[test]
    fn test_week_is_oldest_first_ending_today() {
        let stats = DashboardStats::compute(ts(NOW), &[]);
        let labels: Vec<&str> = stats.week.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_midnight_belongs_to_the_new_day() {
        // day0 = 2026-08-24; a workout at exactly day1 midnight must land
        // in the day1 bucket, not day0.
        let workouts = vec![
            workout("2026-08-24T12:00:00Z", 100, 20),
            workout("2026-08-24T23:59:00Z", 50, 10),
            workout("2026-08-25T00:00:00Z", 30, 5),
        ];

        let stats = DashboardStats::compute(ts(NOW), &workouts);

        let day0 = &stats.week[0];
        assert_eq!(day0.calories, 150);
        assert_eq!(day0.minutes, 30);
        assert_eq!(day0.sessions, 2);

        let day1 = &stats.week[1];
        assert_eq!(day1.calories, 30);
        assert_eq!(day1.minutes, 5);
        assert_eq!(day1.sessions, 1);
    }

    #[test]
    fn test_totals_equal_sum_of_buckets() {
        let workouts = vec![
            workout("2026-08-24T08:00:00Z", 100, 20),
            workout("2026-08-26T09:00:00Z", 200, 40),
            workout("2026-08-26T18:00:00Z", 150, 30),
            workout("2026-08-30T07:00:00Z", 300, 60),
        ];

        let stats = DashboardStats::compute(ts(NOW), &workouts);

        let (mut s, mut c, mut m) = (0, 0, 0);
        for p in &stats.week {
            s += p.sessions;
            c += p.calories;
            m += p.minutes;
        }
        assert_eq!(stats.total_sessions, s);
        assert_eq!(stats.total_calories, c);
        assert_eq!(stats.total_minutes, m);
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.total_calories, 750);
        assert_eq!(stats.total_minutes, 150);
    }

    #[test]
    fn test_records_outside_window_are_excluded() {
        let workouts = vec![
            // Day before the window opens
            workout("2026-08-23T23:59:59Z", 999, 99),
            // Tomorrow (shouldn't exist, but must not be counted)
            workout("2026-08-31T00:00:00Z", 999, 99),
            // In window
            workout("2026-08-28T10:00:00Z", 80, 15),
        ];

        let stats = DashboardStats::compute(ts(NOW), &workouts);

        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.total_calories, 80);
        assert_eq!(stats.total_minutes, 15);
    }

    #[test]
    fn test_huge_counter_values_saturate_instead_of_wrapping() {
        let workouts = vec![
            workout("2026-08-30T08:00:00Z", u32::MAX, u32::MAX),
            workout("2026-08-30T09:00:00Z", 1, 1),
        ];

        let stats = DashboardStats::compute(ts(NOW), &workouts);

        assert_eq!(stats.week[6].calories, u32::MAX);
        assert_eq!(stats.week[6].minutes, u32::MAX);
        assert_eq!(stats.total_calories, u32::MAX);
        assert_eq!(stats.total_minutes, u32::MAX);
        assert_eq!(stats.total_sessions, 2);
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let workouts = vec![workout("2026-08-24T00:00:00Z", 60, 10)];
        let stats = DashboardStats::compute(ts(NOW), &workouts);
        assert_eq!(stats.week[0].sessions, 1);
        assert_eq!(stats.total_calories, 60);
    }

    #[test]
    fn test_chart_normalizes_against_week_maximum() {
        let mut workouts = Vec::new();
        workouts.push(workout("2026-08-30T07:00:00Z", 100, 10));

        let stats = DashboardStats::compute(ts(NOW), &workouts);
        let points = chart_points(&stats);

        assert_eq!(points.len(), 7);
        // Six empty days sit on the baseline; the 100-calorie day reaches
        // the top of the scale even though every other day is zero.
        for p in &points[..6] {
            assert_eq!(p.y, 100.0);
        }
        assert_eq!(points[6].y, 0.0);
    }

    #[test]
    fn test_chart_all_zero_week_stays_on_baseline() {
        let stats = DashboardStats::compute(ts(NOW), &[]);
        let points = chart_points(&stats);
        // Denominator floors at 1, so no NaN and every bar is flat.
        for p in &points {
            assert_eq!(p.y, 100.0);
        }
    }

    #[test]
    fn test_chart_x_positions_are_bucket_centers() {
        let stats = DashboardStats::compute(ts(NOW), &[]);
        let points = chart_points(&stats);
        let step = 100.0 / 7.0;
        for (idx, p) in points.iter().enumerate() {
            assert!((p.x - (idx as f64 + 0.5) * step).abs() < 1e-9);
        }
    }
}
