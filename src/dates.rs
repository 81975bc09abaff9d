//! Date parsing, window arithmetic and relative formatting.

use chrono::{Datelike, NaiveDate, TimeDelta};

/// Days covered by one weekly task.
pub const WEEK_LENGTH_DAYS: i64 = 7;

/// Parse human-readable date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "in 3d", "in 2w"
/// - "monday", "next monday", "this friday" (and three-letter forms)
/// - "YYYY-MM-DD"
pub fn parse_date_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return add_days(today, 1),
        "yesterday" => return add_days(today, -1),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return add_days(today, days);
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return weeks
                    .checked_mul(WEEK_LENGTH_DAYS)
                    .and_then(|days| add_days(today, days));
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];

    let current_day = today.weekday().num_days_from_monday() as i64;
    for (day_name, target_day) in weekdays {
        let days_ahead = (target_day + 7 - current_day) % 7;
        if s == day_name || s == format!("this {day_name}") {
            return add_days(today, days_ahead);
        }
        if s == format!("next {day_name}") {
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return add_days(today, days_to_add);
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Add a signed number of days. `None` when the result falls outside the
/// range chrono can represent.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// True when `date` falls in the half-open window `[week_start, week_start + 7)`.
pub fn in_week_window(date: NaiveDate, week_start: NaiveDate) -> bool {
    date >= week_start && add_days(week_start, WEEK_LENGTH_DAYS).map_or(true, |end| date < end)
}

/// Format a date relative to today ("today", "tomorrow", "in 3d", "2d ago").
pub fn format_date_relative(date: Option<NaiveDate>, today: NaiveDate) -> String {
    match date {
        None => "-".into(),
        Some(d) => {
            let delta = (d - today).num_days();
            if delta == 0 {
                "today".into()
            } else if delta == 1 {
                "tomorrow".into()
            } else if delta == -1 {
                "yesterday".into()
            } else if delta > 1 {
                format!("in {}d", delta)
            } else {
                format!("{}d ago", -delta)
            }
        }
    }
}
