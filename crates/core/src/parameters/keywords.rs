//! Date keyword rules
//!
//! Rules are evaluated in order and the first match wins. Each rule is a
//! pair of plain functions so the table can live in a static.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";

static NOW_OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^NOW([+-])(\d+)$").expect("NOW_OFFSET should compile - this is a bug")
});

/// Instant and zone a keyword is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct KeywordContext {
    pub now: DateTime<Utc>,
    /// Configured zone; `None` means process-local time.
    pub zone: Option<Tz>,
}

impl KeywordContext {
    fn date_in_zone(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.zone {
            Some(tz) => instant.with_timezone(&tz).date_naive(),
            None => instant.with_timezone(&Local).date_naive(),
        }
    }
}

struct KeywordRule {
    matches: fn(&str) -> bool,
    apply: fn(&str, &KeywordContext) -> Option<String>,
}

static RULES: &[KeywordRule] = &[
    KeywordRule { matches: is_now, apply: today },
    KeywordRule { matches: is_now_offset, apply: shifted },
    KeywordRule { matches: is_first_of_month, apply: first_of_month },
];

/// Substitute a date keyword, or return `None` when `value` is not one.
pub fn substitute(value: &str, ctx: &KeywordContext) -> Option<String> {
    RULES.iter().find(|rule| (rule.matches)(value)).and_then(|rule| (rule.apply)(value, ctx))
}

fn is_now(value: &str) -> bool {
    value == "NOW"
}

fn is_now_offset(value: &str) -> bool {
    NOW_OFFSET.is_match(value)
}

fn is_first_of_month(value: &str) -> bool {
    value == "CURRENT_MONTH_DAY1"
}

fn today(_value: &str, ctx: &KeywordContext) -> Option<String> {
    Some(ctx.date_in_zone(ctx.now).format(DATE_FORMAT).to_string())
}

fn shifted(value: &str, ctx: &KeywordContext) -> Option<String> {
    let caps = NOW_OFFSET.captures(value)?;
    let days: i64 = caps[2].parse().ok()?;
    let offset = Duration::try_days(days)?;
    let instant = match &caps[1] {
        "-" => ctx.now.checked_sub_signed(offset)?,
        _ => ctx.now.checked_add_signed(offset)?,
    };
    Some(ctx.date_in_zone(instant).format(DATE_FORMAT).to_string())
}

// Always process-local, whatever zone is configured.
fn first_of_month(_value: &str, ctx: &KeywordContext) -> Option<String> {
    let local = ctx.now.with_timezone(&Local);
    let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)?;
    Some(first.format(DATE_FORMAT).to_string())
}
