//! Formats a [`Post`]'s timestamps into a short "time ago" label such as
//! `just now` or `3 days ago`. Everything here is a pure function of the post
//! and the current instant; the instant is always passed in (directly or via a
//! [`Clock`]) so results are reproducible.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::post::{FormattedPost, Post};

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Formats `post` relative to `now`. Both timestamps must be valid RFC 3339
/// strings, but only `updated_at` is used for the label.
pub fn format(post: &Post, now: DateTime<Utc>) -> Result<FormattedPost, ParseError> {
    parse_timestamp("created_at", &post.created_at)?;
    let updated = parse_timestamp("updated_at", &post.updated_at)?;
    Ok(FormattedPost {
        post: post.clone(),
        updated,
        time_ago: time_ago(now.signed_duration_since(updated)),
    })
}

/// Like [`format`], reading the current instant from `clock` once.
pub fn format_with_clock(
    post: &Post,
    clock: &dyn Clock,
) -> Result<FormattedPost, ParseError> {
    format(post, clock.now())
}

/// Renders an elapsed duration using the coarsest unit that fits at least
/// once. Anything under a minute, including negative durations from
/// timestamps in the future, is `just now`. Months are 30 days and years are
/// 365 days.
pub fn time_ago(elapsed: Duration) -> String {
    if elapsed.num_seconds() < SECONDS_PER_MINUTE {
        return String::from("just now");
    }

    let minutes = elapsed.num_minutes();
    if minutes < MINUTES_PER_HOUR {
        return ago(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < HOURS_PER_DAY {
        return ago(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < DAYS_PER_MONTH {
        ago(days, "day")
    } else if days < DAYS_PER_YEAR {
        ago(days / DAYS_PER_MONTH, "month")
    } else {
        ago(days / DAYS_PER_YEAR, "year")
    }
}

fn ago(n: i64, unit: &str) -> String {
    match n {
        1 => format!("1 {} ago", unit),
        _ => format!("{} {}s ago", n, unit),
    }
}

fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(err) => Err(ParseError {
            field,
            value: value.to_owned(),
            err,
        }),
    }
}

/// Returned when one of a post's timestamps is missing or isn't valid
/// RFC 3339.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The offending field, `created_at` or `updated_at`.
    pub field: &'static str,

    /// The value that failed to parse.
    pub value: String,

    err: chrono::ParseError,
}

impl fmt::Display for ParseError {
    /// Displays a [`ParseError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid `{}` timestamp {:?}: {}",
            self.field, self.value, self.err
        )
    }
}

impl std::error::Error for ParseError {
    /// Implements the [`std::error::Error`] trait for [`ParseError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clock::FixedClock;

    const UPDATED_AT: &str = "2021-08-28T03:54:52.344Z";

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn post(created_at: &str, updated_at: &str) -> Post {
        Post {
            id: "3".to_owned(),
            title: "What is functional form of setState".to_owned(),
            content: "## Terms".to_owned(),
            slug: "what-is-functional-form-of-setstate".to_owned(),
            description: String::new(),
            created_at: created_at.to_owned(),
            updated_at: updated_at.to_owned(),
        }
    }

    fn label_after(elapsed: Duration) -> String {
        let now = instant(UPDATED_AT) + elapsed;
        format(&post("2021-08-28T03:54:50.580Z", UPDATED_AT), now)
            .unwrap()
            .time_ago
    }

    #[test]
    fn test_just_now() {
        assert_eq!("just now", label_after(Duration::zero()));
        assert_eq!("just now", label_after(Duration::seconds(59)));
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!("just now", label_after(Duration::hours(-3)));
    }

    #[test]
    fn test_minutes() {
        assert_eq!("1 minute ago", label_after(Duration::seconds(60)));
        assert_eq!("1 minute ago", label_after(Duration::seconds(119)));
        assert_eq!("2 minutes ago", label_after(Duration::minutes(2)));
        assert_eq!("59 minutes ago", label_after(Duration::seconds(3599)));
    }

    #[test]
    fn test_hours() {
        assert_eq!("1 hour ago", label_after(Duration::hours(1)));
        assert_eq!("2 hours ago", label_after(Duration::hours(2)));
        assert_eq!("23 hours ago", label_after(Duration::minutes(24 * 60 - 1)));
    }

    #[test]
    fn test_days() {
        assert_eq!("1 day ago", label_after(Duration::days(1)));
        assert_eq!("2 days ago", label_after(Duration::days(2)));
        assert_eq!("29 days ago", label_after(Duration::days(29)));
    }

    #[test]
    fn test_months() {
        assert_eq!("1 month ago", label_after(Duration::days(30)));
        assert_eq!("2 months ago", label_after(Duration::days(60)));
        assert_eq!("12 months ago", label_after(Duration::days(364)));
    }

    #[test]
    fn test_years() {
        assert_eq!("1 year ago", label_after(Duration::days(365)));
        assert_eq!("2 years ago", label_after(Duration::days(2 * 365)));
    }

    #[test]
    fn test_deterministic() {
        let p = post("2021-08-28T03:54:50.580Z", UPDATED_AT);
        let now = instant("2021-09-04T12:00:00Z");
        assert_eq!(format(&p, now).unwrap(), format(&p, now).unwrap());
        assert_eq!("7 days ago", format(&p, now).unwrap().time_ago);
    }

    #[test]
    fn test_uses_updated_at() {
        let p = post("2020-01-01T00:00:00Z", UPDATED_AT);
        let formatted = format(&p, instant("2021-08-30T03:54:52.344Z")).unwrap();
        assert_eq!("2 days ago", formatted.time_ago);
        assert_eq!(instant(UPDATED_AT), formatted.updated);
        assert_eq!(p, formatted.post);
    }

    #[test]
    fn test_offsets_are_normalized() {
        let p = post("2021-08-28T05:54:50+02:00", "2021-08-28T05:54:52+02:00");
        let formatted = format(&p, instant("2021-08-28T04:54:52Z")).unwrap();
        assert_eq!("1 hour ago", formatted.time_ago);
    }

    #[test]
    fn test_format_with_clock() {
        let clock = FixedClock(instant("2023-08-28T03:54:52.344Z"));
        let p = post("2021-08-28T03:54:50.580Z", UPDATED_AT);
        assert_eq!("2 years ago", format_with_clock(&p, &clock).unwrap().time_ago);
    }

    #[test]
    fn test_malformed_updated_at() {
        let err = format(&post(UPDATED_AT, "not-a-date"), instant(UPDATED_AT))
            .unwrap_err();
        assert_eq!("updated_at", err.field);
        assert_eq!("not-a-date", err.value);
    }

    #[test]
    fn test_malformed_created_at() {
        let err = format(&post("", UPDATED_AT), instant(UPDATED_AT)).unwrap_err();
        assert_eq!("created_at", err.field);
        assert_eq!("", err.value);
    }

    #[test]
    fn test_date_without_time_is_rejected() {
        let err = format(&post("2021-08-28", "2021-08-28"), instant(UPDATED_AT))
            .unwrap_err();
        assert_eq!("created_at", err.field);
    }
}
