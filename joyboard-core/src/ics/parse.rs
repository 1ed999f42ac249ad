//! Line-by-line ICS feed parsing.
//!
//! The scanner treats lines as already unfolded: RFC 5545 continuation lines
//! (leading space or tab) are not joined, so long DESCRIPTION/SUMMARY values
//! folded by some providers will be truncated at the fold point. Known gap.
//!
//! Parsing never fails. Records missing a summary or a resolvable start are
//! dropped and counted in [`ParsedFeed::skipped`] instead of raising errors,
//! so one malformed record cannot take down the whole feed.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::event::{CalendarEvent, EventTime};

/// The result of parsing one feed: events in order of appearance, plus the
/// number of VEVENT records that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub events: Vec<CalendarEvent>,
    pub skipped: usize,
}

/// Parse raw feed text into calendar events.
///
/// Pure function: no I/O, deterministic, order of events = order of
/// appearance in the text. Source attribution (`calendar_id`/`calendar_name`)
/// is left empty; callers attach it via
/// [`CalendarEvent::attach_source`](crate::event::CalendarEvent::attach_source).
pub fn parse_feed(text: &str) -> ParsedFeed {
    let mut feed = ParsedFeed::default();
    let mut current: Option<PendingEvent> = None;

    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');

        if line == "BEGIN:VEVENT" {
            // An unterminated previous record is dropped, not merged.
            if current.is_some() {
                feed.skipped += 1;
            }
            current = Some(PendingEvent::default());
            continue;
        }

        if line == "END:VEVENT" {
            if let Some(pending) = current.take() {
                match pending.into_event() {
                    Some(event) => feed.events.push(event),
                    None => feed.skipped += 1,
                }
            }
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };
        let Some((name, value)) = split_property(line) else {
            continue;
        };

        match name {
            "UID" => pending.uid = Some(value.to_string()),
            "SUMMARY" => pending.summary = Some(unescape_text(value)),
            "DESCRIPTION" => pending.description = Some(unescape_text(value)),
            "LOCATION" => pending.location = Some(unescape_text(value)),
            "DTSTART" => pending.start = parse_ics_time(value),
            "DTEND" => pending.end = parse_ics_time(value),
            _ => {}
        }
    }

    feed
}

#[derive(Default)]
struct PendingEvent {
    uid: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
}

impl PendingEvent {
    /// Emit the record only if it has both a non-empty summary and a
    /// resolvable start instant.
    fn into_event(self) -> Option<CalendarEvent> {
        let summary = self.summary.filter(|s| !s.trim().is_empty())?;
        let start = self.start?;

        Some(CalendarEvent {
            uid: self.uid.unwrap_or_default(),
            summary,
            description: self.description,
            location: self.location,
            start,
            end: self.end,
            calendar_id: String::new(),
            calendar_name: String::new(),
        })
    }
}

/// Split a property line into (name, value), stripping any parameters from
/// the name (`DTSTART;VALUE=DATE:20240208` -> `("DTSTART", "20240208")`).
fn split_property(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.split(';').next().unwrap_or(name);
    Some((name, value))
}

/// Unescape the text escapes feeds apply to SUMMARY/DESCRIPTION/LOCATION.
fn unescape_text(value: &str) -> String {
    value.replace("\\,", ",").replace("\\n", "\n")
}

/// Decode a DTSTART/DTEND value.
///
/// A value containing `T` is a compact timestamp `YYYYMMDDTHHMMSS[Z]`,
/// decoded to year/month/day/hour/minute and normalized to a UTC instant.
/// A value without `T` is a compact all-day date `YYYYMMDD`. Anything else
/// yields `None` (a missing time, not an error).
fn parse_ics_time(value: &str) -> Option<EventTime> {
    let value = value.trim();

    match value.find('T') {
        None => parse_compact_date(value).map(EventTime::Date),
        Some(8) => {
            let date = parse_compact_date(&value[..8])?;
            let rest = &value[9..];
            let hour: u32 = rest.get(0..2)?.parse().ok()?;
            let minute: u32 = rest.get(2..4)?.parse().ok()?;
            let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
            Some(EventTime::DateTime(Utc.from_utc_datetime(&date.and_time(time))))
        }
        Some(_) => None,
    }
}

fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
