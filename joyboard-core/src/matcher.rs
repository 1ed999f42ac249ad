//! Heuristic matching between calendar events and dashboard items.
//!
//! All heuristics are case-insensitive substring tests, evaluated
//! independently and unioned. They are deliberately cheap and threshold-free:
//! links are advisory and user-deletable, so false positives are acceptable,
//! and the manual-link path covers false negatives.

use crate::event::CalendarEvent;
use crate::link::{CandidateLink, LinkKind};
use crate::snapshot::DashboardSnapshot;

/// Propose links between one event and the current dashboard snapshot.
///
/// Pure and deterministic for a given snapshot; may return an empty list.
///
/// - Travel: the event title contains the first whitespace-delimited token of
///   a destination's name.
/// - Local: the event title or location contains a place's full name.
/// - Experience: the event title contains the first three whitespace-delimited
///   tokens of an experience's title.
pub fn find_links(event: &CalendarEvent, snapshot: &DashboardSnapshot) -> Vec<CandidateLink> {
    let title = event.summary.to_lowercase();
    let location = event
        .location
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mut links = Vec::new();

    for dest in &snapshot.destinations {
        let Some(token) = dest.name.split_whitespace().next() else {
            continue;
        };
        if title.contains(&token.to_lowercase()) {
            links.push(CandidateLink {
                kind: LinkKind::Travel,
                id: dest.id.clone(),
                name: dest.name.clone(),
            });
        }
    }

    for place in &snapshot.places {
        let name = place.name.to_lowercase();
        if name.is_empty() {
            continue;
        }
        if title.contains(&name) || location.contains(&name) {
            links.push(CandidateLink {
                kind: LinkKind::Local,
                id: place.id.clone(),
                name: place.name.clone(),
            });
        }
    }

    for exp in &snapshot.experiences {
        let phrase = exp
            .title
            .split_whitespace()
            .take(3)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if phrase.is_empty() {
            continue;
        }
        if title.contains(&phrase) {
            links.push(CandidateLink {
                kind: LinkKind::Experience,
                id: exp.id.clone(),
                name: exp.title.clone(),
            });
        }
    }

    links
}
