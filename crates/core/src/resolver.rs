//! # Window Resolver
//!
//! Pure lookups over a slice of assignment windows. Nothing here touches storage;
//! callers fetch the relevant windows and hand them in.
//!
//! ## Precedence
//!
//! When several windows cover the same instant a daily override always wins over
//! the weekly rotation. Same-kind overlaps are refused when windows are inserted,
//! so at most one window of each kind can match.

use chrono::{DateTime, Duration, Utc};

use crate::models::assignment::AssignmentWindow;

/// Returns the window that decides who is on call at `at`.
pub fn resolve_window(
    windows: &[AssignmentWindow],
    at: DateTime<Utc>,
) -> Option<&AssignmentWindow> {
    let mut weekly = None;
    for window in windows.iter().filter(|w| w.contains(at)) {
        if !window.is_full_week {
            return Some(window);
        }
        weekly.get_or_insert(window);
    }
    weekly
}

/// Windows starting at or after `at`, earliest first, at most `count` of them.
pub fn upcoming(
    windows: &[AssignmentWindow],
    at: DateTime<Utc>,
    count: usize,
) -> Vec<AssignmentWindow> {
    let mut next: Vec<AssignmentWindow> =
        windows.iter().filter(|w| w.start >= at).cloned().collect();
    sort_windows(&mut next);
    next.truncate(count);
    next
}

/// Total time `person_id` is effectively on call within `[from, to)`.
///
/// Weekly time covered by somebody else's daily override is not counted, while
/// a daily override held by `person_id` is.
pub fn on_call_duration(
    windows: &[AssignmentWindow],
    person_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Duration {
    if from >= to {
        return Duration::zero();
    }

    let mut edges = vec![from, to];
    for window in windows.iter().filter(|w| w.overlaps(from, to)) {
        edges.push(window.start.max(from));
        edges.push(window.end.min(to));
    }
    edges.sort();
    edges.dedup();

    edges
        .windows(2)
        .filter(|segment| {
            resolve_window(windows, segment[0]).is_some_and(|w| w.person_id == person_id)
        })
        .map(|segment| segment[1] - segment[0])
        .fold(Duration::zero(), |total, span| total + span)
}

/// Orders windows by start, then by creation time.
pub fn sort_windows(windows: &mut [AssignmentWindow]) {
    windows.sort_by(|a, b| a.start.cmp(&b.start).then(a.created_at.cmp(&b.created_at)));
}
