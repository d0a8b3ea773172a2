// ⏳ Timeline Builder - Merge event sources into one chronology
//
// Ordering is plain string comparison on the ISO date, which matches calendar
// order for well-formed `YYYY-MM-DD` values. Undated events sort first.

use crate::events::Event;

/// Concatenate every source in the order given, then stable-sort by date.
///
/// Ties keep their concatenation order, so with `[company, officers]` the
/// company events come first on a shared date. No deduplication.
pub fn build_timeline<I>(sources: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut timeline: Vec<Event> = sources.into_iter().flatten().collect();

    // sort_by is stable
    timeline.sort_by(|a, b| a.date_key().cmp(b.date_key()));

    timeline
}

// ============================================================================
// TESTS
// ============================================================================
