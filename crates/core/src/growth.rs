//! Growth-phase duration engine.
//!
//! Derives an ordered list of phase intervals with whole-day durations
//! from the unordered set of growth-phase events belonging to a plant.
//! Pure and recomputed on every read: the open-ended last interval is
//! closed by the caller-supplied `as_of` date, which moves with time.

use chrono::NaiveDate;

/// One phase interval: the event that opened it, its bounds, and its
/// length in whole days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInterval<T> {
    pub event: T,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub duration_days: i64,
}

/// Compute the growth timeline from a plant's growth-phase events.
///
/// Events are sorted ascending by date (stable, so same-date events keep
/// their input order). Each interval runs from its event's date to the
/// next event's date, or to `as_of` for the last one. Repeated
/// transitions into the same phase each produce their own interval.
pub fn compute_growth_timeline<T>(
    mut events: Vec<T>,
    event_date: impl Fn(&T) -> NaiveDate,
    as_of: NaiveDate,
) -> Vec<PhaseInterval<T>> {
    events.sort_by_key(|event| event_date(event));

    let dates: Vec<NaiveDate> = events.iter().map(&event_date).collect();
    let count = events.len();

    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| {
            let starts_on = dates[i];
            let ends_on = if i + 1 < count { dates[i + 1] } else { as_of };
            PhaseInterval {
                event,
                starts_on,
                ends_on,
                duration_days: (ends_on - starts_on).num_days(),
            }
        })
        .collect()
}
