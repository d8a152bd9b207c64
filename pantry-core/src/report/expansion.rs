use crate::{EitherIterator, JoinedEvent};
use std::iter;
use time::Date;

/// Candidate domain the joined events are crossed with.
#[derive(Debug, Clone, Copy)]
pub struct Candidates<'a> {
    pub ingredients: &'a [String],
    /// `None` keeps the date of the event (single variable cross join).
    pub dates: Option<&'a [Date]>,
}

/// A joined event paired with one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedRow<'a> {
    pub event: &'a JoinedEvent,
    pub ingredient: &'a str,
    pub date: Option<Date>,
}

impl ExpandedRow<'_> {
    /// Date the row is grouped under.
    pub fn group_date(&self) -> Date {
        self.date.unwrap_or(self.event.date)
    }
}

/// Unconditional cartesian product of `joined` and `candidates`.
///
/// Rows come out in event order, then candidate date, then candidate ingredient.
pub fn expand<'a>(
    joined: &'a [JoinedEvent],
    candidates: Candidates<'a>,
) -> impl Iterator<Item = ExpandedRow<'a>> + 'a {
    joined.iter().flat_map(move |event| {
        let dates = match candidates.dates {
            Some(dates) => EitherIterator::Left(dates.iter().copied().map(Some)),
            None => EitherIterator::Right(iter::once(None)),
        };
        dates.flat_map(move |date| {
            candidates
                .ingredients
                .iter()
                .map(move |ingredient| ExpandedRow {
                    event,
                    ingredient: ingredient.as_str(),
                    date,
                })
        })
    })
}
