use crate::Snapshot;
use std::collections::BTreeSet;
use time::Date;

/// Which candidate dimensions the usage events are crossed with.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    /// Every ingredient for each (recipe, date) pair found in the usage events.
    Ingredient,
    /// Every ingredient and every date of the date domain for each recipe.
    #[default]
    IngredientAndDate,
}

/// Where the date dimension comes from, used by [`Dimensions::IngredientAndDate`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum DateDomain {
    /// Distinct dates of the usage events.
    #[default]
    Observed,
    /// The dates listed by the source.
    Source,
    /// A literal list of dates.
    Fixed(Vec<Date>),
}

/// How the dense matrix is computed, both produce the same result.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Add each usage event straight into a zero filled matrix.
    #[default]
    Scatter,
    /// Cross join with the candidates, mask, then group and sum.
    CrossJoin,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub dimensions: Dimensions,
    pub dates: DateDomain,
    pub strategy: Strategy,
}

impl ReportOptions {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }
    pub fn with_dates(mut self, dates: DateDomain) -> Self {
        self.dates = dates;
        self
    }
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The date domain the usage events are checked against, `None` when it
    /// is derived from the usage events themselves.
    pub fn date_domain(&self, snapshot: &Snapshot) -> Option<BTreeSet<Date>> {
        match &self.dates {
            DateDomain::Observed => None,
            DateDomain::Source => Some(snapshot.dates.iter().copied().collect()),
            DateDomain::Fixed(dates) => Some(dates.iter().copied().collect()),
        }
    }
}
