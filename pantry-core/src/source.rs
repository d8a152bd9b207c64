use crate::{
    Ingredient, Recipe, Report, ReportOptions, Result, UsageEvent, UsageMatrix,
    stream::{Stream, TryStreamExt},
};
use std::future::Future;
use time::Date;

/// Read side of a store: the dimensions and the usage events a report is built from.
pub trait DataSource {
    fn recipes(&mut self) -> impl Stream<Item = Result<Recipe>>;

    fn ingredients(&mut self) -> impl Stream<Item = Result<Ingredient>>;

    fn usage_events(&mut self) -> impl Stream<Item = Result<UsageEvent>>;

    /// Externally supplied date dimension, can be empty.
    fn dates(&mut self) -> impl Stream<Item = Result<Date>>;

    /// The usage matrix of the content, computed in memory by [`Report`]
    /// unless the source knows how to do it itself.
    fn report(&mut self, options: &ReportOptions) -> impl Future<Output = Result<UsageMatrix>>
    where
        Self: Sized,
    {
        let report = Report::new(options.clone());
        async move { report.run(self).await }
    }
}

/// A source that can also be written.
pub trait Store: DataSource {
    /// Replace the whole content of the store with `snapshot`.
    ///
    /// A snapshot failing [`crate::validate`] is refused and the previous
    /// content is kept.
    fn save(&mut self, snapshot: &Snapshot) -> impl Future<Output = Result<()>>;
}

/// Fully materialized content of a source.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<Ingredient>,
    pub usage_events: Vec<UsageEvent>,
    pub dates: Vec<Date>,
}

impl Snapshot {
    pub async fn load<S: DataSource>(source: &mut S) -> Result<Self> {
        let recipes = source.recipes().try_collect().await?;
        let ingredients = source.ingredients().try_collect().await?;
        let usage_events = source.usage_events().try_collect().await?;
        let dates = source.dates().try_collect().await?;
        let result = Self {
            recipes,
            ingredients,
            usage_events,
            dates,
        };
        log::debug!(
            "Loaded {} recipes, {} ingredients, {} usage events and {} dates",
            result.recipes.len(),
            result.ingredients.len(),
            result.usage_events.len(),
            result.dates.len()
        );
        Ok(result)
    }
}
