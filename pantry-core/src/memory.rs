use crate::{
    DataSource, Dimensions, Ingredient, Recipe, Result, Snapshot, Store, UsageEvent,
    stream::{self, Stream},
    validate,
};
use time::Date;

/// Store keeping everything in memory.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl From<Snapshot> for MemoryStore {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot)
    }
}

impl DataSource for MemoryStore {
    fn recipes(&mut self) -> impl Stream<Item = Result<Recipe>> {
        stream::iter(self.snapshot.recipes.iter().cloned().map(Ok))
    }

    fn ingredients(&mut self) -> impl Stream<Item = Result<Ingredient>> {
        stream::iter(self.snapshot.ingredients.iter().cloned().map(Ok))
    }

    fn usage_events(&mut self) -> impl Stream<Item = Result<UsageEvent>> {
        stream::iter(self.snapshot.usage_events.iter().cloned().map(Ok))
    }

    fn dates(&mut self) -> impl Stream<Item = Result<Date>> {
        stream::iter(self.snapshot.dates.iter().copied().map(Ok))
    }
}

impl Store for MemoryStore {
    async fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        validate(snapshot, Dimensions::Ingredient, None)?;
        self.snapshot = snapshot.clone();
        Ok(())
    }
}
