use crate::{CellKey, Dimensions, JoinedEvent, MaskedRow, ReportError, Result, UsageMatrix};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use time::Date;

/// Every (recipe, date, ingredient) combination a report must contain.
///
/// The key space is a list of (recipe, date) slots crossed with all the
/// ingredients. With [`Dimensions::IngredientAndDate`] the slots are all the
/// recipes crossed with all the dates, with [`Dimensions::Ingredient`] they are
/// the (recipe, date) pairs found in the usage events.
#[derive(Debug, Clone)]
pub struct KeySpace {
    slots: Vec<(String, Date)>,
    ingredients: Vec<String>,
    dates: Vec<Date>,
    slot_index: HashMap<String, HashMap<Date, usize>>,
    ingredient_index: HashMap<String, usize>,
}

impl KeySpace {
    /// `recipes` and `ingredients` must be free of duplicates, `dates` is only
    /// used by [`Dimensions::IngredientAndDate`].
    pub fn new<'a>(
        dimensions: Dimensions,
        recipes: impl IntoIterator<Item = &'a str>,
        ingredients: impl IntoIterator<Item = &'a str>,
        dates: impl IntoIterator<Item = Date>,
        joined: &[JoinedEvent],
    ) -> Self {
        let ingredients = ingredients
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let (slots, dates): (Vec<_>, Vec<_>) = match dimensions {
            Dimensions::IngredientAndDate => {
                let dates = dates.into_iter().collect::<BTreeSet<_>>();
                let recipes = recipes.into_iter().collect::<BTreeSet<_>>();
                let slots = recipes
                    .iter()
                    .flat_map(|r| dates.iter().map(move |d| (r.to_string(), *d)))
                    .collect();
                (slots, dates.into_iter().collect())
            }
            Dimensions::Ingredient => {
                let slots = joined
                    .iter()
                    .map(|v| (v.recipe.as_str(), v.date))
                    .collect::<BTreeSet<_>>();
                let dates = slots
                    .iter()
                    .map(|(_, d)| *d)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                (
                    slots.into_iter().map(|(r, d)| (r.to_string(), d)).collect(),
                    dates,
                )
            }
        };
        let mut slot_index = HashMap::<String, HashMap<Date, usize>>::new();
        for (i, (recipe, date)) in slots.iter().enumerate() {
            slot_index
                .entry(recipe.clone())
                .or_default()
                .insert(*date, i);
        }
        let ingredient_index = ingredients
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Self {
            slots,
            ingredients,
            dates,
            slot_index,
            ingredient_index,
        }
    }

    /// Candidate ingredients, sorted by name.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Candidate dates in chronological order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.slots.len() * self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self, recipe: &str, date: Date, ingredient: &str) -> Option<usize> {
        let slot = *self.slot_index.get(recipe)?.get(&date)?;
        let ingredient = *self.ingredient_index.get(ingredient)?;
        Some(slot * self.ingredients.len() + ingredient)
    }

    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.slots.iter().flat_map(move |(recipe, date)| {
            self.ingredients
                .iter()
                .map(move |ingredient| CellKey::new(recipe.as_str(), ingredient.as_str(), *date))
        })
    }
}

/// Running sums over a key space, starts zero filled.
pub struct Accumulator<'k> {
    space: &'k KeySpace,
    sums: Vec<Decimal>,
}

impl<'k> Accumulator<'k> {
    pub fn new(space: &'k KeySpace) -> Self {
        Self {
            space,
            sums: vec![Decimal::ZERO; space.len()],
        }
    }

    pub fn add(&mut self, recipe: &str, date: Date, ingredient: &str, quantity: Decimal) -> Result<()> {
        let Some(i) = self.space.position(recipe, date, ingredient) else {
            let error = ReportError::InconsistentDomain {
                recipe: recipe.into(),
                ingredient: ingredient.into(),
                date,
            };
            log::error!("{}", error);
            return Err(error.into());
        };
        self.sums[i] += quantity;
        Ok(())
    }

    pub fn finish(self) -> UsageMatrix {
        self.space.keys().zip(self.sums).collect()
    }
}

/// Group the masked rows by key and sum their quantities.
pub fn aggregate<'a>(
    rows: impl IntoIterator<Item = MaskedRow<'a>>,
    space: &KeySpace,
) -> Result<UsageMatrix> {
    let mut accumulator = Accumulator::new(space);
    let mut count = 0usize;
    for row in rows {
        accumulator.add(row.recipe, row.date, row.ingredient, row.quantity)?;
        count += 1;
    }
    log::debug!(
        "Aggregated {} masked rows into {} cells",
        count,
        space.len()
    );
    Ok(accumulator.finish())
}

/// Add every joined event directly into its cell.
pub fn scatter(joined: &[JoinedEvent], space: &KeySpace) -> Result<UsageMatrix> {
    let mut accumulator = Accumulator::new(space);
    for event in joined {
        accumulator.add(&event.recipe, event.date, &event.ingredient, event.quantity)?;
    }
    log::debug!(
        "Scattered {} events into {} cells",
        joined.len(),
        space.len()
    );
    Ok(accumulator.finish())
}
