use crate::PivotTable;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Coordinates of a matrix cell, ordered by recipe, then date, then ingredient.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub recipe: String,
    pub date: Date,
    pub ingredient: String,
}

impl CellKey {
    pub fn new(recipe: impl Into<String>, ingredient: impl Into<String>, date: Date) -> Self {
        Self {
            recipe: recipe.into(),
            date,
            ingredient: ingredient.into(),
        }
    }
}

/// One cell of the unpivoted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRow<'a> {
    pub recipe: &'a str,
    pub ingredient: &'a str,
    pub date: Date,
    pub quantity: Decimal,
}

/// Dense mapping from (recipe, ingredient, date) to the quantity used.
///
/// Every combination of the key space has a cell, zero when nothing was used.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UsageMatrix {
    cells: BTreeMap<CellKey, Decimal>,
}

impl UsageMatrix {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, recipe: &str, ingredient: &str, date: Date) -> Option<Decimal> {
        self.cells
            .get(&CellKey::new(recipe, ingredient, date))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &Decimal)> {
        self.cells.iter()
    }

    /// The unpivoted report, ordered by recipe, date, ingredient.
    pub fn rows(&self) -> impl Iterator<Item = UsageRow<'_>> {
        self.cells.iter().map(|(k, v)| UsageRow {
            recipe: &k.recipe,
            ingredient: &k.ingredient,
            date: k.date,
            quantity: *v,
        })
    }

    pub fn recipes(&self) -> Vec<&str> {
        self.cells
            .keys()
            .map(|k| k.recipe.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn ingredients(&self) -> Vec<&str> {
        self.cells
            .keys()
            .map(|k| k.ingredient.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct dates in chronological order.
    pub fn dates(&self) -> Vec<Date> {
        self.cells
            .keys()
            .map(|k| k.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn total(&self) -> Decimal {
        self.cells.values().sum()
    }

    pub fn recipe_total(&self, recipe: &str) -> Decimal {
        self.cells
            .iter()
            .filter(|(k, _)| k.recipe == recipe)
            .map(|(_, v)| *v)
            .sum()
    }

    pub fn pivot(&self) -> PivotTable {
        PivotTable::new(self)
    }
}

/// Collects cells, a repeated key keeps the sum of the quantities.
impl FromIterator<(CellKey, Decimal)> for UsageMatrix {
    fn from_iter<T: IntoIterator<Item = (CellKey, Decimal)>>(iter: T) -> Self {
        let mut cells = BTreeMap::new();
        for (key, quantity) in iter {
            *cells.entry(key).or_insert(Decimal::ZERO) += quantity;
        }
        Self { cells }
    }
}

impl<'a> IntoIterator for &'a UsageMatrix {
    type Item = (&'a CellKey, &'a Decimal);
    type IntoIter = std::collections::btree_map::Iter<'a, CellKey, Decimal>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
