use crate::{Dimension, Dimensions, QUANTITY_SCALE, ReportError, Result, Snapshot};
use std::collections::{BTreeSet, HashSet};
use time::Date;

/// Check the input of a report run, before anything is computed.
///
/// Fails on the first problem found: duplicated recipe or ingredient ids and
/// names, usage events referencing missing rows, repeated or negative usage
/// events, quantities finer than [`QUANTITY_SCALE`] and, when `dates` is
/// supplied, events outside of it.
pub fn validate(
    snapshot: &Snapshot,
    dimensions: Dimensions,
    dates: Option<&BTreeSet<Date>>,
) -> Result<()> {
    let result = check(snapshot, dimensions, dates);
    if let Err(error) = &result {
        log::error!("{}", error);
    }
    Ok(result?)
}

fn check(
    snapshot: &Snapshot,
    dimensions: Dimensions,
    dates: Option<&BTreeSet<Date>>,
) -> std::result::Result<(), ReportError> {
    let recipes = unique(
        Dimension::Recipe,
        snapshot.recipes.iter().map(|v| (v.id, v.name.as_str())),
    )?;
    let ingredients = unique(
        Dimension::Ingredient,
        snapshot.ingredients.iter().map(|v| (v.id, v.name.as_str())),
    )?;
    let mut seen = HashSet::with_capacity(snapshot.usage_events.len());
    for event in &snapshot.usage_events {
        let missing = if !recipes.contains(&event.recipe_id) {
            Some(Dimension::Recipe)
        } else if !ingredients.contains(&event.ingredient_id) {
            Some(Dimension::Ingredient)
        } else {
            None
        };
        if let Some(missing) = missing {
            return Err(ReportError::ReferentialIntegrity {
                recipe_id: event.recipe_id,
                ingredient_id: event.ingredient_id,
                date: event.date,
                missing,
            });
        }
        if !seen.insert((event.recipe_id, event.ingredient_id, event.date)) {
            return Err(ReportError::DuplicateEvent {
                recipe_id: event.recipe_id,
                ingredient_id: event.ingredient_id,
                date: event.date,
            });
        }
        if event.quantity.is_sign_negative() && !event.quantity.is_zero() {
            return Err(ReportError::NegativeQuantity {
                recipe_id: event.recipe_id,
                ingredient_id: event.ingredient_id,
                date: event.date,
                quantity: event.quantity,
            });
        }
        if event.quantity.normalize().scale() > QUANTITY_SCALE {
            return Err(ReportError::QuantityPrecision {
                recipe_id: event.recipe_id,
                ingredient_id: event.ingredient_id,
                date: event.date,
                quantity: event.quantity,
            });
        }
        if let (Dimensions::IngredientAndDate, Some(dates)) = (dimensions, dates) {
            if !dates.contains(&event.date) {
                return Err(ReportError::OutsideDomain {
                    recipe_id: event.recipe_id,
                    ingredient_id: event.ingredient_id,
                    date: event.date,
                });
            }
        }
    }
    Ok(())
}

/// Ids of the rows, both ids and names must be unique.
fn unique<'a>(
    dimension: Dimension,
    rows: impl Iterator<Item = (i64, &'a str)>,
) -> std::result::Result<HashSet<i64>, ReportError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for (id, name) in rows {
        if !ids.insert(id) {
            return Err(ReportError::DuplicateKey {
                dimension,
                key: id.to_string(),
            });
        }
        if !names.insert(name) {
            return Err(ReportError::DuplicateKey {
                dimension,
                key: name.into(),
            });
        }
    }
    Ok(ids)
}
