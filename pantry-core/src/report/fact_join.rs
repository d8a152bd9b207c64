use crate::{Dimension, Ingredient, Recipe, ReportError, Result, UsageEvent};
use rust_decimal::Decimal;
use std::collections::HashMap;
use time::Date;

/// A usage event with resolved display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedEvent {
    pub recipe: String,
    pub ingredient: String,
    pub date: Date,
    pub quantity: Decimal,
}

/// Resolve the recipe and ingredient of every usage event.
///
/// The result is sorted by recipe, date and ingredient.
pub fn fact_join(
    recipes: &[Recipe],
    ingredients: &[Ingredient],
    events: &[UsageEvent],
) -> Result<Vec<JoinedEvent>> {
    let recipes: HashMap<_, _> = recipes.iter().map(|v| (v.id, v.name.as_str())).collect();
    let ingredients: HashMap<_, _> = ingredients
        .iter()
        .map(|v| (v.id, v.name.as_str()))
        .collect();
    let mut result = events
        .iter()
        .map(|event| -> std::result::Result<_, ReportError> {
            let missing = |dimension| ReportError::ReferentialIntegrity {
                recipe_id: event.recipe_id,
                ingredient_id: event.ingredient_id,
                date: event.date,
                missing: dimension,
            };
            let recipe = recipes
                .get(&event.recipe_id)
                .ok_or_else(|| missing(Dimension::Recipe))?;
            let ingredient = ingredients
                .get(&event.ingredient_id)
                .ok_or_else(|| missing(Dimension::Ingredient))?;
            Ok(JoinedEvent {
                recipe: (*recipe).into(),
                ingredient: (*ingredient).into(),
                date: event.date,
                quantity: event.quantity,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    result.sort_by(|a, b| {
        (&a.recipe, a.date, &a.ingredient).cmp(&(&b.recipe, b.date, &b.ingredient))
    });
    log::debug!("Fact join produced {} rows", result.len());
    Ok(result)
}
