use crate::{QUANTITY_SCALE, write_date};
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Recipe,
    Ingredient,
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Recipe => "recipe",
            Dimension::Ingredient => "ingredient",
        })
    }
}

/// Inconsistent input detected by a report run.
///
/// Carried inside [`crate::Error`], match it with `error.downcast_ref::<ReportError>()`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// A usage event references a recipe or ingredient that does not exist.
    ReferentialIntegrity {
        recipe_id: i64,
        ingredient_id: i64,
        date: Date,
        missing: Dimension,
    },
    /// Two dimension rows share the same id or name.
    DuplicateKey { dimension: Dimension, key: String },
    /// More than one usage event for the same (recipe, ingredient, date).
    DuplicateEvent {
        recipe_id: i64,
        ingredient_id: i64,
        date: Date,
    },
    NegativeQuantity {
        recipe_id: i64,
        ingredient_id: i64,
        date: Date,
        quantity: Decimal,
    },
    /// A quantity with more decimal places than stores keep.
    QuantityPrecision {
        recipe_id: i64,
        ingredient_id: i64,
        date: Date,
        quantity: Decimal,
    },
    /// A usage event date is not part of the supplied date domain.
    OutsideDomain {
        recipe_id: i64,
        ingredient_id: i64,
        date: Date,
    },
    /// An aggregated row falls outside the key space of the matrix.
    InconsistentDomain {
        recipe: String,
        ingredient: String,
        date: Date,
    },
    /// The report total differs from the total quantity of the usage events.
    ConservationMismatch { expected: Decimal, actual: Decimal },
}

struct DisplayDate<'a>(&'a Date);

impl Display for DisplayDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.0)
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::ReferentialIntegrity {
                recipe_id,
                ingredient_id,
                date,
                missing,
            } => {
                let id = match missing {
                    Dimension::Recipe => recipe_id,
                    Dimension::Ingredient => ingredient_id,
                };
                write!(
                    f,
                    "Usage event (recipe {}, ingredient {}, {}) references the {} with id {} that does not exist",
                    recipe_id,
                    ingredient_id,
                    DisplayDate(date),
                    missing,
                    id
                )
            }
            ReportError::DuplicateKey { dimension, key } => {
                write!(f, "The {} key `{}` is not unique", dimension, key)
            }
            ReportError::DuplicateEvent {
                recipe_id,
                ingredient_id,
                date,
            } => write!(
                f,
                "More than one usage event for recipe {}, ingredient {} on {}",
                recipe_id,
                ingredient_id,
                DisplayDate(date)
            ),
            ReportError::NegativeQuantity {
                recipe_id,
                ingredient_id,
                date,
                quantity,
            } => write!(
                f,
                "Usage event (recipe {}, ingredient {}, {}) has negative quantity {}",
                recipe_id,
                ingredient_id,
                DisplayDate(date),
                quantity
            ),
            ReportError::QuantityPrecision {
                recipe_id,
                ingredient_id,
                date,
                quantity,
            } => write!(
                f,
                "Usage event (recipe {}, ingredient {}, {}) has quantity {} with more than {} decimal places",
                recipe_id,
                ingredient_id,
                DisplayDate(date),
                quantity,
                QUANTITY_SCALE
            ),
            ReportError::OutsideDomain {
                recipe_id,
                ingredient_id,
                date,
            } => write!(
                f,
                "Usage event (recipe {}, ingredient {}) happened on {} which is not part of the date domain",
                recipe_id,
                ingredient_id,
                DisplayDate(date)
            ),
            ReportError::InconsistentDomain {
                recipe,
                ingredient,
                date,
            } => write!(
                f,
                "The cell ({}, {}, {}) is not part of the report key space",
                recipe,
                ingredient,
                DisplayDate(date)
            ),
            ReportError::ConservationMismatch { expected, actual } => write!(
                f,
                "The report sums up to {} but the usage events total {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ReportError {}
