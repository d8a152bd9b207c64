mod aggregate;
mod expansion;
mod fact_join;
mod mask;
mod matrix;
mod options;
mod pivot;
mod validate;

pub use aggregate::*;
pub use expansion::*;
pub use fact_join::*;
pub use mask::*;
pub use matrix::*;
pub use options::*;
pub use pivot::*;
pub use validate::*;

use crate::{DataSource, Result, Snapshot};

/// Computes the usage matrix of a snapshot.
///
/// ```rust
/// use pantry_core::{Ingredient, Recipe, Report, Snapshot, UsageEvent};
/// use rust_decimal::Decimal;
/// use time::macros::date;
///
/// let snapshot = Snapshot {
///     recipes: vec![Recipe::new(1, "Cake")],
///     ingredients: vec![Ingredient::new(1, "Milk"), Ingredient::new(2, "Butter")],
///     usage_events: vec![UsageEvent::new(1, 1, date!(2020 - 01 - 01), 200)],
///     dates: vec![],
/// };
/// let matrix = Report::default().compute(&snapshot).unwrap();
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.get("Cake", "Butter", date!(2020 - 01 - 01)), Some(Decimal::ZERO));
/// ```
#[derive(Default, Debug, Clone)]
pub struct Report {
    pub options: ReportOptions,
}

impl Report {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Load a snapshot from `source` and compute its matrix.
    pub async fn run<S: DataSource>(&self, source: &mut S) -> Result<UsageMatrix> {
        let snapshot = Snapshot::load(source).await?;
        self.compute(&snapshot)
    }

    pub fn compute(&self, snapshot: &Snapshot) -> Result<UsageMatrix> {
        let dates = self.options.date_domain(snapshot);
        validate(snapshot, self.options.dimensions, dates.as_ref())?;
        let joined = fact_join(
            &snapshot.recipes,
            &snapshot.ingredients,
            &snapshot.usage_events,
        )?;
        let space = KeySpace::new(
            self.options.dimensions,
            snapshot.recipes.iter().map(|v| v.name.as_str()),
            snapshot.ingredients.iter().map(|v| v.name.as_str()),
            dates.unwrap_or_else(|| joined.iter().map(|v| v.date).collect()),
            &joined,
        );
        let matrix = match self.options.strategy {
            Strategy::Scatter => scatter(&joined, &space)?,
            Strategy::CrossJoin => {
                let candidates = Candidates {
                    ingredients: space.ingredients(),
                    dates: match self.options.dimensions {
                        Dimensions::Ingredient => None,
                        Dimensions::IngredientAndDate => Some(space.dates()),
                    },
                };
                aggregate(expand(&joined, candidates).map(MaskedRow::from), &space)?
            }
        };
        log::debug!(
            "Usage report computed with {:?}: {} cells, total {}",
            self.options.strategy,
            matrix.len(),
            matrix.total()
        );
        Ok(matrix)
    }
}
