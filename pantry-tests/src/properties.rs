use pantry::{DateDomain, Dimensions, Report, ReportOptions, Snapshot, Store, Strategy};
use rust_decimal::Decimal;

use crate::{cake_snapshot, kitchen_snapshot, months};

fn option_grid() -> Vec<ReportOptions> {
    let mut result = Vec::new();
    for dimensions in [Dimensions::IngredientAndDate, Dimensions::Ingredient] {
        for dates in [
            DateDomain::Observed,
            DateDomain::Source,
            DateDomain::Fixed(months()),
        ] {
            result.push(
                ReportOptions::new()
                    .with_dimensions(dimensions)
                    .with_dates(dates),
            );
        }
    }
    result
}

/// The store agrees with both in-memory strategies, the matrix is dense and
/// keeps the total quantity.
pub async fn strategies<S: Store>(store: &mut S) {
    for snapshot in [cake_snapshot(), kitchen_snapshot()] {
        store
            .save(&snapshot)
            .await
            .expect("Could not save the snapshot");
        for options in option_grid() {
            if options.dimensions == Dimensions::IngredientAndDate
                && options.dates == DateDomain::Source
                && snapshot.dates.is_empty()
            {
                // Every usage event would fall outside of the domain
                continue;
            }
            let stored = store
                .report(&options)
                .await
                .expect("Could not compute the report in the store");
            let scatter = Report::new(options.clone().with_strategy(Strategy::Scatter))
                .compute(&snapshot)
                .expect("Could not scatter the usage events");
            let cross_join = Report::new(options.clone().with_strategy(Strategy::CrossJoin))
                .compute(&snapshot)
                .expect("Could not cross join the usage events");
            assert_eq!(scatter, cross_join, "{:?}", options);
            assert_eq!(stored, scatter, "{:?}", options);

            let total = snapshot
                .usage_events
                .iter()
                .map(|v| v.quantity)
                .sum::<Decimal>();
            assert_eq!(stored.total(), total, "{:?}", options);
            let slots = match options.dimensions {
                Dimensions::IngredientAndDate => {
                    snapshot.recipes.len()
                        * options
                            .date_domain(&snapshot)
                            .map(|v| v.len())
                            .unwrap_or(stored.dates().len())
                }
                Dimensions::Ingredient => {
                    let mut pairs = snapshot
                        .usage_events
                        .iter()
                        .map(|v| (v.recipe_id, v.date))
                        .collect::<Vec<_>>();
                    pairs.sort();
                    pairs.dedup();
                    pairs.len()
                }
            };
            assert_eq!(
                stored.len(),
                slots * snapshot.ingredients.len(),
                "{:?}",
                options
            );
        }
    }
}

/// Running a report does not change the store, running it again gives the same matrix.
pub async fn idempotence<S: Store>(store: &mut S) {
    let snapshot = kitchen_snapshot();
    store
        .save(&snapshot)
        .await
        .expect("Could not save the kitchen snapshot");
    let options = ReportOptions::new().with_dates(DateDomain::Source);
    let first = store
        .report(&options)
        .await
        .expect("Could not compute the first report");
    let second = store
        .report(&options)
        .await
        .expect("Could not compute the second report");
    assert_eq!(first, second);
    let mut loaded = Snapshot::load(store)
        .await
        .expect("Could not load the snapshot back");
    loaded.ingredients.sort_by_key(|v| v.id);
    loaded.dates.sort();
    assert_eq!(loaded, snapshot);
}
