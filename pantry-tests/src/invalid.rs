use pantry::{
    DateDomain, Dimension, Ingredient, Recipe, ReportError, ReportOptions, Snapshot, Store,
    UsageEvent,
};
use rust_decimal::Decimal;
use time::macros::date;

use crate::{cake_snapshot, silent_logs};

/// Either the store refuses the snapshot or the report fails, in both cases
/// with the expected error. A refused snapshot leaves the previous content.
async fn rejected<S: Store>(
    store: &mut S,
    snapshot: &Snapshot,
    options: &ReportOptions,
    expected: impl Fn(&ReportError) -> bool,
) {
    let previous = cake_snapshot();
    store
        .save(&previous)
        .await
        .expect("Could not save the cake snapshot");
    silent_logs! {
        let error = match store.save(snapshot).await {
            Ok(()) => store
                .report(options)
                .await
                .expect_err("The report of an invalid snapshot must fail"),
            Err(error) => {
                let mut kept = Snapshot::load(store)
                    .await
                    .expect("Could not load the content after a refused save");
                kept.ingredients.sort_by_key(|v| v.id);
                assert_eq!(kept, previous, "A refused save must keep the previous content");
                error
            }
        };
        let report_error = error
            .downcast_ref::<ReportError>()
            .expect("The error must be a ReportError");
        assert!(expected(report_error), "Unexpected error: {:?}", report_error);
    }
}

pub async fn invalid<S: Store>(store: &mut S) {
    let options = ReportOptions::default();

    let mut missing_recipe = cake_snapshot();
    missing_recipe
        .usage_events
        .push(UsageEvent::new(7, 1, date!(2020 - 01 - 02), 1));
    rejected(store, &missing_recipe, &options, |e| {
        matches!(
            e,
            ReportError::ReferentialIntegrity {
                recipe_id: 7,
                missing: Dimension::Recipe,
                ..
            }
        )
    })
    .await;

    let mut missing_ingredient = cake_snapshot();
    missing_ingredient
        .usage_events
        .push(UsageEvent::new(1, 42, date!(2020 - 01 - 02), 1));
    rejected(store, &missing_ingredient, &options, |e| {
        matches!(
            e,
            ReportError::ReferentialIntegrity {
                ingredient_id: 42,
                missing: Dimension::Ingredient,
                ..
            }
        )
    })
    .await;

    let mut same_name = cake_snapshot();
    same_name.ingredients.push(Ingredient::new(6, "Milk"));
    rejected(store, &same_name, &options, |e| {
        matches!(
            e,
            ReportError::DuplicateKey {
                dimension: Dimension::Ingredient,
                ..
            }
        )
    })
    .await;

    let mut same_id = cake_snapshot();
    same_id.recipes.push(Recipe::new(1, "Pancake"));
    rejected(store, &same_id, &options, |e| {
        matches!(
            e,
            ReportError::DuplicateKey {
                dimension: Dimension::Recipe,
                ..
            }
        )
    })
    .await;

    let mut twice = cake_snapshot();
    twice
        .usage_events
        .push(UsageEvent::new(1, 1, date!(2020 - 01 - 01), 5));
    rejected(store, &twice, &options, |e| {
        matches!(e, ReportError::DuplicateEvent { .. })
    })
    .await;

    let mut negative = cake_snapshot();
    negative.usage_events[3].quantity = (-80).into();
    rejected(store, &negative, &options, |e| {
        matches!(e, ReportError::NegativeQuantity { .. })
    })
    .await;

    let mut too_precise = cake_snapshot();
    too_precise.usage_events[0].quantity = Decimal::new(4, 4);
    too_precise.usage_events[1].quantity = Decimal::new(4, 4);
    rejected(store, &too_precise, &options, |e| {
        matches!(
            e,
            ReportError::QuantityPrecision {
                recipe_id: 1,
                ingredient_id: 1,
                ..
            }
        )
    })
    .await;

    let outside = cake_snapshot();
    rejected(
        store,
        &outside,
        &ReportOptions::new().with_dates(DateDomain::Fixed(vec![date!(2020 - 02 - 01)])),
        |e| matches!(e, ReportError::OutsideDomain { .. }),
    )
    .await;
}
