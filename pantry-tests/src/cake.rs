use pantry::{ReportOptions, Snapshot, Store};
use rust_decimal::Decimal;
use time::macros::date;

use crate::cake_snapshot;

pub async fn cake<S: Store>(store: &mut S) {
    let snapshot = cake_snapshot();
    store
        .save(&snapshot)
        .await
        .expect("Could not save the cake snapshot");

    let loaded = Snapshot::load(store)
        .await
        .expect("Could not load the cake snapshot");
    assert_eq!(loaded.recipes, snapshot.recipes);
    assert_eq!(loaded.usage_events, snapshot.usage_events);
    let mut ingredients = loaded.ingredients.clone();
    ingredients.sort_by_key(|v| v.id);
    assert_eq!(ingredients, snapshot.ingredients);

    let matrix = store
        .report(&ReportOptions::default())
        .await
        .expect("Could not compute the cake report");
    let day = date!(2020 - 01 - 01);
    assert_eq!(matrix.len(), 5);
    assert_eq!(matrix.get("Cake", "Milk", day), Some(Decimal::from(200)));
    assert_eq!(matrix.get("Cake", "Eggs", day), Some(Decimal::from(100)));
    assert_eq!(matrix.get("Cake", "Flour", day), Some(Decimal::from(500)));
    assert_eq!(matrix.get("Cake", "Sugar", day), Some(Decimal::from(80)));
    assert_eq!(matrix.get("Cake", "Butter", day), Some(Decimal::ZERO));
    assert_eq!(matrix.total(), Decimal::from(880));
    assert!(
        matrix
            .rows()
            .map(|v| v.ingredient)
            .eq(["Butter", "Eggs", "Flour", "Milk", "Sugar"])
    );

    let pivot = matrix.pivot();
    assert_eq!(pivot.dates, [day]);
    assert_eq!(pivot.rows.len(), 5);
    assert_eq!(
        pivot.row("Cake", "Milk").map(|v| v.quantities.as_slice()),
        Some([Some(Decimal::from(200))].as_slice())
    );
}
