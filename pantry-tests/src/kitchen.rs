use pantry::{DateDomain, Dimensions, ReportOptions, Store};
use rust_decimal::Decimal;
use time::macros::date;

use crate::{kitchen_snapshot, months};

pub async fn kitchen<S: Store>(store: &mut S) {
    let snapshot = kitchen_snapshot();
    store
        .save(&snapshot)
        .await
        .expect("Could not save the kitchen snapshot");

    // Every recipe, every month, every ingredient
    let matrix = store
        .report(&ReportOptions::new().with_dates(DateDomain::Fixed(months())))
        .await
        .expect("Could not compute the monthly report");
    assert_eq!(matrix.len(), 2 * 4 * 9);
    assert_eq!(matrix.total(), Decimal::from(1760));
    assert_eq!(matrix.recipe_total("Cake"), Decimal::from(880));
    assert_eq!(matrix.recipe_total("Fried Rice"), Decimal::from(880));
    assert_eq!(
        matrix.get("Cake", "Milk", date!(2020 - 01 - 01)),
        Some(Decimal::from(200))
    );
    assert_eq!(
        matrix.get("Cake", "Milk", date!(2020 - 02 - 01)),
        Some(Decimal::ZERO)
    );
    assert_eq!(
        matrix.get("Fried Rice", "Baking Soda", date!(2020 - 02 - 01)),
        Some(Decimal::from(200))
    );
    assert_eq!(
        matrix.get("Fried Rice", "Salt", date!(2020 - 04 - 01)),
        Some(Decimal::ZERO)
    );
    assert_eq!(matrix.recipes(), ["Cake", "Fried Rice"]);
    assert_eq!(matrix.dates(), months());

    let pivot = matrix.pivot();
    assert_eq!(pivot.dates, months());
    assert_eq!(pivot.rows.len(), 2 * 9);
    assert_eq!(
        pivot.row("Fried Rice", "Steak").map(|v| v.quantities.clone()),
        Some(vec![
            Some(Decimal::ZERO),
            Some(Decimal::from(100)),
            Some(Decimal::ZERO),
            Some(Decimal::ZERO),
        ])
    );

    // The same months, listed by the store
    let sourced = store
        .report(&ReportOptions::new().with_dates(DateDomain::Source))
        .await
        .expect("Could not compute the report over the stored dates");
    assert_eq!(sourced, matrix);

    // Only the dates something was cooked on
    let observed = store
        .report(&ReportOptions::default())
        .await
        .expect("Could not compute the report over the observed dates");
    assert_eq!(observed.len(), 2 * 2 * 9);
    assert_eq!(
        observed.get("Cake", "Steak", date!(2020 - 02 - 01)),
        Some(Decimal::ZERO)
    );
    assert_eq!(observed.get("Cake", "Steak", date!(2020 - 03 - 01)), None);

    // Each recipe only on its own dates
    let single = store
        .report(&ReportOptions::new().with_dimensions(Dimensions::Ingredient))
        .await
        .expect("Could not compute the single variable report");
    assert_eq!(single.len(), 2 * 9);
    assert_eq!(single.get("Cake", "Steak", date!(2020 - 02 - 01)), None);
    assert_eq!(
        single.get("Fried Rice", "Msg", date!(2020 - 02 - 01)),
        Some(Decimal::from(500))
    );
    assert_eq!(single.total(), Decimal::from(1760));
}
