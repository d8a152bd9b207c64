use pantry::{DateDomain, Dimensions, Report, ReportOptions, Store};
use rust_decimal::Decimal;
use time::macros::date;

use crate::kitchen_snapshot;

/// Quantities with decimal places, down to the finest a store keeps, come
/// back exactly as the in-memory pipeline computes them.
pub async fn fractional<S: Store>(store: &mut S) {
    let mut snapshot = kitchen_snapshot();
    snapshot.usage_events[0].quantity = Decimal::new(2005, 1);
    snapshot.usage_events[1].quantity = Decimal::new(125, 3);
    snapshot.usage_events[4].quantity = Decimal::new(1, 3);
    snapshot.usage_events[5].quantity = Decimal::new(99999, 3);
    store
        .save(&snapshot)
        .await
        .expect("Could not save the fractional snapshot");
    for options in [
        ReportOptions::default(),
        ReportOptions::new().with_dates(DateDomain::Source),
        ReportOptions::new().with_dimensions(Dimensions::Ingredient),
    ] {
        let stored = store
            .report(&options)
            .await
            .expect("Could not compute the report in the store");
        let expected = Report::new(options.clone())
            .compute(&snapshot)
            .expect("Could not compute the report in memory");
        assert_eq!(stored, expected, "{:?}", options);
        assert_eq!(stored.total(), Decimal::new(1460625, 3), "{:?}", options);
    }

    let matrix = store
        .report(&ReportOptions::default())
        .await
        .expect("Could not compute the report");
    let january = date!(2020 - 01 - 01);
    let february = date!(2020 - 02 - 01);
    assert_eq!(
        matrix.get("Cake", "Milk", january),
        Some(Decimal::new(2005, 1))
    );
    assert_eq!(
        matrix.get("Cake", "Eggs", january),
        Some(Decimal::new(125, 3))
    );
    assert_eq!(
        matrix.get("Fried Rice", "Baking Soda", february),
        Some(Decimal::new(1, 3))
    );
    assert_eq!(
        matrix.get("Fried Rice", "Steak", february),
        Some(Decimal::new(99999, 3))
    );
    assert_eq!(matrix.get("Fried Rice", "Milk", january), Some(Decimal::ZERO));
}
