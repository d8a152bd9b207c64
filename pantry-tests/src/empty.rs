use pantry::{DateDomain, Dimensions, ReportOptions, Snapshot, Store};
use rust_decimal::Decimal;
use time::macros::date;

use crate::kitchen_snapshot;

pub async fn empty<S: Store>(store: &mut S) {
    let dimensions_only = Snapshot {
        usage_events: vec![],
        dates: vec![],
        ..kitchen_snapshot()
    };
    store
        .save(&dimensions_only)
        .await
        .expect("Could not save a snapshot without usage events");

    let observed = store
        .report(&ReportOptions::default())
        .await
        .expect("A report without usage events must not fail");
    assert!(observed.is_empty());

    let single = store
        .report(&ReportOptions::new().with_dimensions(Dimensions::Ingredient))
        .await
        .expect("A single variable report without usage events must not fail");
    assert!(single.is_empty());

    // The supplied dates still produce a zero filled matrix
    let fixed = store
        .report(&ReportOptions::new().with_dates(DateDomain::Fixed(vec![
            date!(2021 - 06 - 01),
            date!(2021 - 07 - 01),
            date!(2021 - 06 - 01),
        ])))
        .await
        .expect("Could not compute the zero filled report");
    assert_eq!(fixed.len(), 2 * 2 * 9);
    assert_eq!(fixed.total(), Decimal::ZERO);
    assert!(fixed.rows().all(|v| v.quantity.is_zero()));

    let none = store
        .report(&ReportOptions::new().with_dates(DateDomain::Fixed(vec![])))
        .await
        .expect("An empty date domain must not fail");
    assert!(none.is_empty());

    store
        .save(&Snapshot::default())
        .await
        .expect("Could not save the empty snapshot");
    let nothing = store
        .report(&ReportOptions::default())
        .await
        .expect("A report of nothing must not fail");
    assert!(nothing.is_empty());
    assert!(nothing.pivot().is_empty());
}
