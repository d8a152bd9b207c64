#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pantry::{
        DateDomain, Ingredient, PivotTable, Recipe, Report, ReportOptions, Snapshot, UsageEvent,
        UsageMatrix,
    };
    use rust_decimal::Decimal;
    use time::macros::date;

    fn matrix() -> UsageMatrix {
        let snapshot = Snapshot {
            recipes: vec![Recipe::new(1, "Cake")],
            ingredients: vec![Ingredient::new(1, "Milk"), Ingredient::new(2, "Eggs")],
            usage_events: vec![UsageEvent::new(1, 1, date!(2020 - 01 - 01), 200)],
            dates: vec![],
        };
        Report::new(ReportOptions::new().with_dates(DateDomain::Fixed(vec![
            date!(2020 - 02 - 01),
            date!(2020 - 01 - 01),
        ])))
        .compute(&snapshot)
        .expect("Could not compute the report")
    }

    #[test]
    fn pivot_columns() {
        let pivot = matrix().pivot();
        assert_eq!(pivot.dates, [date!(2020 - 01 - 01), date!(2020 - 02 - 01)]);
        assert!(
            pivot
                .rows
                .iter()
                .map(|v| v.ingredient.as_str())
                .eq(["Eggs", "Milk"])
        );
        assert_eq!(
            pivot.get("Cake", "Milk", date!(2020 - 01 - 01)),
            Some(Decimal::from(200))
        );
        assert_eq!(
            pivot.get("Cake", "Milk", date!(2020 - 02 - 01)),
            Some(Decimal::ZERO)
        );
        assert_eq!(pivot.get("Cake", "Milk", date!(2020 - 03 - 01)), None);
        assert_eq!(pivot.get("Pancake", "Milk", date!(2020 - 01 - 01)), None);
    }

    #[test]
    fn pivot_display() {
        assert_eq!(
            matrix().pivot().to_string(),
            indoc! {"
                ┌────────┬────────────┬────────────┬────────────┐
                │ recipe │ ingredient │ 2020-01-01 │ 2020-02-01 │
                ├────────┼────────────┼────────────┼────────────┤
                │ Cake   │ Eggs       │          0 │          0 │
                │ Cake   │ Milk       │        200 │          0 │
                └────────┴────────────┴────────────┴────────────┘
            "}
        );
    }

    #[test]
    fn empty_pivot() {
        let pivot = PivotTable::new(&UsageMatrix::new());
        assert!(pivot.is_empty());
        assert!(pivot.dates.is_empty());
    }

    #[test]
    fn matrix_rows() {
        let matrix = matrix();
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.ingredients(), ["Eggs", "Milk"]);
        assert!(
            matrix
                .rows()
                .map(|v| (v.date, v.ingredient, v.quantity))
                .eq([
                    (date!(2020 - 01 - 01), "Eggs", Decimal::ZERO),
                    (date!(2020 - 01 - 01), "Milk", Decimal::from(200)),
                    (date!(2020 - 02 - 01), "Eggs", Decimal::ZERO),
                    (date!(2020 - 02 - 01), "Milk", Decimal::ZERO),
                ])
        );
        assert_eq!((&matrix).into_iter().count(), 4);
    }
}
