#[cfg(test)]
mod tests {
    use pantry::{AsValue, Entity, RowLabeled, UsageEvent, Value};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use time::{Date, macros::date};

    #[test]
    fn decimal_from_store_values() {
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(80))).unwrap(),
            Decimal::from(80)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some(" 0.125 ".into()))).unwrap(),
            Decimal::new(125, 3)
        );
        assert!(Decimal::try_from_value(Value::Date(Some(date!(2020 - 01 - 01)))).is_err());
    }

    #[test]
    fn date_from_text() {
        assert_eq!(
            Date::try_from_value(Value::Varchar(Some("2020-02-01".into()))).unwrap(),
            date!(2020 - 02 - 01)
        );
        assert!(<Date as AsValue>::parse("01/02/2020").is_err());
        assert_eq!(date!(2020 - 02 - 01).as_value().to_string(), "2020-02-01");
    }

    #[test]
    fn nullable_values() {
        assert_eq!(
            Option::<Decimal>::try_from_value(Value::Null).unwrap(),
            None
        );
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int64(Some(3))).unwrap(),
            Some(3)
        );
        assert!(None::<String>.as_value().is_null());
    }

    #[test]
    fn usage_event_from_row() {
        let labels: Arc<[String]> = ["quantity", "date", "ingredient_id", "recipe_id"]
            .into_iter()
            .map(String::from)
            .collect();
        let row = RowLabeled::new(
            labels.clone(),
            [
                Value::Decimal(Some(Decimal::new(2000, 1)), 0, 0),
                Value::Varchar(Some("2020-01-01".into())),
                Value::Int64(Some(1)),
                Value::Int64(Some(2)),
            ]
            .into(),
        );
        let event = UsageEvent::from_row(row).expect("Could not decode the usage event");
        assert_eq!(event, UsageEvent::new(2, 1, date!(2020 - 01 - 01), 200));
        assert_eq!(event.row().len(), UsageEvent::columns().len());

        let missing = RowLabeled::new(labels[..2].into(), [Value::Null, Value::Null].into());
        let error = UsageEvent::from_row(missing).expect_err("The row has no ids");
        assert!(error.to_string().contains("recipe_id"));
    }
}
