#[cfg(test)]
mod tests {
    use pantry::{
        Candidates, DateDomain, Dimensions, Ingredient, JoinedEvent, KeySpace, MaskedRow, Recipe,
        Report, ReportError, ReportOptions, Snapshot, Strategy, UsageEvent, aggregate, expand,
        fact_join, mask, scatter,
    };
    use rust_decimal::Decimal;
    use time::{Date, macros::date};

    fn joined(recipe: &str, ingredient: &str, date: Date, quantity: i64) -> JoinedEvent {
        JoinedEvent {
            recipe: recipe.into(),
            ingredient: ingredient.into(),
            date,
            quantity: quantity.into(),
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn cake() -> Snapshot {
        Snapshot {
            recipes: vec![Recipe::new(1, "Cake")],
            ingredients: vec![
                Ingredient::new(1, "Milk"),
                Ingredient::new(2, "Eggs"),
                Ingredient::new(3, "Flour"),
                Ingredient::new(4, "Sugar"),
                Ingredient::new(5, "Butter"),
            ],
            usage_events: vec![
                UsageEvent::new(1, 1, date!(2020 - 01 - 01), 200),
                UsageEvent::new(1, 2, date!(2020 - 01 - 01), 100),
                UsageEvent::new(1, 3, date!(2020 - 01 - 01), 500),
                UsageEvent::new(1, 4, date!(2020 - 01 - 01), 80),
            ],
            dates: vec![],
        }
    }

    fn report_error(snapshot: &Snapshot, options: ReportOptions) -> ReportError {
        Report::new(options)
            .compute(snapshot)
            .expect_err("The report must fail")
            .downcast_ref::<ReportError>()
            .expect("The error must be a ReportError")
            .clone()
    }

    #[test]
    fn fact_join_resolves_names() {
        let snapshot = cake();
        let rows = fact_join(
            &snapshot.recipes,
            &snapshot.ingredients,
            &snapshot.usage_events,
        )
        .expect("Could not join the usage events");
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            joined("Cake", "Eggs", date!(2020 - 01 - 01), 100)
        );
        assert!(
            rows.iter()
                .map(|v| v.ingredient.as_str())
                .eq(["Eggs", "Flour", "Milk", "Sugar"])
        );
    }

    #[test]
    fn fact_join_missing_ingredient() {
        let snapshot = cake();
        let error = fact_join(
            &snapshot.recipes,
            &snapshot.ingredients[..1],
            &snapshot.usage_events,
        )
        .expect_err("Eggs are not listed");
        assert!(matches!(
            error.downcast_ref::<ReportError>(),
            Some(ReportError::ReferentialIntegrity {
                ingredient_id: 2,
                ..
            })
        ));
    }

    #[test]
    fn expand_single_variable() {
        let rows = [
            joined("Cake", "Milk", date!(2020 - 01 - 01), 200),
            joined("Cake", "Eggs", date!(2020 - 01 - 01), 100),
        ];
        let ingredients = names(&["Eggs", "Milk", "Steak"]);
        let expanded = expand(
            &rows,
            Candidates {
                ingredients: &ingredients,
                dates: None,
            },
        )
        .collect::<Vec<_>>();
        assert_eq!(expanded.len(), 2 * 3);
        assert!(
            expanded
                .iter()
                .map(|v| (v.event.ingredient.as_str(), v.ingredient))
                .eq([
                    ("Milk", "Eggs"),
                    ("Milk", "Milk"),
                    ("Milk", "Steak"),
                    ("Eggs", "Eggs"),
                    ("Eggs", "Milk"),
                    ("Eggs", "Steak"),
                ])
        );
        assert!(expanded.iter().all(|v| v.date.is_none()));
        assert_eq!(
            expanded.iter().map(mask).sum::<Decimal>(),
            Decimal::from(300)
        );
    }

    #[test]
    fn expand_two_variables() {
        let rows = [joined("Cake", "Milk", date!(2020 - 02 - 01), 200)];
        let ingredients = names(&["Eggs", "Milk"]);
        let dates = [date!(2020 - 01 - 01), date!(2020 - 02 - 01), date!(2020 - 03 - 01)];
        let expanded = expand(
            &rows,
            Candidates {
                ingredients: &ingredients,
                dates: Some(&dates),
            },
        )
        .collect::<Vec<_>>();
        assert_eq!(expanded.len(), 3 * 2);
        assert_eq!(expanded[0].date, Some(date!(2020 - 01 - 01)));
        assert_eq!(expanded[0].ingredient, "Eggs");
        assert_eq!(expanded[5].date, Some(date!(2020 - 03 - 01)));
        assert_eq!(expanded[5].ingredient, "Milk");
        let masked = expanded
            .into_iter()
            .map(MaskedRow::from)
            .filter(|v| !v.quantity.is_zero())
            .collect::<Vec<_>>();
        assert_eq!(masked.len(), 1);
        assert_eq!(masked[0].date, date!(2020 - 02 - 01));
        assert_eq!(masked[0].ingredient, "Milk");
    }

    #[test]
    fn expand_empty_domain() {
        let rows = [joined("Cake", "Milk", date!(2020 - 02 - 01), 200)];
        assert_eq!(
            expand(
                &rows,
                Candidates {
                    ingredients: &[],
                    dates: None,
                },
            )
            .count(),
            0
        );
        let ingredients = names(&["Milk"]);
        assert_eq!(
            expand(
                &rows,
                Candidates {
                    ingredients: &ingredients,
                    dates: Some(&[]),
                },
            )
            .count(),
            0
        );
    }

    #[test]
    fn aggregate_outside_key_space() {
        let rows = [joined("Cake", "Milk", date!(2020 - 02 - 01), 200)];
        let space = KeySpace::new(
            Dimensions::IngredientAndDate,
            ["Cake"],
            ["Milk"],
            [date!(2020 - 01 - 01)],
            &rows,
        );
        assert_eq!(space.len(), 1);
        let error = scatter(&rows, &space).expect_err("The date is not part of the key space");
        assert!(matches!(
            error.downcast_ref::<ReportError>(),
            Some(ReportError::InconsistentDomain { .. })
        ));
        let error = aggregate(
            [MaskedRow {
                recipe: "Pancake",
                ingredient: "Milk",
                date: date!(2020 - 01 - 01),
                quantity: Decimal::ZERO,
            }],
            &space,
        )
        .expect_err("The recipe is not part of the key space");
        assert!(matches!(
            error.downcast_ref::<ReportError>(),
            Some(ReportError::InconsistentDomain { .. })
        ));
    }

    #[test]
    fn key_space_single_variable() {
        let rows = [
            joined("Cake", "Milk", date!(2020 - 01 - 01), 200),
            joined("Cake", "Eggs", date!(2020 - 01 - 01), 100),
            joined("Fried Rice", "Salt", date!(2020 - 02 - 01), 80),
        ];
        let space = KeySpace::new(
            Dimensions::Ingredient,
            ["Cake", "Fried Rice", "Pancake"],
            ["Eggs", "Milk", "Salt"],
            [],
            &rows,
        );
        assert_eq!(space.len(), 2 * 3);
        assert_eq!(space.dates(), [date!(2020 - 01 - 01), date!(2020 - 02 - 01)]);
        assert!(space.position("Cake", date!(2020 - 02 - 01), "Milk").is_none());
        assert!(space.position("Pancake", date!(2020 - 01 - 01), "Milk").is_none());
        let matrix = scatter(&rows, &space).expect("Could not scatter the usage events");
        assert_eq!(matrix.len(), 6);
        assert_eq!(
            matrix.get("Fried Rice", "Milk", date!(2020 - 02 - 01)),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn cake_report() {
        let snapshot = cake();
        for strategy in [Strategy::Scatter, Strategy::CrossJoin] {
            let matrix = Report::new(ReportOptions::new().with_strategy(strategy))
                .compute(&snapshot)
                .expect("Could not compute the cake report");
            let day = date!(2020 - 01 - 01);
            assert_eq!(matrix.len(), 5);
            assert_eq!(matrix.get("Cake", "Milk", day), Some(Decimal::from(200)));
            assert_eq!(matrix.get("Cake", "Eggs", day), Some(Decimal::from(100)));
            assert_eq!(matrix.get("Cake", "Flour", day), Some(Decimal::from(500)));
            assert_eq!(matrix.get("Cake", "Sugar", day), Some(Decimal::from(80)));
            assert_eq!(matrix.get("Cake", "Butter", day), Some(Decimal::ZERO));
            assert_eq!(matrix.total(), Decimal::from(880));
        }
    }

    #[test]
    fn recipe_without_events() {
        let mut snapshot = cake();
        snapshot.recipes.push(Recipe::new(2, "Pancake"));
        let matrix = Report::default()
            .compute(&snapshot)
            .expect("Could not compute the report");
        assert_eq!(matrix.len(), 2 * 5);
        assert_eq!(matrix.recipe_total("Pancake"), Decimal::ZERO);
        let single = Report::new(ReportOptions::new().with_dimensions(Dimensions::Ingredient))
            .compute(&snapshot)
            .expect("Could not compute the single variable report");
        assert_eq!(single.len(), 5);
        assert_eq!(single.recipes(), ["Cake"]);
    }

    #[test]
    fn zero_quantity_event() {
        let mut snapshot = cake();
        snapshot
            .usage_events
            .push(UsageEvent::new(1, 5, date!(2020 - 01 - 01), 0));
        let matrix = Report::default()
            .compute(&snapshot)
            .expect("Could not compute the report");
        assert_eq!(matrix.len(), 5);
        assert_eq!(
            matrix.get("Cake", "Butter", date!(2020 - 01 - 01)),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn fractional_quantities() {
        let mut snapshot = cake();
        snapshot.usage_events[0].quantity = Decimal::new(2005, 1);
        snapshot.usage_events[1].quantity = Decimal::new(125, 3);
        let matrix = Report::new(ReportOptions::new().with_strategy(Strategy::CrossJoin))
            .compute(&snapshot)
            .expect("Could not compute the report");
        assert_eq!(matrix.total(), Decimal::new(780625, 3));
    }

    #[test]
    fn validation_errors() {
        let mut snapshot = cake();
        snapshot.ingredients.push(Ingredient::new(1, "Cream"));
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::DuplicateKey { key, .. } if key == "1"
        ));

        let mut snapshot = cake();
        snapshot.recipes.push(Recipe::new(2, "Cake"));
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::DuplicateKey { key, .. } if key == "Cake"
        ));

        let mut snapshot = cake();
        snapshot
            .usage_events
            .push(UsageEvent::new(1, 9, date!(2020 - 01 - 01), 1));
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::ReferentialIntegrity {
                ingredient_id: 9,
                ..
            }
        ));

        let mut snapshot = cake();
        snapshot.usage_events.push(snapshot.usage_events[2].clone());
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::DuplicateEvent {
                ingredient_id: 3,
                ..
            }
        ));

        let mut snapshot = cake();
        snapshot.usage_events[1].quantity = Decimal::new(-1, 2);
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::NegativeQuantity { .. }
        ));

        let mut snapshot = cake();
        snapshot.usage_events[2].quantity = Decimal::new(5_0004, 4);
        assert!(matches!(
            report_error(&snapshot, ReportOptions::default()),
            ReportError::QuantityPrecision {
                ingredient_id: 3,
                ..
            }
        ));
        // Trailing zeros do not count as decimal places
        snapshot.usage_events[2].quantity = Decimal::new(5_0000, 4);
        assert!(Report::default().compute(&snapshot).is_ok());

        let snapshot = cake();
        assert!(matches!(
            report_error(
                &snapshot,
                ReportOptions::new().with_dates(DateDomain::Fixed(vec![date!(2020 - 01 - 02)]))
            ),
            ReportError::OutsideDomain { .. }
        ));
        // The single variable form ignores the date domain
        assert!(
            Report::new(
                ReportOptions::new()
                    .with_dimensions(Dimensions::Ingredient)
                    .with_dates(DateDomain::Fixed(vec![date!(2020 - 01 - 02)]))
            )
            .compute(&snapshot)
            .is_ok()
        );
    }

    #[test]
    fn error_messages() {
        let error = ReportError::ReferentialIntegrity {
            recipe_id: 1,
            ingredient_id: 9,
            date: date!(2020 - 01 - 01),
            missing: pantry::Dimension::Ingredient,
        };
        assert_eq!(
            error.to_string(),
            "Usage event (recipe 1, ingredient 9, 2020-01-01) references the ingredient with id 9 that does not exist"
        );
        let error = ReportError::QuantityPrecision {
            recipe_id: 1,
            ingredient_id: 1,
            date: date!(2020 - 01 - 01),
            quantity: Decimal::new(4, 4),
        };
        assert_eq!(
            error.to_string(),
            "Usage event (recipe 1, ingredient 1, 2020-01-01) has quantity 0.0004 with more than 3 decimal places"
        );
    }

    #[tokio::test]
    async fn run_over_memory_store() {
        let mut store = pantry::MemoryStore::new(cake());
        let matrix = Report::default()
            .run(&mut store)
            .await
            .expect("Could not run the report");
        assert_eq!(matrix.len(), 5);
    }
}
