use pantry::{Ingredient, Recipe, Snapshot, UsageEvent};
use time::{Date, macros::date};

/// One recipe, five ingredients, four of them used on 2020-01-01.
pub fn cake_snapshot() -> Snapshot {
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

/// Two recipes cooked in different months, nine ingredients.
pub fn kitchen_snapshot() -> Snapshot {
    Snapshot {
        recipes: vec![Recipe::new(1, "Cake"), Recipe::new(2, "Fried Rice")],
        ingredients: vec![
            Ingredient::new(1, "Milk"),
            Ingredient::new(2, "Eggs"),
            Ingredient::new(3, "Flour"),
            Ingredient::new(4, "Sugar"),
            Ingredient::new(5, "Butter"),
            Ingredient::new(6, "Baking Soda"),
            Ingredient::new(7, "Steak"),
            Ingredient::new(8, "Msg"),
            Ingredient::new(9, "Salt"),
        ],
        usage_events: vec![
            UsageEvent::new(1, 1, date!(2020 - 01 - 01), 200),
            UsageEvent::new(1, 2, date!(2020 - 01 - 01), 100),
            UsageEvent::new(1, 3, date!(2020 - 01 - 01), 500),
            UsageEvent::new(1, 4, date!(2020 - 01 - 01), 80),
            UsageEvent::new(2, 6, date!(2020 - 02 - 01), 200),
            UsageEvent::new(2, 7, date!(2020 - 02 - 01), 100),
            UsageEvent::new(2, 8, date!(2020 - 02 - 01), 500),
            UsageEvent::new(2, 9, date!(2020 - 02 - 01), 80),
        ],
        dates: months(),
    }
}

/// First day of January to April 2020.
pub fn months() -> Vec<Date> {
    vec![
        date!(2020 - 01 - 01),
        date!(2020 - 02 - 01),
        date!(2020 - 03 - 01),
        date!(2020 - 04 - 01),
    ]
}
