//! Ingredient usage reports.
//!
//! Recipes, ingredients and usage events go in, a dense recipe x ingredient x
//! date matrix comes out, zero where nothing was used, ready to be pivoted
//! into one column per date.
//!
//! ```rust
//! use pantry::{DateDomain, Ingredient, Recipe, Report, ReportOptions, Snapshot, UsageEvent};
//! use time::macros::date;
//!
//! let snapshot = Snapshot {
//!     recipes: vec![Recipe::new(1, "Cake")],
//!     ingredients: vec![Ingredient::new(1, "Milk"), Ingredient::new(2, "Eggs")],
//!     usage_events: vec![UsageEvent::new(1, 1, date!(2020 - 01 - 01), 200)],
//!     dates: vec![],
//! };
//! let report = Report::new(ReportOptions::new().with_dates(DateDomain::Fixed(vec![
//!     date!(2020 - 01 - 01),
//!     date!(2020 - 02 - 01),
//! ])));
//! let matrix = report.compute(&snapshot).unwrap();
//! assert_eq!(matrix.len(), 4);
//! println!("{}", matrix.pivot());
//! ```
pub use pantry_core::*;
