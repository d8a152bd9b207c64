use crate::{UsageMatrix, write_date};
use rust_decimal::Decimal;
use std::{
    collections::BTreeMap,
    fmt::{self, Display, Write},
};
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub recipe: String,
    pub ingredient: String,
    /// Aligned by index with [`PivotTable::dates`], `None` where the matrix has no cell.
    pub quantities: Vec<Option<Decimal>>,
}

/// The usage matrix with one row per (recipe, ingredient) and one column per date.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PivotTable {
    /// Chronological.
    pub dates: Vec<Date>,
    /// Sorted by recipe, then ingredient.
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn new(matrix: &UsageMatrix) -> Self {
        let dates = matrix.dates();
        let mut rows = BTreeMap::<(&str, &str), Vec<Option<Decimal>>>::new();
        for cell in matrix.rows() {
            let Ok(column) = dates.binary_search(&cell.date) else {
                unreachable!("The dates are collected from the matrix itself");
            };
            rows.entry((cell.recipe, cell.ingredient))
                .or_insert_with(|| vec![None; dates.len()])[column] = Some(cell.quantity);
        }
        let rows = rows
            .into_iter()
            .map(|((recipe, ingredient), quantities)| PivotRow {
                recipe: recipe.into(),
                ingredient: ingredient.into(),
                quantities,
            })
            .collect();
        Self { dates, rows }
    }

    pub fn row(&self, recipe: &str, ingredient: &str) -> Option<&PivotRow> {
        self.rows
            .iter()
            .find(|v| v.recipe == recipe && v.ingredient == ingredient)
    }

    pub fn get(&self, recipe: &str, ingredient: &str, date: Date) -> Option<Decimal> {
        let column = self.dates.binary_search(&date).ok()?;
        self.row(recipe, ingredient)?.quantities[column]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Box drawn text table, quantities right aligned.
impl Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec!["recipe".to_string(), "ingredient".to_string()];
        for date in &self.dates {
            let mut value = String::new();
            write_date(&mut value, date)?;
            header.push(value);
        }
        let body = self
            .rows
            .iter()
            .map(|row| {
                [row.recipe.clone(), row.ingredient.clone()]
                    .into_iter()
                    .chain(
                        row.quantities
                            .iter()
                            .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
                    )
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let widths = (0..header.len())
            .map(|i| {
                body.iter()
                    .map(|row| row[i].chars().count())
                    .chain([header[i].chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        let rule = |f: &mut fmt::Formatter<'_>, left: char, middle: char, right: char| {
            f.write_char(left)?;
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    f.write_char(middle)?;
                }
                for _ in 0..width + 2 {
                    f.write_char('─')?;
                }
            }
            f.write_char(right)?;
            f.write_char('\n')
        };
        let line = |f: &mut fmt::Formatter<'_>, cells: &[String], numeric: bool| {
            f.write_char('│')?;
            for (i, (cell, width)) in cells.iter().zip(&widths).enumerate() {
                if numeric && i > 1 {
                    write!(f, " {:>width$} │", cell, width = *width)?;
                } else {
                    write!(f, " {:<width$} │", cell, width = *width)?;
                }
            }
            f.write_char('\n')
        };
        rule(f, '┌', '┬', '┐')?;
        line(f, &header, false)?;
        rule(f, '├', '┼', '┤')?;
        for row in &body {
            line(f, row, true)?;
        }
        rule(f, '└', '┴', '┘')
    }
}
