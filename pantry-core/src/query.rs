use crate::{AsValue, Context, Error, Result, Value};
use std::{any, sync::Arc};

/// Effect of the statements run by a store (INSERT/DELETE/DDL).
#[derive(Default, Debug, Clone, Copy)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    /// Take the column named `name` and convert it to `T`.
    pub fn take<T: AsValue>(&mut self, name: &str) -> Result<T> {
        let Some(i) = self.labels.iter().position(|v| v == name) else {
            return Err(Error::msg(format!(
                "Column `{}` is missing from the row (columns: {})",
                name,
                self.labels.join(", ")
            )));
        };
        T::try_from_value(std::mem::take(&mut self.values[i])).with_context(|| {
            format!(
                "While decoding column `{}` as {}",
                name,
                any::type_name::<T>()
            )
        })
    }
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
        }
    }
}
