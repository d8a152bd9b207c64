use crate::{ColumnDef, Result, Row, RowLabeled, TableRef};

/// A persisted record with static table metadata.
///
/// Stores use the metadata to render DDL and inserts through their
/// [`crate::SqlWriter`] and decode fetched rows back with [`Entity::from_row`].
pub trait Entity {
    fn table() -> &'static TableRef;
    fn columns() -> &'static [ColumnDef];

    fn primary_key_def() -> impl ExactSizeIterator<Item = &'static ColumnDef> + Clone {
        Self::columns()
            .iter()
            .filter(|c| c.primary_key)
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Decode a row, columns are matched by name.
    fn from_row(row: RowLabeled) -> Result<Self>
    where
        Self: Sized;

    /// Values aligned by index with [`Entity::columns`].
    fn row(&self) -> Row;
}
