use crate::Value;
use std::borrow::Cow;

/// Schema qualified table name.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: Cow<'static, str>,
    pub schema: Cow<'static, str>,
}

impl TableRef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            schema: Cow::Borrowed(""),
        }
    }
}

/// Column of another table, target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: TableRef,
    pub name: Cow<'static, str>,
}

#[derive(Default, Debug, Clone)]
pub struct ColumnDef {
    pub name: Cow<'static, str>,
    /// Empty value whose variant determines the column type.
    pub value: Value,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub references: Option<ColumnRef>,
}

impl ColumnDef {
    pub fn name(&self) -> &str {
        &self.name
    }
}
