use pantry_core::{SqlContext, SqlWriter, Value, write_date};
use time::Date;

/// Sqlite flavour: dynamic typing, dates stored as `YYYY-MM-DD` text.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqliteSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SqliteSqlWriter {
    fn write_column_type(&self, _context: SqlContext, out: &mut String, value: &Value) {
        match value {
            Value::Int64(..) => out.push_str("INTEGER"),
            Value::Decimal(..) => out.push_str("REAL"),
            Value::Varchar(..) => out.push_str("TEXT"),
            Value::Date(..) => out.push_str("TEXT"),
            Value::Null => log::error!("Cannot derive a column type from a NULL value"),
        }
    }

    fn write_value_date(&self, _context: SqlContext, out: &mut String, value: &Date) {
        out.push('\'');
        let _ = write_date(out, value);
        out.push('\'');
    }
}
