use rust_decimal::Decimal;
use std::fmt::{self, Display, Write};
use time::Date;

/// Dynamically typed cell exchanged with a store.
///
/// Every variant but `Null` carries an `Option` so that the variant alone can
/// describe the column type (see [`crate::ColumnDef::value`]).
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Int64(Option<i64>),
    Decimal(Option<Decimal>, /* prec: */ u8, /* scale: */ u8),
    Varchar(Option<String>),
    Date(Option<Date>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Int64(v) => v.is_none(),
            Value::Decimal(v, ..) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
        }
    }

    /// Name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Int64(..) => "Int64",
            Value::Decimal(..) => "Decimal",
            Value::Varchar(..) => "Varchar",
            Value::Date(..) => "Date",
        }
    }
}

/// Writes the date as `YYYY-MM-DD`, the format every store uses on the wire.
pub fn write_date(out: &mut impl Write, date: &Date) -> fmt::Result {
    write!(
        out,
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => f.write_str("NULL"),
            Value::Int64(Some(v)) => write!(f, "{}", v),
            Value::Decimal(Some(v), ..) => write!(f, "{}", v),
            Value::Varchar(Some(v)) => f.write_str(v),
            Value::Date(Some(v)) => write_date(f, v),
            _ => unreachable!(),
        }
    }
}
