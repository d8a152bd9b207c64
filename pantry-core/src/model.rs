use crate::{AsValue, ColumnDef, ColumnRef, Entity, Result, Row, RowLabeled, TableRef, Value};
use rust_decimal::Decimal;
use std::borrow::Cow;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
}

impl Recipe {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Decimal places a usage quantity can carry.
pub const QUANTITY_SCALE: u32 = 3;

/// Recipe `recipe_id` used `quantity` of ingredient `ingredient_id` on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageEvent {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub date: Date,
    pub quantity: Decimal,
}

impl UsageEvent {
    pub fn new(recipe_id: i64, ingredient_id: i64, date: Date, quantity: impl Into<Decimal>) -> Self {
        Self {
            recipe_id,
            ingredient_id,
            date,
            quantity: quantity.into(),
        }
    }
}

/// A date of the externally supplied date dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate {
    pub date: Date,
}

static RECIPE_TABLE: TableRef = TableRef::new("recipe");
static INGREDIENT_TABLE: TableRef = TableRef::new("ingredient");
static USAGE_EVENT_TABLE: TableRef = TableRef::new("usage_event");
static REPORT_DATE_TABLE: TableRef = TableRef::new("report_date");

static RECIPE_COLUMNS: [ColumnDef; 2] = [
    ColumnDef {
        name: Cow::Borrowed("id"),
        value: Value::Int64(None),
        nullable: false,
        primary_key: true,
        unique: false,
        references: None,
    },
    ColumnDef {
        name: Cow::Borrowed("name"),
        value: Value::Varchar(None),
        nullable: false,
        primary_key: false,
        unique: true,
        references: None,
    },
];

static INGREDIENT_COLUMNS: [ColumnDef; 2] = [
    ColumnDef {
        name: Cow::Borrowed("id"),
        value: Value::Int64(None),
        nullable: false,
        primary_key: true,
        unique: false,
        references: None,
    },
    ColumnDef {
        name: Cow::Borrowed("name"),
        value: Value::Varchar(None),
        nullable: false,
        primary_key: false,
        unique: true,
        references: None,
    },
];

static USAGE_EVENT_COLUMNS: [ColumnDef; 4] = [
    ColumnDef {
        name: Cow::Borrowed("recipe_id"),
        value: Value::Int64(None),
        nullable: false,
        primary_key: true,
        unique: false,
        references: Some(ColumnRef {
            table: TableRef::new("recipe"),
            name: Cow::Borrowed("id"),
        }),
    },
    ColumnDef {
        name: Cow::Borrowed("ingredient_id"),
        value: Value::Int64(None),
        nullable: false,
        primary_key: true,
        unique: false,
        references: Some(ColumnRef {
            table: TableRef::new("ingredient"),
            name: Cow::Borrowed("id"),
        }),
    },
    ColumnDef {
        name: Cow::Borrowed("date"),
        value: Value::Date(None),
        nullable: false,
        primary_key: true,
        unique: false,
        references: None,
    },
    ColumnDef {
        name: Cow::Borrowed("quantity"),
        value: Value::Decimal(None, 12, QUANTITY_SCALE as u8),
        nullable: false,
        primary_key: false,
        unique: false,
        references: None,
    },
];

static REPORT_DATE_COLUMNS: [ColumnDef; 1] = [ColumnDef {
    name: Cow::Borrowed("date"),
    value: Value::Date(None),
    nullable: false,
    primary_key: true,
    unique: false,
    references: None,
}];

impl Entity for Recipe {
    fn table() -> &'static TableRef {
        &RECIPE_TABLE
    }
    fn columns() -> &'static [ColumnDef] {
        &RECIPE_COLUMNS
    }
    fn from_row(mut row: RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.take("id")?,
            name: row.take("name")?,
        })
    }
    fn row(&self) -> Row {
        [self.id.as_value(), self.name.clone().as_value()].into()
    }
}

impl Entity for Ingredient {
    fn table() -> &'static TableRef {
        &INGREDIENT_TABLE
    }
    fn columns() -> &'static [ColumnDef] {
        &INGREDIENT_COLUMNS
    }
    fn from_row(mut row: RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.take("id")?,
            name: row.take("name")?,
        })
    }
    fn row(&self) -> Row {
        [self.id.as_value(), self.name.clone().as_value()].into()
    }
}

impl Entity for UsageEvent {
    fn table() -> &'static TableRef {
        &USAGE_EVENT_TABLE
    }
    fn columns() -> &'static [ColumnDef] {
        &USAGE_EVENT_COLUMNS
    }
    fn from_row(mut row: RowLabeled) -> Result<Self> {
        Ok(Self {
            recipe_id: row.take("recipe_id")?,
            ingredient_id: row.take("ingredient_id")?,
            date: row.take("date")?,
            quantity: row.take("quantity")?,
        })
    }
    fn row(&self) -> Row {
        [
            self.recipe_id.as_value(),
            self.ingredient_id.as_value(),
            self.date.as_value(),
            Value::Decimal(Some(self.quantity), 12, 3),
        ]
        .into()
    }
}

impl Entity for ReportDate {
    fn table() -> &'static TableRef {
        &REPORT_DATE_TABLE
    }
    fn columns() -> &'static [ColumnDef] {
        &REPORT_DATE_COLUMNS
    }
    fn from_row(mut row: RowLabeled) -> Result<Self> {
        Ok(Self {
            date: row.take("date")?,
        })
    }
    fn row(&self) -> Row {
        [self.date.as_value()].into()
    }
}

impl From<Date> for ReportDate {
    fn from(date: Date) -> Self {
        Self { date }
    }
}
