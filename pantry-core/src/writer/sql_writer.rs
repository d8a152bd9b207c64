use crate::{
    ColumnDef, DateDomain, Dimensions, Entity, Ingredient, Recipe, ReportDate, ReportOptions,
    TableRef, UsageEvent, Value, separated_by, write_date,
    writer::{Fragment, SqlContext},
};
use std::fmt::Write;
use time::Date;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Alias of the fact join derived table inside the usage report.
const USED: &str = "used";
/// Alias of the date domain derived table inside the usage report.
const DATES: &str = "dates";

/// Dialect printer converting entities and reports into concrete SQL strings.
pub trait SqlWriter {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: SqlContext,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: SqlContext, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    fn write_table_ref(&self, context: SqlContext, out: &mut String, value: &TableRef) {
        if !value.schema.is_empty() {
            self.write_identifier_quoted(context, out, &value.schema);
            out.push('.');
        }
        self.write_identifier_quoted(context, out, &value.name);
    }

    /// Render a column reference, qualified by `table` when the context asks for it.
    fn write_column_ref(&self, context: SqlContext, out: &mut String, table: &str, column: &str) {
        if context.qualify_columns && !table.is_empty() {
            self.write_identifier_quoted(context, out, table);
            out.push('.');
        }
        self.write_identifier_quoted(context, out, column);
    }

    /// Render the SQL type for a `Value` prototype.
    fn write_column_type(&self, _context: SqlContext, out: &mut String, value: &Value) {
        match value {
            Value::Int64(..) => out.push_str("BIGINT"),
            Value::Decimal(.., precision, scale) => {
                out.push_str("DECIMAL");
                if (precision, scale) != (&0, &0) {
                    let _ = write!(out, "({},{})", precision, scale);
                }
            }
            Value::Varchar(..) => out.push_str("VARCHAR"),
            Value::Date(..) => out.push_str("DATE"),
            Value::Null => log::error!("Cannot derive a column type from a NULL value"),
        }
    }

    /// Render a concrete value (including proper quoting / escaping).
    fn write_value(&self, context: SqlContext, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => self.write_value_none(context, out),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::Decimal(Some(v), ..) => {
                let _ = write!(out, "{}", v);
            }
            Value::Varchar(Some(v)) => self.write_value_string(context, out, v),
            Value::Date(Some(v)) => self.write_value_date(context, out, v),
            _ => unreachable!(),
        }
    }

    /// Render NULL literal.
    fn write_value_none(&self, _context: SqlContext, out: &mut String) {
        out.push_str("NULL");
    }

    /// Render single quoted string literal doubling inner quotes.
    fn write_value_string(&self, context: SqlContext, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a date literal, typed explicitly where nothing else gives it a type.
    fn write_value_date(&self, context: SqlContext, out: &mut String, value: &Date) {
        let cast = context.fragment == Fragment::SqlReportDates;
        if cast {
            out.push_str("CAST(");
        }
        out.push('\'');
        let _ = write_date(out, value);
        out.push('\'');
        if cast {
            out.push_str(" AS DATE)");
        }
    }

    fn write_create_table<E: Entity>(&self, out: &mut String, if_not_exists: bool) {
        let context = SqlContext::new(Fragment::SqlCreateTable, false);
        let primary_key = E::primary_key_def();
        let inline_primary_key = primary_key.len() == 1;
        out.reserve(128 + E::columns().len() * 64);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_table_ref(context, out, E::table());
        out.push_str(" (\n");
        separated_by(
            out,
            E::columns(),
            |out, v| {
                self.write_create_table_column_fragment(context, out, v, inline_primary_key);
            },
            ",\n",
        );
        if primary_key.len() > 1 {
            out.push_str(",\nPRIMARY KEY (");
            let context = context.switch_fragment(Fragment::SqlCreateTablePrimaryKey);
            separated_by(
                out,
                primary_key,
                |out, v| {
                    self.write_identifier_quoted(context, out, v.name());
                },
                ", ",
            );
            out.push(')');
        }
        out.push_str(");");
    }

    /// Emit single column definition fragment.
    fn write_create_table_column_fragment(
        &self,
        context: SqlContext,
        out: &mut String,
        column: &ColumnDef,
        inline_primary_key: bool,
    ) {
        self.write_identifier_quoted(context, out, column.name());
        out.push(' ');
        self.write_column_type(context, out, &column.value);
        let primary_key = inline_primary_key && column.primary_key;
        if !column.nullable && !primary_key {
            out.push_str(" NOT NULL");
        }
        if primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if column.unique && !primary_key {
            out.push_str(" UNIQUE");
        }
        if let Some(references) = &column.references {
            out.push_str(" REFERENCES ");
            self.write_table_ref(context, out, &references.table);
            out.push('(');
            self.write_identifier_quoted(context, out, &references.name);
            out.push(')');
        }
    }

    fn write_drop_table<E: Entity>(&self, out: &mut String, if_exists: bool) {
        let context = SqlContext::new(Fragment::SqlDropTable, false);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_table_ref(context, out, E::table());
        out.push(';');
    }

    /// Multi row insert, writes nothing when `entities` is empty.
    fn write_insert<'b, E>(&self, out: &mut String, entities: impl IntoIterator<Item = &'b E>)
    where
        E: Entity + 'b,
    {
        let mut rows = entities.into_iter().map(Entity::row).peekable();
        if rows.peek().is_none() {
            return;
        }
        out.reserve(128 + E::columns().len() * 48);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("INSERT INTO ");
        let context = SqlContext::new(Fragment::SqlInsertInto, false);
        self.write_table_ref(context, out, E::table());
        out.push_str(" (");
        separated_by(
            out,
            E::columns(),
            |out, v| {
                self.write_identifier_quoted(context, out, v.name());
            },
            ", ",
        );
        out.push_str(") VALUES\n");
        let context = context.switch_fragment(Fragment::SqlInsertIntoValues);
        separated_by(
            out,
            rows,
            |out, row| {
                out.push('(');
                separated_by(
                    out,
                    row.iter(),
                    |out, v| {
                        self.write_value(context, out, v);
                    },
                    ", ",
                );
                out.push(')');
            },
            ",\n",
        );
        out.push(';');
    }

    /// Select every column of the table, ordered by primary key.
    fn write_select<E: Entity>(&self, out: &mut String) {
        let context = SqlContext::new(Fragment::SqlSelect, false);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT ");
        separated_by(
            out,
            E::columns(),
            |out, v| {
                self.write_column_ref(context, out, &E::table().name, v.name());
            },
            ", ",
        );
        out.push_str("\nFROM ");
        self.write_table_ref(context.switch_fragment(Fragment::SqlSelectFrom), out, E::table());
        let primary_key = E::primary_key_def();
        if primary_key.len() > 0 {
            out.push_str("\nORDER BY ");
            let context = context.switch_fragment(Fragment::SqlSelectOrderBy);
            separated_by(
                out,
                primary_key,
                |out, v| {
                    self.write_column_ref(context, out, &E::table().name, v.name());
                },
                ", ",
            );
        }
        out.push(';');
    }

    /// The body of the derived table listing the dates of the report.
    fn write_dates(&self, context: SqlContext, out: &mut String, domain: &DateDomain) {
        let context = context.switch_fragment(Fragment::SqlReportDates);
        match domain {
            DateDomain::Observed | DateDomain::Source => {
                out.push_str("SELECT DISTINCT ");
                self.write_identifier_quoted(context, out, "date");
                out.push_str(" FROM ");
                let table = if *domain == DateDomain::Observed {
                    UsageEvent::table()
                } else {
                    ReportDate::table()
                };
                self.write_table_ref(context, out, table);
            }
            DateDomain::Fixed(dates) if dates.is_empty() => {
                out.push_str("SELECT ");
                self.write_value_none(context, out);
                out.push_str(" AS ");
                self.write_identifier_quoted(context, out, "date");
                out.push_str(" WHERE 1 = 0");
            }
            DateDomain::Fixed(dates) => {
                let mut dates = dates.clone();
                dates.sort();
                dates.dedup();
                let mut first = true;
                separated_by(
                    out,
                    dates,
                    |out, date| {
                        out.push_str("SELECT ");
                        self.write_value_date(context, out, &date);
                        if first {
                            out.push_str(" AS ");
                            self.write_identifier_quoted(context, out, "date");
                            first = false;
                        }
                    },
                    "\nUNION ",
                );
            }
        }
    }

    /// The fact join: usage events with the name of their ingredient.
    fn write_fact_join(&self, context: SqlContext, out: &mut String) {
        let event = &UsageEvent::table().name;
        let ingredient = &Ingredient::table().name;
        out.push_str("SELECT ");
        self.write_column_ref(context, out, event, "recipe_id");
        out.push_str(", ");
        self.write_column_ref(context, out, event, "date");
        out.push_str(", ");
        self.write_column_ref(context, out, ingredient, "name");
        out.push_str(" AS ");
        self.write_identifier_quoted(context, out, "ingredient_used");
        out.push_str(", ");
        self.write_column_ref(context, out, event, "quantity");
        out.push_str("\nFROM ");
        self.write_table_ref(context, out, UsageEvent::table());
        out.push_str("\nJOIN ");
        self.write_table_ref(context, out, Ingredient::table());
        out.push_str(" ON ");
        self.write_column_ref(context, out, ingredient, "id");
        out.push_str(" = ");
        self.write_column_ref(context, out, event, "ingredient_id");
    }

    /// The whole usage report as a single query.
    ///
    /// Columns: `recipe_name`, `ingredient_name`, `date`, `quantity`. Every
    /// fact row is crossed with the candidate ingredients (and dates), the
    /// quantity is kept only where the candidates match and then summed.
    fn write_usage_report(&self, out: &mut String, options: &ReportOptions) {
        let context = SqlContext::new(Fragment::SqlReport, true);
        let recipe = &Recipe::table().name;
        let ingredient = &Ingredient::table().name;
        let by_date = options.dimensions == Dimensions::IngredientAndDate;
        let date_source = if by_date { DATES } else { USED };
        out.reserve(1024);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT ");
        self.write_column_ref(context, out, recipe, "name");
        out.push_str(" AS ");
        self.write_identifier_quoted(context, out, "recipe_name");
        out.push_str(", ");
        self.write_column_ref(context, out, ingredient, "name");
        out.push_str(" AS ");
        self.write_identifier_quoted(context, out, "ingredient_name");
        out.push_str(", ");
        self.write_column_ref(context, out, date_source, "date");
        out.push_str(" AS ");
        self.write_identifier_quoted(context, out, "date");
        out.push_str(", SUM(CASE WHEN ");
        if by_date {
            self.write_column_ref(context, out, USED, "date");
            out.push_str(" = ");
            self.write_column_ref(context, out, DATES, "date");
            out.push_str(" AND ");
        }
        self.write_column_ref(context, out, USED, "ingredient_used");
        out.push_str(" = ");
        self.write_column_ref(context, out, ingredient, "name");
        out.push_str(" THEN ");
        self.write_column_ref(context, out, USED, "quantity");
        out.push_str(" ELSE 0 END) AS ");
        self.write_identifier_quoted(context, out, "quantity");
        out.push_str("\nFROM ");
        self.write_table_ref(context, out, Recipe::table());
        // Recipes without usage events still get their zero cells
        out.push_str(if by_date { "\nLEFT JOIN (\n" } else { "\nJOIN (\n" });
        self.write_fact_join(context, out);
        out.push_str("\n) ");
        self.write_identifier_quoted(context, out, USED);
        out.push_str(" ON ");
        self.write_column_ref(context, out, USED, "recipe_id");
        out.push_str(" = ");
        self.write_column_ref(context, out, recipe, "id");
        if by_date {
            out.push_str("\nCROSS JOIN (");
            self.write_dates(context, out, &options.dates);
            out.push_str(") ");
            self.write_identifier_quoted(context, out, DATES);
        }
        out.push_str("\nCROSS JOIN ");
        self.write_table_ref(context, out, Ingredient::table());
        out.push_str("\nGROUP BY ");
        self.write_column_ref(context, out, recipe, "name");
        out.push_str(", ");
        self.write_column_ref(context, out, ingredient, "name");
        out.push_str(", ");
        self.write_column_ref(context, out, date_source, "date");
        out.push_str("\nORDER BY ");
        self.write_column_ref(context, out, recipe, "name");
        out.push_str(", ");
        self.write_column_ref(context, out, date_source, "date");
        out.push_str(", ");
        self.write_column_ref(context, out, ingredient, "name");
        out.push(';');
    }

    /// Total quantity of the usage events, column `total`.
    fn write_usage_total(&self, out: &mut String) {
        let context = SqlContext::new(Fragment::SqlSelect, false);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT SUM(");
        self.write_identifier_quoted(context, out, "quantity");
        out.push_str(") AS ");
        self.write_identifier_quoted(context, out, "total");
        out.push_str("\nFROM ");
        self.write_table_ref(context, out, UsageEvent::table());
        out.push(';');
    }
}

/// ANSI flavoured writer.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
