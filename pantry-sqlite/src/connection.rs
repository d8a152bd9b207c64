use crate::{
    CBox, SqliteSqlWriter, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use async_stream::try_stream;
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_ROW, sqlite3, sqlite3_changes64, sqlite3_close, sqlite3_column_count,
    sqlite3_errmsg, sqlite3_finalize, sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_step,
    sqlite3_stmt,
};
use pantry_core::{
    CellKey, Context, DataSource, Dimensions, Entity, Error, Ingredient, QUANTITY_SCALE, Recipe,
    ReportDate, ReportError, ReportOptions, Result, Row, RowLabeled, RowNames, RowsAffected,
    Snapshot, SqlWriter, Store, UsageEvent, UsageMatrix,
    stream::{Stream, StreamExt, TryStreamExt},
    truncate_long, validate,
};
use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    collections::BTreeSet,
    ffi::{CString, c_char},
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
};
use time::Date;
use tokio::task::spawn_blocking;

/// Store backed by a sqlite database.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    pub const PREFIX: &'static str = "sqlite://";

    /// Open the database at `url`, for example `sqlite://pantry.sqlite?mode=rwc`.
    pub async fn connect(url: impl Into<Cow<'static, str>>) -> Result<SqliteConnection> {
        let url = url.into();
        if !url.starts_with(Self::PREFIX) {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                Self::PREFIX
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let path = CString::new(url.trim_start_matches(Self::PREFIX)).with_context(context)?;
        let mut connection: CBox<*mut sqlite3>;
        unsafe {
            connection = CBox::new(ptr::null_mut(), |p| {
                sqlite3_close(p);
            });
            let rc = sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string())
                        .context(format!("While opening the database `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        let mut result = Self { connection };
        result.execute("PRAGMA foreign_keys = ON;".into()).await?;
        Ok(result)
    }

    /// Run every statement of `sql`, discarding the rows they return.
    pub async fn execute(&mut self, sql: String) -> Result<RowsAffected> {
        let connection = AtomicPtr::new(*self.connection);
        let context = format!("While executing the query:\n{}", truncate_long!(sql));
        let result = spawn_blocking(move || -> Result<RowsAffected> {
            let connection = connection.load(Ordering::Relaxed);
            let sql = CString::new(sql).context("Could not create a CString from the query")?;
            let mut result = RowsAffected::default();
            let mut tail: *const c_char = sql.as_ptr();
            unsafe {
                while *tail != 0 {
                    let mut statement = CBox::new(ptr::null_mut(), |p| {
                        sqlite3_finalize(p);
                    });
                    let rc =
                        sqlite3_prepare_v2(connection, tail, -1, &mut *statement, &mut tail);
                    if rc != SQLITE_OK {
                        return Err(Error::msg(
                            error_message_from_ptr(&sqlite3_errmsg(connection)).to_string(),
                        ));
                    }
                    if statement.is_null() {
                        // Only whitespace or comments left
                        continue;
                    }
                    loop {
                        match sqlite3_step(*statement) {
                            SQLITE_BUSY | SQLITE_ROW => continue,
                            SQLITE_DONE => break,
                            _ => {
                                return Err(Error::msg(
                                    error_message_from_ptr(&sqlite3_errmsg(connection))
                                        .to_string(),
                                ));
                            }
                        }
                    }
                    result.extend([RowsAffected {
                        rows_affected: sqlite3_changes64(connection) as u64,
                    }]);
                }
            }
            Ok(result)
        })
        .await?
        .context(context);
        if let Err(error) = &result {
            log::error!("{:#}", error);
        }
        result
    }

    async fn prepare(&mut self, sql: String) -> Result<CBox<*mut sqlite3_stmt>> {
        let connection = AtomicPtr::new(*self.connection);
        let context = format!("While preparing the query:\n{}", truncate_long!(sql));
        let prepared = spawn_blocking(move || -> Result<CBox<*mut sqlite3_stmt>> {
            let connection = connection.load(Ordering::Relaxed);
            let sql = CString::new(sql).context("Could not create a CString from the query")?;
            unsafe {
                let mut statement = CBox::new(ptr::null_mut(), |p| {
                    sqlite3_finalize(p);
                });
                let mut tail = ptr::null();
                let rc = sqlite3_prepare_v2(connection, sql.as_ptr(), -1, &mut *statement, &mut tail);
                if rc != SQLITE_OK {
                    return Err(Error::msg(
                        error_message_from_ptr(&sqlite3_errmsg(connection)).to_string(),
                    ));
                }
                if !tail.is_null() && *tail != 0 {
                    return Err(Error::msg(
                        "Cannot prepare more than one statement at a time",
                    ));
                }
                Ok(statement)
            }
        })
        .await?
        .context(context);
        if let Err(error) = &prepared {
            log::error!("{:#}", error);
        }
        prepared
    }

    /// Run a single query and stream its rows.
    pub fn fetch(&mut self, sql: String) -> impl Stream<Item = Result<RowLabeled>> {
        try_stream! {
            let statement = self.prepare(sql).await?;
            unsafe {
                let count = sqlite3_column_count(*statement);
                let labels = (0..count)
                    .map(|i| extract_name(*statement, i))
                    .collect::<Result<RowNames>>()?;
                loop {
                    match sqlite3_step(*statement) {
                        SQLITE_BUSY => continue,
                        SQLITE_DONE => break,
                        SQLITE_ROW => {
                            let values = (0..count)
                                .map(|i| extract_value(*statement, i))
                                .collect::<Result<Row>>()?;
                            yield RowLabeled::new(labels.clone(), values);
                        }
                        _ => {
                            let error = Error::msg(
                                error_message_from_ptr(&sqlite3_errmsg(*self.connection))
                                    .to_string(),
                            );
                            log::error!("{:#}", error);
                            Err(error)?;
                        }
                    }
                }
            }
        }
    }

    fn select<E: Entity>(&mut self) -> impl Stream<Item = Result<E>> {
        let mut sql = String::new();
        SqliteSqlWriter::new().write_select::<E>(&mut sql);
        self.fetch(sql).map(|row| row.and_then(E::from_row))
    }
}

impl DataSource for SqliteConnection {
    fn recipes(&mut self) -> impl Stream<Item = Result<Recipe>> {
        self.select::<Recipe>()
    }

    fn ingredients(&mut self) -> impl Stream<Item = Result<Ingredient>> {
        self.select::<Ingredient>()
    }

    fn usage_events(&mut self) -> impl Stream<Item = Result<UsageEvent>> {
        self.select::<UsageEvent>()
    }

    fn dates(&mut self) -> impl Stream<Item = Result<Date>> {
        self.select::<ReportDate>().map(|v| v.map(|v| v.date))
    }

    /// Compute the usage matrix in the database, as a single query.
    ///
    /// The content is validated first, the result is checked against the
    /// total quantity of the usage events.
    async fn report(&mut self, options: &ReportOptions) -> Result<UsageMatrix> {
        let snapshot = Snapshot::load(self).await?;
        validate(
            &snapshot,
            options.dimensions,
            options.date_domain(&snapshot).as_ref(),
        )?;
        let writer = SqliteSqlWriter::new();
        let mut sql = String::new();
        writer.write_usage_report(&mut sql, options);
        let matrix = self
            .fetch(sql)
            .map(|row| -> Result<(CellKey, Decimal)> {
                let mut row = row?;
                let key = CellKey::new(
                    row.take::<String>("recipe_name")?,
                    row.take::<String>("ingredient_name")?,
                    row.take::<Date>("date")?,
                );
                // Stored as `REAL`, round the float sums back to the column scale
                let quantity = row.take::<Decimal>("quantity")?;
                Ok((key, quantity.round_dp(QUANTITY_SCALE)))
            })
            .try_collect::<Vec<_>>()
            .await?
            .into_iter()
            .collect::<UsageMatrix>();
        let mut sql = String::new();
        writer.write_usage_total(&mut sql);
        let expected = match self.fetch(sql).try_collect::<Vec<_>>().await?.pop() {
            Some(mut row) => row.take::<Option<Decimal>>("total")?.unwrap_or_default(),
            None => Decimal::ZERO,
        }
        .round_dp(QUANTITY_SCALE);
        let actual = matrix.total();
        if expected != actual {
            let error = ReportError::ConservationMismatch { expected, actual };
            log::error!("{}", error);
            return Err(error.into());
        }
        log::debug!("Usage report computed by sqlite: {} cells", matrix.len());
        Ok(matrix)
    }
}

impl Store for SqliteConnection {
    /// Replace the content of the database with `snapshot`.
    ///
    /// The snapshot is validated first and written in a single transaction,
    /// a refused snapshot leaves the previous content in place.
    async fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        validate(snapshot, Dimensions::Ingredient, None)?;
        let writer = SqliteSqlWriter::new();
        let mut sql = String::from("BEGIN;");
        writer.write_drop_table::<UsageEvent>(&mut sql, true);
        writer.write_drop_table::<ReportDate>(&mut sql, true);
        writer.write_drop_table::<Ingredient>(&mut sql, true);
        writer.write_drop_table::<Recipe>(&mut sql, true);
        writer.write_create_table::<Recipe>(&mut sql, true);
        writer.write_create_table::<Ingredient>(&mut sql, true);
        writer.write_create_table::<UsageEvent>(&mut sql, true);
        writer.write_create_table::<ReportDate>(&mut sql, true);
        writer.write_insert(&mut sql, &snapshot.recipes);
        writer.write_insert(&mut sql, &snapshot.ingredients);
        writer.write_insert(&mut sql, &snapshot.usage_events);
        let dates = snapshot
            .dates
            .iter()
            .copied()
            .map(ReportDate::from)
            .collect::<BTreeSet<_>>();
        writer.write_insert(&mut sql, &dates);
        sql.push_str("\nCOMMIT;");
        if let Err(error) = self.execute(sql).await {
            // The failure is already logged, keep it over the rollback outcome
            let _ = self.execute("ROLLBACK;".into()).await;
            return Err(error);
        }
        log::debug!(
            "Saved {} recipes, {} ingredients, {} usage events and {} dates",
            snapshot.recipes.len(),
            snapshot.ingredients.len(),
            snapshot.usage_events.len(),
            dates.len()
        );
        Ok(())
    }
}
