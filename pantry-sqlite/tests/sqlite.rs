#[cfg(test)]
mod tests {
    use pantry_core::{DateDomain, ReportOptions, SqlWriter, UsageEvent};
    use pantry_sqlite::{SqliteConnection, SqliteSqlWriter};
    use pantry_tests::{execute_tests, init_logs, months};
    use std::{env, path::Path, sync::Mutex};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        let db_path =
            env::var("PANTRY_SQLITE_TEST").unwrap_or("../target/debug/tests.sqlite".into());
        let _guard = MUTEX.lock().unwrap();
        if Path::new(&db_path).exists() {
            fs::remove_file(&db_path).await.expect(
                format!("Failed to remove existing test database file {}", db_path).as_str(),
            );
        }
        let connection = SqliteConnection::connect(format!("sqlite://{}?mode=rwc", db_path))
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(&db_path).exists(),
            "Database file should be created after connection"
        );
        execute_tests(connection).await;
    }

    #[test]
    fn sqlite_types() {
        let writer = SqliteSqlWriter::new();
        let mut out = String::new();
        writer.write_create_table::<UsageEvent>(&mut out, true);
        assert_eq!(
            out,
            "CREATE TABLE IF NOT EXISTS \"usage_event\" (\n\
             \"recipe_id\" INTEGER NOT NULL REFERENCES \"recipe\"(\"id\"),\n\
             \"ingredient_id\" INTEGER NOT NULL REFERENCES \"ingredient\"(\"id\"),\n\
             \"date\" TEXT NOT NULL,\n\
             \"quantity\" REAL NOT NULL,\n\
             PRIMARY KEY (\"recipe_id\", \"ingredient_id\", \"date\"));"
        );
        let mut out = String::new();
        writer.write_usage_report(
            &mut out,
            &ReportOptions::new().with_dates(DateDomain::Fixed(months()[..2].to_vec())),
        );
        assert!(out.contains(
            "CROSS JOIN (SELECT '2020-01-01' AS \"date\"\nUNION SELECT '2020-02-01') \"dates\""
        ));
    }
}
