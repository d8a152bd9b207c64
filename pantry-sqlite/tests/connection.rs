#[cfg(test)]
mod tests {
    use pantry_sqlite::SqliteConnection;
    use pantry_tests::{init_logs, silent_logs};
    use std::{path::Path, sync::Mutex};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .await
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(format!("sqlite://{}?mode=rwc", DB_PATH))
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(format!("sqlite://{}?mode=ro", DB_PATH))
            .await
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .await
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(format!("sqlite://{}?mode=ro", DB_PATH))
                    .await
                    .is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                SqliteConnection::connect("duckdb://some_value")
                    .await
                    .is_err()
            );
        };
    }

    #[tokio::test]
    async fn execute_many_statements() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let affected = connection
            .execute(
                "CREATE TABLE \"t\" (\"v\" INTEGER);\nINSERT INTO \"t\" (\"v\") VALUES\n(1),\n(2);\nINSERT INTO \"t\" (\"v\") VALUES\n(3);\n".into(),
            )
            .await
            .expect("Could not run the statements");
        assert_eq!(affected.rows_affected, 3);
        silent_logs! {
            assert!(connection.execute("SELECT * FROM \"missing\";".into()).await.is_err());
        }
    }
}
