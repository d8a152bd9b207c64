#[cfg(test)]
mod tests {
    use pantry::MemoryStore;
    use pantry_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn memory() {
        init_logs();
        execute_tests(MemoryStore::default()).await;
    }
}
