mod cake;
mod empty;
mod fixtures;
mod fractional;
mod invalid;
mod kitchen;
mod properties;

pub use fixtures::*;

use crate::{
    cake::cake,
    empty::empty,
    fractional::fractional,
    invalid::invalid,
    kitchen::kitchen,
    properties::{idempotence, strategies},
};
use log::LevelFilter;
use pantry::Store;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<S: Store>(mut store: S) {
    cake(&mut store).await;
    kitchen(&mut store).await;
    empty(&mut store).await;
    fractional(&mut store).await;
    strategies(&mut store).await;
    idempotence(&mut store).await;
    invalid(&mut store).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
