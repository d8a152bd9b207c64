mod as_value;
mod column;
mod entity;
mod error;
mod memory;
mod model;
mod query;
mod report;
mod source;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use entity::*;
pub use error::*;
pub use memory::*;
pub use model::*;
pub use query::*;
pub use report::*;
pub use source::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
