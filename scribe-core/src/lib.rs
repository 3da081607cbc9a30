mod as_value;
mod cache;
mod column;
mod compiler;
mod entity;
mod error;
mod expression;
mod metadata;
mod query;
mod registry;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context as ErrorContext;
#[doc(hidden)]
pub use ::itoa;
pub use as_value::*;
pub use cache::*;
pub use column::*;
pub use compiler::*;
pub use entity::*;
pub use error::*;
pub use expression::*;
pub use metadata::*;
pub use query::*;
pub use registry::*;
pub use util::*;
pub use value::*;
pub use writer::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
