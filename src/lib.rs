//! Metadata-driven SQL generation.
//!
//! Declare an entity once with `#[derive(Entity)]`, then ask a [`SqlGenerator`] for parameterized
//! statements in any dialect:
//!
//! ```ignore
//! use scribe::{Entity, GenericSqlWriter, SqlGenerator};
//!
//! #[derive(Entity, Clone)]
//! struct Product {
//!     #[scribe(key)]
//!     id: i64,
//!     name: String,
//!     discontinued: bool,
//! }
//!
//! let writer = GenericSqlWriter::new();
//! let statement = SqlGenerator::global().select::<Product>(&writer, !Product::discontinued)?;
//! assert_eq!(
//!     &*statement.sql,
//!     "select * from \"Products\" where not (\"Products\".\"discontinued\" = '1')"
//! );
//! ```

pub use scribe_core::*;
pub use scribe_macros::Entity;
