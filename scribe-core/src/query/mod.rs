mod generator;
mod sql_expression;
mod statement;
mod update;

pub use generator::*;
pub use sql_expression::*;
pub use statement::*;
pub use update::*;
