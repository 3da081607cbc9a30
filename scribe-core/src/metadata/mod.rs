mod descriptor;
mod resolver;
mod resolvers;

pub use descriptor::*;
pub use resolver::*;
pub use resolvers::*;
