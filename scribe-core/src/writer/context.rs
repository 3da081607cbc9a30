use crate::{Parameters, Value};

/// Mutable state threaded through the writing of one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Synthetic parameters issued so far.
    pub counter: u32,
    /// Prefix column identifiers with the table identifier.
    pub qualify_columns: bool,
    /// Parameters collected so far, in order of appearance.
    pub parameters: Parameters,
}

impl Context {
    pub fn new(qualify_columns: bool) -> Self {
        Self {
            counter: 0,
            qualify_columns,
            parameters: Default::default(),
        }
    }

    /// Register a value as the next synthetic parameter (`p1`, `p2`, ...) and return its name.
    pub fn add_parameter(&mut self, value: Value) -> String {
        self.counter += 1;
        let name = format!("p{}", self.counter);
        self.parameters.push(name.clone(), value);
        name
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(true)
    }
}
