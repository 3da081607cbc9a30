use crate::Value;
use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

/// Ordered named parameters of a statement.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Parameters(Vec<(String, Value)>);

impl Parameters {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Parameters {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// SQL text plus the parameters it references, ready for a data access driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: Arc<str>,
    pub parameters: Parameters,
}

impl Statement {
    pub fn new(sql: impl Into<Arc<str>>, parameters: Parameters) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
