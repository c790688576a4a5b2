use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// One `(name, value)` pair of a state holder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateEntry<'a> {
    name: &'a str,
    value: Value<'a>,
}

impl<'a> StateEntry<'a> {
    pub fn new(name: &'a str, value: Value<'a>) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> Value<'a> {
        self.value
    }
}

impl fmt::Display for StateEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
