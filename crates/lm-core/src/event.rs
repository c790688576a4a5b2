use std::fmt;

use serde::Serialize;

/// Stable identity of a log statement: a numeric id plus an optional name.
///
/// Generated call sites keep one of these in a `const` per statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EventId {
    id: i32,
    name: Option<&'static str>,
}

impl EventId {
    pub const fn new(id: i32, name: &'static str) -> Self {
        Self {
            id,
            name: Some(name),
        }
    }

    pub const fn from_id(id: i32) -> Self {
        Self { id, name: None }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        Self::from_id(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}#{}", self.id),
            None => write!(f, "#{}", self.id),
        }
    }
}
