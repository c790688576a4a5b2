/// Positional access outside `[0, count)` on a state holder.
///
/// Always a caller bug. Typed accessors (`value1()` ..) can never produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("state index {index} is out of range (count {count})")]
pub struct RangeError {
    pub index: usize,
    pub count: usize,
}

/// Unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?} (expected trace/debug/information/warning/error/critical/none)")]
pub struct ParseLevelError(pub String);
