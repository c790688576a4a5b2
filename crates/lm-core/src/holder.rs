//! Fixed-arity state holders.
//!
//! One hand-specialised holder per arity from 0 to 6 keeps the values of a
//! log call fully typed and inline, so nothing is boxed or allocated until a
//! sink asks for text. [`StateHolderN`] is the boxed fallback for calls with
//! more than six parameters.
//!
//! Every holder is immutable after construction and implements [`LogState`],
//! the object-safe view sinks consume.

use std::error::Error;
use std::fmt;
use std::iter::FusedIterator;

use crate::entry::StateEntry;
use crate::error::RangeError;
use crate::value::ToValue;

/// Error value that may travel alongside a holder.
pub type ErrorRef = dyn Error + 'static;

/// Render function bound to a holder.
///
/// A plain `fn` pointer: it cannot capture anything, so its output depends
/// only on the holder and the attached error.
pub type RenderFn<S> = fn(&S, Option<&ErrorRef>) -> String;

/// Object-safe view of a state holder.
pub trait LogState {
    /// Fixed number of entries.
    fn count(&self) -> usize;

    /// Entry at `index`, or [`RangeError`] outside `[0, count)`.
    fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError>;

    /// Entries in positional order. Each call starts a fresh pass.
    fn entries(&self) -> Entries<'_>;

    fn error(&self) -> Option<&ErrorRef>;

    /// Invoke the bound render function.
    fn render(&self) -> String;
}

impl fmt::Debug for dyn LogState + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|e| (e.name(), e.value())))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Lazy positional iterator over a holder's entries.
#[derive(Clone)]
pub struct Entries<'a> {
    state: &'a dyn LogState,
    front: usize,
    back: usize,
}

impl<'a> Entries<'a> {
    pub fn new(state: &'a dyn LogState) -> Self {
        Self {
            state,
            front: 0,
            back: state.count(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = StateEntry<'a>;

    fn next(&mut self) -> Option<StateEntry<'a>> {
        if self.front >= self.back {
            return None;
        }
        let state: &'a dyn LogState = self.state;
        let entry = state.get(self.front).ok();
        self.front += 1;
        entry
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for Entries<'a> {
    fn next_back(&mut self) -> Option<StateEntry<'a>> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let state: &'a dyn LogState = self.state;
        state.get(self.back).ok()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl FusedIterator for Entries<'_> {}

// ---------------------------------------------------------------------------
// StateHolder0
// ---------------------------------------------------------------------------

/// Holder for a statement without parameters.
///
/// Renders a constant: empty by default, or the literal message given to
/// [`StateHolder0::literal`]. The attached error never changes the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateHolder0<'e> {
    message: &'static str,
    error: Option<&'e ErrorRef>,
}

impl<'e> StateHolder0<'e> {
    pub const ARITY: usize = 0;

    pub fn new(error: Option<&'e ErrorRef>) -> Self {
        Self { message: "", error }
    }

    pub fn literal(message: &'static str, error: Option<&'e ErrorRef>) -> Self {
        Self { message, error }
    }

    pub fn count(&self) -> usize {
        0
    }

    pub fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
        Err(RangeError { index, count: 0 })
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    pub fn error(&self) -> Option<&'e ErrorRef> {
        self.error
    }

    pub fn render(&self) -> String {
        self.message.to_string()
    }
}

impl LogState for StateHolder0<'_> {
    fn count(&self) -> usize {
        0
    }

    fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
        Self::get(self, index)
    }

    fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    fn error(&self) -> Option<&ErrorRef> {
        self.error
    }

    fn render(&self) -> String {
        Self::render(self)
    }
}

impl fmt::Display for StateHolder0<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl<'a> IntoIterator for &'a StateHolder0<'_> {
    type Item = StateEntry<'a>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Entries<'a> {
        Entries::new(self)
    }
}

// ---------------------------------------------------------------------------
// StateHolder1 ..= StateHolder6
// ---------------------------------------------------------------------------

macro_rules! state_holder {
    (
        $(#[$doc:meta])*
        $name:ident, $arity:literal;
        $( $idx:tt => $field:ident: $T:ident );+ $(;)?
    ) => {
        $(#[$doc])*
        #[derive(Clone, Copy)]
        pub struct $name<'e, $($T),+> {
            names: [&'static str; $arity],
            $($field: $T,)+
            error: Option<&'e ErrorRef>,
            formatter: RenderFn<$name<'e, $($T),+>>,
        }

        impl<'e, $($T: ToValue),+> $name<'e, $($T),+> {
            pub const ARITY: usize = $arity;

            pub fn new(
                formatter: RenderFn<Self>,
                error: Option<&'e ErrorRef>,
                names: [&'static str; $arity],
                $($field: $T),+
            ) -> Self {
                Self {
                    names,
                    $($field,)+
                    error,
                    formatter,
                }
            }

            pub fn count(&self) -> usize {
                $arity
            }

            pub fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
                match index {
                    $($idx => Ok(StateEntry::new(self.names[$idx], self.$field.to_value())),)+
                    _ => Err(RangeError { index, count: $arity }),
                }
            }

            pub fn entries(&self) -> Entries<'_> {
                Entries::new(self)
            }

            pub fn names(&self) -> &[&'static str; $arity] {
                &self.names
            }

            pub fn error(&self) -> Option<&'e ErrorRef> {
                self.error
            }

            pub fn render(&self) -> String {
                (self.formatter)(self, self.error)
            }

            $(
                pub fn $field(&self) -> &$T {
                    &self.$field
                }
            )+
        }

        impl<'e, $($T: ToValue),+> LogState for $name<'e, $($T),+> {
            fn count(&self) -> usize {
                $arity
            }

            fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
                Self::get(self, index)
            }

            fn entries(&self) -> Entries<'_> {
                Entries::new(self)
            }

            fn error(&self) -> Option<&ErrorRef> {
                self.error
            }

            fn render(&self) -> String {
                Self::render(self)
            }
        }

        impl<'e, $($T: ToValue),+> fmt::Display for $name<'e, $($T),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.render())
            }
        }

        impl<'e, $($T: ToValue),+> fmt::Debug for $name<'e, $($T),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("entries", &(self as &dyn LogState))
                    .field("error", &self.error)
                    .finish()
            }
        }

        impl<'a, 'e, $($T: ToValue),+> IntoIterator for &'a $name<'e, $($T),+> {
            type Item = StateEntry<'a>;
            type IntoIter = Entries<'a>;

            fn into_iter(self) -> Entries<'a> {
                Entries::new(self)
            }
        }
    };
}

state_holder! {
    /// Holder for a statement with one parameter.
    StateHolder1, 1;
    0 => value1: T1;
}

state_holder! {
    /// Holder for a statement with two parameters.
    StateHolder2, 2;
    0 => value1: T1;
    1 => value2: T2;
}

state_holder! {
    /// Holder for a statement with three parameters.
    StateHolder3, 3;
    0 => value1: T1;
    1 => value2: T2;
    2 => value3: T3;
}

state_holder! {
    /// Holder for a statement with four parameters.
    StateHolder4, 4;
    0 => value1: T1;
    1 => value2: T2;
    2 => value3: T3;
    3 => value4: T4;
}

state_holder! {
    /// Holder for a statement with five parameters.
    StateHolder5, 5;
    0 => value1: T1;
    1 => value2: T2;
    2 => value3: T3;
    3 => value4: T4;
    4 => value5: T5;
}

state_holder! {
    /// Holder for a statement with six parameters.
    StateHolder6, 6;
    0 => value1: T1;
    1 => value2: T2;
    2 => value3: T3;
    3 => value4: T4;
    4 => value5: T5;
    5 => value6: T6;
}

// ---------------------------------------------------------------------------
// StateHolderN (boxed fallback)
// ---------------------------------------------------------------------------

/// One boxed `(name, value)` slot of a [`StateHolderN`].
pub type BoxedSlot<'a> = (&'static str, Box<dyn ToValue + 'a>);

/// Ordered holder for statements with more than six parameters.
///
/// Pays one allocation per slot; only use it where the fixed-arity holders
/// run out.
pub struct StateHolderN<'a> {
    slots: Vec<BoxedSlot<'a>>,
    error: Option<&'a ErrorRef>,
    formatter: RenderFn<StateHolderN<'a>>,
}

impl<'a> StateHolderN<'a> {
    pub fn new(
        formatter: RenderFn<Self>,
        error: Option<&'a ErrorRef>,
        slots: impl IntoIterator<Item = BoxedSlot<'a>>,
    ) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            error,
            formatter,
        }
    }

    /// Box a single slot for [`StateHolderN::new`].
    pub fn slot(name: &'static str, value: impl ToValue + 'a) -> BoxedSlot<'a> {
        (name, Box::new(value))
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
        self.slots
            .get(index)
            .map(|(name, value)| StateEntry::new(*name, value.to_value()))
            .ok_or(RangeError {
                index,
                count: self.slots.len(),
            })
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    pub fn error(&self) -> Option<&'a ErrorRef> {
        self.error
    }

    pub fn render(&self) -> String {
        (self.formatter)(self, self.error)
    }
}

impl LogState for StateHolderN<'_> {
    fn count(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, index: usize) -> Result<StateEntry<'_>, RangeError> {
        Self::get(self, index)
    }

    fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    fn error(&self) -> Option<&ErrorRef> {
        self.error
    }

    fn render(&self) -> String {
        Self::render(self)
    }
}

impl fmt::Display for StateHolderN<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for StateHolderN<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHolderN")
            .field("entries", &(self as &dyn LogState))
            .field("error", &self.error)
            .finish()
    }
}

impl<'a> IntoIterator for &'a StateHolderN<'_> {
    type Item = StateEntry<'a>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Entries<'a> {
        Entries::new(self)
    }
}
