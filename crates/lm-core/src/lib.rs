//! Allocation-free structured state for high-frequency log calls.
//!
//! A call site asks its [`Logger`] whether a level is enabled, and only then
//! builds the arity-matching state holder ([`StateHolder0`] ..
//! [`StateHolder6`], or [`StateHolderN`] beyond that) and hands it to
//! [`Logger::record`]. Message text is produced by the holder's render
//! function, which the sink calls only when it actually needs the text.
//!
//! ```
//! use lm_core::{EventId, LogLevel, StateHolder1, Template, capture::MemoryLogger, gate};
//!
//! const COULD_NOT_OPEN_SOCKET: EventId = EventId::new(0, "CouldNotOpenSocket");
//!
//! let logger = MemoryLogger::new(LogLevel::Trace);
//! gate::log(&logger, LogLevel::Critical, COULD_NOT_OPEN_SOCKET, || {
//!     StateHolder1::new(
//!         |s, _| Template::new("Could not open socket to `{hostName}`").render(s),
//!         None,
//!         ["hostName"],
//!         "microsoft.com",
//!     )
//! });
//! assert_eq!(logger.records()[0].message, "Could not open socket to `microsoft.com`");
//! ```

pub mod capture;
pub mod entry;
pub mod error;
pub mod event;
pub mod gate;
pub mod holder;
pub mod level;
pub mod logger;
pub mod schema;
pub mod template;
pub mod value;

pub use entry::StateEntry;
pub use error::{ParseLevelError, RangeError};
pub use event::EventId;
pub use holder::{
    BoxedSlot, Entries, ErrorRef, LogState, RenderFn, StateHolder0, StateHolder1, StateHolder2,
    StateHolder3, StateHolder4, StateHolder5, StateHolder6, StateHolderN,
};
pub use level::LogLevel;
pub use logger::{Logger, NullLogger};
pub use schema::LoggerMessage;
pub use template::Template;
pub use value::{DebugValue, DisplayValue, ToValue, Value, debug, display};
