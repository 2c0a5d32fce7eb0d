//! `tc-events` — the simulator's event stream as seen by the trip pipeline.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`event`]     | `Event` enum, `EventKind`                                 |
//! | [`handler`]   | `EventHandler` trait, `replay`                            |
//! | [`loader`]    | `load_events_csv`, `load_events_reader`                   |
//! | [`error`]     | `EventError`, `EventResult<T>`                            |
//!
//! # Ordering contract
//!
//! Handlers assume events arrive in non-decreasing time order, one logical
//! thread per replay.  [`replay`] enforces the ordering and fails fast on the
//! first violation; handlers themselves do no synchronisation.

pub mod error;
pub mod event;
pub mod handler;
pub mod loader;


pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use handler::{EventHandler, replay};
pub use loader::{load_events_csv, load_events_reader};
