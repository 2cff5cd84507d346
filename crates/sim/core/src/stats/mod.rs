//! Stat ledger - the numeric backbone of the simulation.
//!
//! Every subject owns one [`StatLedger`] holding a fixed, enumerable set of
//! stats ([`StatKind`]). Each stat tracks a current value, a maximum, the
//! unmodified base maximum, and a regeneration rate (optionally shaped by a
//! [`RegenCurve`]). All mutation goes through a single clamp-and-broadcast
//! path so the `0 <= current <= max` invariant holds after every operation.

pub mod entry;
pub mod kind;
pub mod ledger;

pub use entry::{RegenCurve, StatEntry};
pub use kind::{StatCategory, StatKind};
pub use ledger::{StatDefaults, StatLedger};
