//! Pending request registry
//!
//! Correlates questions dispatched to the UI with the callers waiting on them.
//! A request lives in the registry exactly as long as its outcome is undecided:
//! completing it and removing it happen under one lock acquisition, so every
//! request settles once no matter how answers, cancels, timers and shutdown race.

mod reason;
mod registry;
mod request;


pub use reason::RejectReason;
pub use registry::{PendingRequestRegistry, SettleListener};
pub use request::PendingRequest;
