//! Completion Module
//!
//! Moves ready packets from router heads to the destination sink under a
//! per-tick bandwidth cap.
//!
//! # Critical Invariants
//!
//! 1. **Bandwidth**: at most `bandwidth` packets reach the sink per tick
//! 2. **First ready, first served**: routers are drained in the order their head became ready
//! 3. **No starvation**: a queued router stays queued until served, never skipped

pub mod fairness;

pub use fairness::{Completion, CompletionFairnessQueue};
