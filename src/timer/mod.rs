//! Owned, cancellable timers on a virtual clock.
//!
//! The engine is single-threaded and event-driven. Instead of callbacks
//! closing over shared state, timers are plain values in a queue owned by
//! the session. Dropping or clearing the queue cancels everything in it,
//! so a stale timer can never reach a newer game.

mod queue;

pub use queue::{millis, Fired, TimerId, TimerQueue};
