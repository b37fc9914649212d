//! Time: millisecond timestamps, injectable clocks, cancellable timers.
//!
//! Everything in the carousel core is driven by explicit timestamps rather
//! than ambient wall-clock reads, so the whole lifecycle can be exercised
//! with a [`ManualClock`] in tests.

pub mod clock;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use timer::{TimerId, TimerQueue};
