//! Headless testing framework: fake engines, Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`GalleryController`](crate::controller::GalleryController)
//! on a virtual clock with recording [`FakeEngine`]s. Use [`describe`] to dump
//! the carousel registry as plain text for snapshot-style assertions.

pub mod fake;
pub mod pilot;
pub mod snapshot;

pub use fake::{FakeEngine, FakeEngineFactory, FakeProbe, FakeProbes, FakeState};
pub use pilot::Pilot;
pub use snapshot::{describe, describe_notices};
