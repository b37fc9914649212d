//! Page events in, collaborator notices out.
//!
//! [`PageEvent`]s are the user-input callbacks the host forwards to the
//! controller. [`Notice`]s are fire-and-forget requests the controller emits
//! for presentational collaborators (reveal tweens, direction changes); they
//! accumulate in a [`NoticeQueue`] until the host drains them.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::NoticeQueue;
pub use input::PageEvent;
pub use message::{Notice, RevealRequest};
