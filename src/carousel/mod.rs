//! Carousel core: per-tab engine handles, the registry that owns them, and
//! the autoplay supervisor.
//!
//! - **[`config`]**: autoplay timings, responsive breakpoints, resolved layout
//! - **[`engine`]**: the [`CarouselEngine`] capability and its factory
//! - **[`slide`]**: [`SlideEngine`], the built-in looping slider
//! - **[`handle`]**: [`CarouselHandle`] and its lifecycle state machine
//! - **[`registry`]**: at most one live handle per tab
//! - **[`supervisor`]**: the periodic, idempotent autoplay correction pass

pub mod config;
pub mod engine;
pub mod error;
pub mod handle;
pub mod registry;
pub mod slide;
pub mod supervisor;

pub use config::{AutoplayConfig, Breakpoint, BreakpointSpec, Breakpoints, CarouselConfig, Layout};
pub use engine::{AttachError, AttachRequest, CarouselEngine, EngineFactory, Navigation};
pub use error::CarouselError;
pub use handle::{CarouselHandle, HandleId, HandleState, PauseCause};
pub use registry::{Mount, Registry};
pub use slide::{SlideEngine, SlideEngineFactory};
pub use supervisor::{Correction, Supervisor, SupervisorReport};
