//! Tokio driver: runs a [`GalleryController`] against wall-clock time.
//!
//! [`drive`] sleeps until either the next controller deadline or the next
//! inbound [`PageEvent`], whichever comes first, and forwards every
//! [`Notice`] the controller emits onto an unbounded channel. The controller
//! is single-threaded, so the driver runs on the calling task rather than
//! being spawned.

use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::controller::GalleryController;
use crate::event::{Notice, PageEvent};
use crate::time::{Clock, Timestamp};

// ---------------------------------------------------------------------------
// TokioClock
// ---------------------------------------------------------------------------

/// A [`Clock`] backed by tokio's `Instant`, so paused test time applies.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    /// A clock whose zero is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The instant corresponding to `at`.
    pub fn instant_at(&self, at: Timestamp) -> Instant {
        self.origin + Duration::from_millis(at.as_millis())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed().as_millis();
        Timestamp::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

// ---------------------------------------------------------------------------
// drive
// ---------------------------------------------------------------------------

/// Run `controller` until the event channel closes, then hand it back.
///
/// Notices are forwarded on `notices`; a closed notice channel is logged
/// once and otherwise ignored.
pub async fn drive(
    mut controller: GalleryController<TokioClock>,
    mut events: UnboundedReceiver<PageEvent>,
    notices: UnboundedSender<Notice>,
) -> GalleryController<TokioClock> {
    info!("gallery runtime started");
    let mut listening = true;
    loop {
        controller.poll();
        forward(&mut controller, &notices, &mut listening);

        let wake = controller
            .next_deadline()
            .map(|deadline| controller.clock().instant_at(deadline));
        let timer = async move {
            match wake {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => controller.handle_event(event),
                None => break,
            },
            () = timer => {}
        }
    }
    forward(&mut controller, &notices, &mut listening);
    info!("gallery runtime stopped");
    controller
}

fn forward(
    controller: &mut GalleryController<TokioClock>,
    notices: &UnboundedSender<Notice>,
    listening: &mut bool,
) {
    for notice in controller.drain_notices() {
        if !*listening {
            continue;
        }
        if notices.send(notice).is_err() {
            debug!("notice receiver dropped");
            *listening = false;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
