//! Carousel error taxonomy.

use crate::gallery::TabId;

/// Errors raised by the registry and the tab controller.
///
/// None of these are fatal to the page: a tab whose carousel cannot be built
/// shows static content until the next selection retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    /// The tab's carousel container has not been rendered.
    #[error("carousel container for tab `{tab}` is not rendered")]
    ContainerNotFound { tab: TabId },
    /// A live handle already exists for the tab; dispose it first.
    #[error("tab `{tab}` already has a live carousel")]
    AlreadyActive { tab: TabId },
    /// The slider engine failed while attaching to its container.
    #[error("carousel engine failed to attach to tab `{tab}`: {reason}")]
    EngineAttachFailure { tab: TabId, reason: String },
    /// The gallery has no tab with this id.
    #[error("unknown gallery tab `{tab}`")]
    UnknownTab { tab: TabId },
}

impl CarouselError {
    /// The tab the error refers to.
    pub fn tab(&self) -> &TabId {
        match self {
            Self::ContainerNotFound { tab }
            | Self::AlreadyActive { tab }
            | Self::EngineAttachFailure { tab, .. }
            | Self::UnknownTab { tab } => tab,
        }
    }

    /// Whether selecting the tab again may succeed.
    ///
    /// Attach failures recover exactly like a missing container.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound { .. } | Self::EngineAttachFailure { .. }
        )
    }
}
