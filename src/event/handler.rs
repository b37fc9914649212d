//! Notice queue.
//!
//! [`NoticeQueue`] buffers outbound [`Notice`]s in emission order. The
//! controller pushes; the host drains after each callback or timer and hands
//! the notices to its collaborators.

use std::collections::VecDeque;

use super::message::Notice;

/// FIFO buffer of outbound notices.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    queue: VecDeque<Notice>,
}

impl NoticeQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a notice.
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    /// Remove and return every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    /// Number of pending notices.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate pending notices without draining.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Direction;

    #[test]
    fn new_queue_is_empty() {
        let queue = NoticeQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut queue = NoticeQueue::new();
        queue.push(Notice::DirectionChanged { direction: Direction::Rtl });
        queue.push(Notice::LightboxClosed);
        assert_eq!(queue.iter().count(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                Notice::DirectionChanged { direction: Direction::Rtl },
                Notice::LightboxClosed,
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
