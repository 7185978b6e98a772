//! Debounced search input.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

/// Quiet period after the last keystroke before the list is refiltered.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Releases a query only once no newer query has been submitted for the
/// whole delay. Clones share the same sequence.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the delay. Returns `Some(query)` if this is still the most
    /// recent submission, `None` if it was superseded.
    pub async fn settle(&self, query: String) -> Option<String> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(query)
    }
}

#[cfg(test)]
mod tests {
    use utils::command::CommandSummary;

    use super::*;
    use crate::cache::CommandCache;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_query_in_burst_is_released() {
        let debouncer = SearchDebouncer::default();

        let mut handles = Vec::new();
        for query in ["l", "ls", "ls -"] {
            let debouncer = debouncer.clone();
            handles.push(tokio::spawn(async move { debouncer.settle(query.to_string()).await }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut released = Vec::new();
        for handle in handles {
            released.push(handle.await.unwrap());
        }
        assert_eq!(released, vec![None, None, Some("ls -".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_queries_are_all_released() {
        let debouncer = SearchDebouncer::default();
        assert_eq!(debouncer.settle("ls".into()).await, Some("ls".to_string()));
        assert_eq!(debouncer.settle("du".into()).await, Some("du".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_and_immediate_filtering_agree() {
        let commands = vec![
            CommandSummary { id: 1, description: "List files".into(), command: "ls -la".into() },
            CommandSummary { id: 2, description: "Disk usage".into(), command: "du -sh".into() },
        ];

        let mut immediate = CommandCache::default();
        immediate.loaded(commands.clone());
        for query in ["d", "di", "dis", "disk"] {
            immediate.set_query(query);
        }

        let mut debounced = CommandCache::default();
        debounced.loaded(commands);
        let debouncer = SearchDebouncer::default();
        let mut handles = Vec::new();
        for query in ["d", "di", "dis", "disk"] {
            let debouncer = debouncer.clone();
            handles.push(tokio::spawn(async move { debouncer.settle(query.to_string()).await }));
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        for handle in handles {
            if let Some(query) = handle.await.unwrap() {
                debounced.set_query(query);
            }
        }

        assert_eq!(debounced.filtered(), immediate.filtered());
        assert_eq!(debounced.filtered().len(), 1);
    }
}
