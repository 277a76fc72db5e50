//! Debounced symbol suggestions for the search box.

use finanalyse_core::{DashboardApi, Result, SymbolMatch};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    /// Empty query: hide the list.
    Cleared,
    Ready(Vec<SymbolMatch>),
    /// A newer keystroke arrived; this result must not be shown.
    Superseded,
}

pub struct SuggestionDebouncer {
    api: Arc<dyn DashboardApi>,
    delay: Duration,
    generation: AtomicU64,
}

impl SuggestionDebouncer {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self::with_delay(api, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(api: Arc<dyn DashboardApi>, delay: Duration) -> Self {
        Self {
            api,
            delay,
            generation: AtomicU64::new(0),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Called on every keystroke with the full input text.
    pub async fn suggest(&self, query: &str) -> Result<Suggestions> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Suggestions::Cleared);
        }

        tokio::time::sleep(self.delay).await;
        if !self.is_current(generation) {
            return Ok(Suggestions::Superseded);
        }

        let matches = self.api.search(query).await?;
        if !self.is_current(generation) {
            tracing::debug!(query, "Discarding stale suggestions");
            return Ok(Suggestions::Superseded);
        }
        Ok(Suggestions::Ready(matches))
    }
}
