use std::collections::{HashMap, HashSet};

/// Visit counters for a single page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStats {
    pub page: String,
    pub visits: u64,
    pub unique_visitors: HashSet<String>,
}

impl PageStats {
    fn new(page: String) -> Self {
        Self {
            page,
            visits: 0,
            unique_visitors: HashSet::new(),
        }
    }

    pub fn unique_views(&self) -> u64 {
        self.unique_visitors.len() as u64
    }
}

/// Per-page statistics for one parse run, kept in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct AggregationState {
    pages: Vec<PageStats>,
    index: HashMap<String, usize>,
    processed_rows: u64,
}

impl AggregationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one well-formed line.
    pub fn record(&mut self, page: &str, ip_address: &str) {
        let slot = match self.index.get(page) {
            Some(&slot) => slot,
            None => {
                let slot = self.pages.len();
                self.pages.push(PageStats::new(page.to_string()));
                self.index.insert(page.to_string(), slot);
                slot
            }
        };

        let stats = &mut self.pages[slot];
        stats.visits += 1;
        // Only allocate the key for a visitor not seen on this page yet.
        if !stats.unique_visitors.contains(ip_address) {
            stats.unique_visitors.insert(ip_address.to_string());
        }

        self.processed_rows += 1;
    }

    pub fn pages(&self) -> &[PageStats] {
        &self.pages
    }

    pub fn get(&self, page: &str) -> Option<&PageStats> {
        self.index.get(page).map(|&slot| &self.pages[slot])
    }

    pub fn processed_rows(&self) -> u64 {
        self.processed_rows
    }

    pub fn total_visits(&self) -> u64 {
        self.pages.iter().map(|p| p.visits).sum()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counts_visits_and_distinct_visitors() {
        let mut state = AggregationState::new();
        state.record("/help_page/1", "126.318.035.038");
        state.record("/index", "184.123.665.067");
        state.record("/help_page/1", "126.318.035.038");
        state.record("/help_page/1", "722.247.931.582");

        let help = state.get("/help_page/1").unwrap();
        assert_eq!(help.visits, 3);
        assert_eq!(help.unique_views(), 2);
        assert_eq!(state.get("/index").unwrap().visits, 1);
        assert!(state.get("/missing").is_none());
        assert_eq!(state.processed_rows(), 4);
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut state = AggregationState::new();
        for page in ["/c", "/a", "/c", "/b", "/a"] {
            state.record(page, "1.1.1.1");
        }

        let order: Vec<&str> = state.pages().iter().map(|p| p.page.as_str()).collect();
        assert_eq!(order, vec!["/c", "/a", "/b"]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn starts_empty() {
        let state = AggregationState::new();
        assert!(state.is_empty());
        assert_eq!(state.processed_rows(), 0);
        assert_eq!(state.total_visits(), 0);
    }

    proptest! {
        #[test]
        fn prop_visits_conserved_and_bound_unique(
            rows in proptest::collection::vec(("/[a-d]", "10\\.0\\.0\\.[0-3]"), 0..200),
        ) {
            let mut state = AggregationState::new();
            for (page, ip) in &rows {
                state.record(page, ip);
            }

            prop_assert_eq!(state.total_visits(), state.processed_rows());
            prop_assert_eq!(state.processed_rows(), rows.len() as u64);
            for page in state.pages() {
                prop_assert!(page.unique_views() <= page.visits);
            }
        }
    }
}
