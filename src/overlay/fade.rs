//! Image-load gate
//!
//! Member widgets are created hidden and faded in once their avatar has
//! loaded, so a slow image host never shows broken placeholders. The gate
//! tracks the widgets still waiting; a driver polls it on a fixed interval
//! and stops once it is settled.
//!
//! One gate belongs to one render pass. A new snapshot gets a new gate.

/// Default polling interval for the driver, in milliseconds
pub const POLL_INTERVAL_MS: u32 = 25;

/// Widgets waiting for their image, keyed by whatever the driver can use to
/// find them again (a DOM id, a node handle)
#[derive(Debug, Clone)]
pub struct PendingImages<K> {
    pending: Vec<K>,
}

impl<K> Default for PendingImages<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq> PendingImages<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting on a widget. Watching the same key twice is a no-op.
    pub fn watch(&mut self, key: K) {
        if !self.pending.contains(&key) {
            self.pending.push(key);
        }
    }

    /// Check every pending widget once. Returns the ones whose image is now
    /// loaded (to be faded in) and forgets them.
    pub fn poll<F>(&mut self, mut is_loaded: F) -> Vec<K>
    where
        F: FnMut(&K) -> bool,
    {
        let mut ready = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());

        for key in self.pending.drain(..) {
            if is_loaded(&key) {
                ready.push(key);
            } else {
                waiting.push(key);
            }
        }

        self.pending = waiting;
        ready
    }

    /// Nothing left to wait for; the driver can stop
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_poll_releases_loaded_only() {
        let mut gate = PendingImages::new();
        gate.watch("a");
        gate.watch("b");
        gate.watch("c");

        let loaded: HashSet<&str> = ["b"].into_iter().collect();
        let ready = gate.poll(|k| loaded.contains(k));

        assert_eq!(ready, vec!["b"]);
        assert_eq!(gate.len(), 2);
        assert!(!gate.is_settled());
    }

    #[test]
    fn test_settles_once_all_loaded() {
        let mut gate = PendingImages::new();
        gate.watch(1);
        gate.watch(2);

        assert_eq!(gate.poll(|k| *k == 1), vec![1]);
        assert_eq!(gate.poll(|_| true), vec![2]);
        assert!(gate.is_settled());
        assert!(gate.poll(|_| true).is_empty());
    }

    #[test]
    fn test_each_widget_released_once() {
        let mut gate = PendingImages::new();
        gate.watch("x");
        gate.watch("x");

        assert_eq!(gate.len(), 1);
        assert_eq!(gate.poll(|_| true), vec!["x"]);
        assert!(gate.poll(|_| true).is_empty());
    }

    #[test]
    fn test_poll_keeps_watch_order() {
        let mut gate = PendingImages::new();
        for k in ["c", "a", "b"] {
            gate.watch(k);
        }
        assert_eq!(gate.poll(|_| true), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_new_gate_is_settled() {
        let gate: PendingImages<String> = PendingImages::new();
        assert!(gate.is_settled());
    }
}
