use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

// Sliding window over request timestamps, tracked per client key.
#[derive(Debug, Clone)]
pub struct ClientRateLimiter {
    window: Duration,
    max_per_window: usize,
    hits: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl ClientRateLimiter {
    pub fn new(window: Duration, max_per_window: usize) -> Self {
        Self {
            window,
            max_per_window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn allow(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock();
        let stamps = hits.entry(client.to_string()).or_default();
        stamps.retain(|stamp| now.duration_since(*stamp) < self.window);
        if stamps.len() >= self.max_per_window {
            return false;
        }
        stamps.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_the_window_fills() {
        let limiter = ClientRateLimiter::new(Duration::from_secs(60), 3);
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
    }

    #[test]
    fn clients_are_tracked_separately() {
        let limiter = ClientRateLimiter::new(Duration::from_secs(60), 1);
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.2"));
        assert!(!limiter.allow("10.0.0.1"));
    }

    #[test]
    fn window_expiry_frees_the_budget() {
        let limiter = ClientRateLimiter::new(Duration::from_millis(10), 1);
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.allow("10.0.0.1"));
    }
}
