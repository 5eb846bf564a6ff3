use std::sync::atomic::{AtomicU64, Ordering};

/// Visit counter for the landing page.
///
/// Lives only in this process: it starts at zero on every restart and each
/// replica keeps its own count.
#[derive(Debug, Default)]
pub struct HitCounter {
    count: AtomicU64,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one visit and return the updated total.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_zero_and_counts_up() {
        let hits = HitCounter::new();
        assert_eq!(hits.get(), 0);
        assert_eq!(hits.increment(), 1);
        assert_eq!(hits.increment(), 2);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let hits = Arc::new(HitCounter::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let hits = hits.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        hits.increment();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(hits.get(), 8_000);
    }
}
