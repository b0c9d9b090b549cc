//! Round-robin replay buffer.
use super::CollisionReplayBufferConfig;
use crate::{error::CrashReplayError, ReplayBufferBase};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A fixed-capacity ring of items committed on collisions.
///
/// Items are appended until the buffer is full. After that each commit
/// overwrites the slot under a cursor that advances by one per commit, so the
/// oldest item is always the next to go. The buffer lives as long as its
/// owner, across any number of episodes.
pub struct CollisionReplayBuffer<T> {
    capacity: usize,
    cursor: usize,
    items: Vec<T>,
    rng: StdRng,
}

impl<T> CollisionReplayBuffer<T> {
    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot the next commit goes to once the buffer is full.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Iterates over the items in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates over the items from the oldest commit to the newest.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &T> {
        let split = if self.items.len() < self.capacity {
            0
        } else {
            self.cursor
        };
        let (newer, older) = self.items.split_at(split);
        older.iter().chain(newer.iter())
    }
}

impl<T: Clone> ReplayBufferBase for CollisionReplayBuffer<T> {
    type Config = CollisionReplayBufferConfig;
    type Item = T;

    /// Builds an empty buffer.
    ///
    /// # Panics
    ///
    /// Panics if `config.capacity` is zero.
    fn build(config: &Self::Config) -> Self {
        assert!(config.capacity > 0, "Replay buffer capacity must be positive");
        Self {
            capacity: config.capacity,
            cursor: 0,
            items: Vec::with_capacity(config.capacity),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    fn commit(&mut self, item: T) {
        // TODO: evict by collision statistics, e.g. the entry with the fewest
        // collisions over its last replays, instead of by age.
        if self.items.len() < self.capacity {
            self.items.push(item);
        } else {
            self.items[self.cursor] = item;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    fn sample(&mut self) -> Result<T, CrashReplayError> {
        if self.items.is_empty() {
            return Err(CrashReplayError::EmptyBuffer);
        }
        let ix = self.rng.gen_range(0..self.items.len());
        Ok(self.items[ix].clone())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::CollisionReplayBuffer;
    use crate::{error::CrashReplayError, CollisionReplayBufferConfig, ReplayBufferBase};

    fn buffer(capacity: usize) -> CollisionReplayBuffer<usize> {
        CollisionReplayBuffer::build(&CollisionReplayBufferConfig::default().capacity(capacity))
    }

    #[test]
    fn test_fills_then_overwrites_round_robin() {
        let capacity = 5;
        let k = 3;
        let mut buffer = buffer(capacity);
        for i in 0..capacity + k {
            buffer.commit(i);
            assert!(buffer.len() <= capacity);
        }

        assert_eq!(buffer.len(), capacity);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7, 3, 4]);
        assert_eq!(
            buffer.iter_oldest_first().copied().collect::<Vec<_>>(),
            (k..k + capacity).collect::<Vec<_>>()
        );
        assert_eq!(buffer.cursor(), k);
    }

    #[test]
    fn test_iter_oldest_first_before_full() {
        let mut buffer = buffer(4);
        buffer.commit(10);
        buffer.commit(11);

        assert_eq!(
            buffer.iter_oldest_first().copied().collect::<Vec<_>>(),
            vec![10, 11]
        );
    }

    #[test]
    fn test_sample_empty() {
        let mut buffer = buffer(4);
        assert!(buffer.is_empty());
        assert_eq!(buffer.sample(), Err(CrashReplayError::EmptyBuffer));
    }

    #[test]
    fn test_sample_is_uniform() {
        let n = 4;
        let n_samples = 10_000;
        let mut buffer = buffer(10);
        (0..n).for_each(|i| buffer.commit(i));

        let mut counts = vec![0usize; n];
        for _ in 0..n_samples {
            let item = buffer.sample().unwrap();
            assert!(item < n);
            counts[item] += 1;
        }

        let expected = n_samples as f64 / n as f64;
        for count in counts {
            assert!(
                (count as f64 - expected).abs() < 0.1 * expected,
                "count {} too far from {}",
                count,
                expected
            );
        }
    }

    #[test]
    fn test_sample_returns_copy() {
        let mut buffer = CollisionReplayBuffer::<Vec<u8>>::build(
            &CollisionReplayBufferConfig::default().capacity(1),
        );
        buffer.commit(vec![1, 2, 3]);

        let mut sampled = buffer.sample().unwrap();
        sampled.push(4);

        assert_eq!(buffer.iter().next().unwrap(), &vec![1, 2, 3]);
    }
}
