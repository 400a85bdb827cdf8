//! A fixed-depth delay line for latency-aligned comparisons.
//!
//! Comparing a pipelined output against the input that produced it is the
//! single easiest place to be off by one. The delay line makes the lookback
//! explicit and testable in isolation: values go in every cycle, and come
//! back out exactly `depth` pushes later.

use std::collections::VecDeque;

/// A ring buffer that returns each pushed value `depth` pushes later.
#[derive(Clone, Debug)]
pub struct DelayLine<T> {
    depth: usize,
    slots: VecDeque<T>,
}

impl<T> DelayLine<T> {
    /// Creates a delay line of the given depth. Depth 0 echoes immediately.
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            slots: VecDeque::with_capacity(depth),
        }
    }

    /// The configured depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pushes a value and returns the one pushed `depth` calls earlier.
    ///
    /// Returns `None` until the line is primed, i.e. for the first `depth`
    /// pushes.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.depth == 0 {
            return Some(value);
        }
        self.slots.push_back(value);
        if self.slots.len() > self.depth {
            self.slots.pop_front()
        } else {
            None
        }
    }

    /// Discards all in-flight values, keeping the depth.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_echoes() {
        let mut line = DelayLine::new(0);
        assert_eq!(line.push(7), Some(7));
        assert_eq!(line.push(8), Some(8));
    }

    #[test]
    fn depth_one_returns_previous() {
        let mut line = DelayLine::new(1);
        assert_eq!(line.push(1), None);
        assert_eq!(line.push(2), Some(1));
        assert_eq!(line.push(3), Some(2));
    }

    #[test]
    fn depth_three_priming_and_order() {
        let mut line = DelayLine::new(3);
        assert_eq!(line.push(10), None);
        assert_eq!(line.push(11), None);
        assert_eq!(line.push(12), None);
        assert_eq!(line.push(13), Some(10));
        assert_eq!(line.push(14), Some(11));
    }

    #[test]
    fn clear_requires_repriming() {
        let mut line = DelayLine::new(2);
        line.push(1);
        line.push(2);
        assert_eq!(line.push(3), Some(1));
        line.clear();
        assert_eq!(line.push(4), None);
        assert_eq!(line.push(5), None);
        assert_eq!(line.push(6), Some(4));
    }

    #[test]
    fn depth_is_reported() {
        assert_eq!(DelayLine::<u8>::new(4).depth(), 4);
    }
}
