use crate::core::math::Vector2;
use crate::domain::error::EngineError;

// Fixed-size ring that never reallocates after construction.
// Renderers read it to draw motion trails behind bodies.

/// Fixed-capacity position history - allocated once, overwritten forever
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    data: Vec<Vector2>,
    head: usize,
    count: usize,
    capacity: usize,
    overwritten: usize,
}

impl TrailBuffer {
    /// A trail needs room for at least one sample.
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidParameter {
                name: "trail capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            data: vec![Vector2::ZERO; capacity], // Single allocation at startup
            head: 0,
            count: 0,
            capacity,
            overwritten: 0,
        })
    }

    /// Record a sample, overwriting the oldest once full
    #[inline]
    pub fn push(&mut self, p: Vector2) {
        let slot = (self.head + self.count) % self.capacity;
        self.data[slot] = p;
        if self.count < self.capacity {
            self.count += 1;
        } else {
            self.head = (self.head + 1) % self.capacity;
            self.overwritten += 1;
        }
    }

    /// Reset counter - memory stays allocated
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
        self.overwritten = 0;
    }

    /// Samples oldest first
    pub fn iter(&self) -> impl Iterator<Item = Vector2> + '_ {
        (0..self.count).map(move |i| self.data[(self.head + i) % self.capacity])
    }

    #[inline]
    pub fn latest(&self) -> Option<Vector2> {
        if self.count == 0 {
            None
        } else {
            Some(self.data[(self.head + self.count - 1) % self.capacity])
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}
