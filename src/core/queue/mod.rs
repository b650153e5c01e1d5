use crate::core::error::CapacityError;

/// Fixed-size circular storage: handles only the slot and cursor bookkeeping.
///
/// `Ring` does no locking of its own; [`RingQueue`](crate::RingQueue) keeps
/// it behind a mutex.
pub struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize, // oldest live element, meaningful only while count > 0
    tail: usize, // next slot to write
    count: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring with exactly `capacity` slots
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }
        let slots = (0..capacity).map(|_| None).collect::<Vec<_>>();
        Ok(Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
        })
    }

    /// Push an item, overwriting the oldest one when full.
    ///
    /// Returns the evicted item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            let oldest = self.slots[self.head].take();
            self.head = self.advance(self.head);
            self.count -= 1;
            oldest
        } else {
            None
        };

        self.slots[self.tail] = Some(item);
        self.tail = self.advance(self.tail);
        self.count += 1;

        // -- post op assertion: a push always leaves at least one live slot
        debug_assert!(
            self.count > 0 && self.count <= self.capacity(),
            "Count must stay within 1..=capacity after push"
        );
        evicted
    }

    /// Pop the oldest item
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let item = self.slots[self.head].take();
        debug_assert!(item.is_some(), "Slot at head must be live");
        self.head = self.advance(self.head);
        self.count -= 1;
        item
    }

    /// Get the number of live items
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use proptest::prelude::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Ring::<u8>::new(0).err(), Some(CapacityError));
    }

    #[test]
    fn new_ring_is_empty() {
        let ring = Ring::<u32>::new(4).unwrap();
        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 4);
    }

    #[test]
    fn push_reports_the_evicted_item() {
        let mut ring = Ring::new(2).unwrap();
        assert_eq!(ring.push('a'), None);
        assert_eq!(ring.push('b'), None);
        assert!(ring.is_full());
        assert_eq!(ring.push('c'), Some('a'));
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.pop(), Some('b'));
        assert_eq!(ring.pop(), Some('c'));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn cursors_wrap_around() {
        let mut ring = Ring::new(3).unwrap();
        for round in 0..10 {
            ring.push(round);
            ring.push(round + 100);
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round + 100));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn single_slot_ring_keeps_latest() {
        let mut ring = Ring::new(1).unwrap();
        ring.push(1);
        assert_eq!(ring.push(2), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert!(ring.is_empty());
    }

    #[test]
    fn popped_values_are_dropped_from_storage() {
        use std::rc::Rc;

        let tracked = Rc::new(());
        let mut ring = Ring::new(2).unwrap();
        ring.push(Rc::clone(&tracked));
        drop(ring.pop());
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(i32),
        Pop,
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_matches_overwriting_vecdeque(
            capacity in 1usize..8,
            ops in prop::collection::vec(
                prop_oneof![any::<i32>().prop_map(Op::Push), Just(Op::Pop)],
                1..200,
            ),
        ) {
            let mut ring = Ring::new(capacity).unwrap();
            let mut model: VecDeque<i32> = VecDeque::with_capacity(capacity);

            for op in ops {
                match op {
                    Op::Push(value) => {
                        let expected = if model.len() == capacity {
                            model.pop_front()
                        } else {
                            None
                        };
                        model.push_back(value);
                        prop_assert_eq!(ring.push(value), expected);
                    }
                    Op::Pop => prop_assert_eq!(ring.pop(), model.pop_front()),
                }
                prop_assert!(ring.len() <= ring.capacity());
                prop_assert_eq!(ring.len(), model.len());
            }
        }
    }
}
