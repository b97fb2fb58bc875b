use std::iter::FusedIterator;

/// Borrowing iterator over a [`super::RingQueue`], oldest element first.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [Option<T>], start: usize, remaining: usize) -> Self {
        Self {
            slots,
            pos: start,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slots = self.slots;
        let item = slots[self.pos].as_ref();
        self.pos = (self.pos + 1) % slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::queue::RingQueue;

    #[test]
    fn iterates_in_logical_order_across_wrap() {
        let mut q = RingQueue::with_capacity(3).unwrap();
        q.push('a').unwrap();
        q.push('b').unwrap();
        q.pop().unwrap();
        q.push('c').unwrap();

        let iter = q.iter();
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<String>(), "bc");
        assert_eq!((&q).into_iter().count(), 2);
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let q: RingQueue<u8> = RingQueue::new();
        assert_eq!(q.iter().next(), None);
    }
}
