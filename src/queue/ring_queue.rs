use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, warn};

use crate::codec::TextCodec;
use crate::error::{QueueError, QueueResult};
use crate::queue::iter::Iter;

/// Bounded FIFO over a circular slot array.
///
/// `start` points at the oldest live element and `end` at the next free
/// slot. One slot is always left vacant so that `start == end` means empty,
/// which gives a queue with `capacity` slots room for `capacity - 1`
/// elements. A zero capacity queue owns no storage at all.
#[derive(Debug, Clone)]
pub struct RingQueue<T> {
    buf: Vec<Option<T>>,
    start: usize,
    end: usize,
}

fn alloc_slots<T>(cap: usize) -> QueueResult<Vec<Option<T>>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(cap).map_err(|e| {
        QueueError::InvalidArgument(format!("cannot allocate {} slots: {}", cap, e))
    })?;
    buf.resize_with(cap, || None);
    Ok(buf)
}

impl<T> RingQueue<T> {
    /// Empty queue without storage.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            start: 0,
            end: 0,
        }
    }

    pub fn with_capacity(cap: usize) -> QueueResult<Self> {
        Ok(Self {
            buf: alloc_slots(cap)?,
            start: 0,
            end: 0,
        })
    }

    /// Number of allocated slots, including the reserved one.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        let cap = self.buf.len();
        if cap == 0 {
            0
        } else if self.end >= self.start {
            self.end - self.start
        } else {
            cap - self.start + self.end
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A zero capacity queue is never reported as full, even though it
    /// rejects every push.
    pub fn is_full(&self) -> bool {
        let cap = self.buf.len();
        cap > 0 && (self.end + 1) % cap == self.start
    }

    pub fn push(&mut self, value: T) -> QueueResult<()> {
        let cap = self.buf.len();
        if cap == 0 || self.is_full() {
            return Err(QueueError::CapacityExceeded { capacity: cap });
        }
        self.buf[self.end] = Some(value);
        self.end = (self.end + 1) % cap;
        Ok(())
    }

    pub fn pop(&mut self) -> QueueResult<T> {
        if self.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let item = self.buf[self.start].take();
        self.start = (self.start + 1) % self.buf.len();
        item.ok_or(QueueError::EmptyQueue)
    }

    /// Oldest element, if any.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.buf[self.start].as_ref()
    }

    /// Smallest element in logical order. On ties the earliest one wins.
    pub fn find_min(&self) -> QueueResult<&T>
    where
        T: PartialOrd,
    {
        let mut iter = self.iter();
        let mut min = iter.next().ok_or(QueueError::EmptyQueue)?;
        for item in iter {
            if item < min {
                min = item;
            }
        }
        Ok(min)
    }

    /// Reallocates to `new_cap` slots, compacting live elements to the
    /// front. `new_cap` must leave room for the reserved slot unless the
    /// queue is empty.
    pub fn resize(&mut self, new_cap: usize) -> QueueResult<()> {
        if new_cap == self.buf.len() {
            return Ok(());
        }
        let count = self.len();
        if count > 0 && new_cap <= count {
            return Err(QueueError::CapacityTooSmall {
                requested: new_cap,
                count,
            });
        }
        debug!(
            "resizing ring queue from {} to {} slots ({} live)",
            self.buf.len(),
            new_cap,
            count
        );
        if new_cap == 0 {
            *self = Self::new();
            return Ok(());
        }

        let mut buf = alloc_slots(new_cap)?;
        let old_cap = self.buf.len();
        for (i, slot) in buf.iter_mut().take(count).enumerate() {
            *slot = self.buf[(self.start + i) % old_cap].take();
        }
        self.buf = buf;
        self.start = 0;
        self.end = count;
        Ok(())
    }

    /// Drops every live element, keeping the allocated slots.
    pub fn clear(&mut self) {
        self.buf.iter_mut().for_each(|slot| *slot = None);
        self.start = 0;
        self.end = 0;
    }

    /// Moves the storage out, leaving `self` empty and storage-less.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Pops every element, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Ok(item) = self.pop() {
            out.push(item);
        }
        out
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buf, self.start, self.len())
    }

    /// Writes the queue in the line-oriented text format.
    pub fn save_to<W: Write>(&self, writer: W) -> QueueResult<()>
    where
        T: fmt::Display,
    {
        TextCodec::encode(self, writer)
    }

    /// Replaces the contents with a queue read from `reader`. The result is
    /// full: it gets exactly one slot more than the number of elements read.
    /// On failure the queue is left empty and storage-less.
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> QueueResult<()>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        *self = Self::new();
        match TextCodec::decode(reader) {
            Ok(queue) => {
                *self = queue;
                Ok(())
            }
            Err(e) => {
                warn!("failed to load ring queue: {}", e);
                Err(e)
            }
        }
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues compare equal only when they have the same capacity and the
/// same elements in logical order; where the elements sit physically does
/// not matter.
impl<T: PartialEq> PartialEq for RingQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingQueue<T> {}

impl<'a, T> IntoIterator for &'a RingQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RingQueue[len={}, start={}, end={}, count={}]",
            self.capacity(),
            self.start,
            self.end,
            self.len()
        )?;
        if self.is_empty() {
            return writeln!(f, "Data: empty");
        }
        let data = self
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Data: {}", data)
    }
}
