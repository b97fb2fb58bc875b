mod iter;
mod ring_queue;

pub use iter::Iter;
pub use ring_queue::RingQueue;
