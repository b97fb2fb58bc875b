use std::fmt::Display;
use std::io::{BufRead, ErrorKind, Lines, Write};
use std::str::FromStr;

use crate::error::{QueueError, QueueResult};
use crate::queue::RingQueue;

/// Line-oriented text format: the element count on the first line, then one
/// element per line, oldest first. Elements are written with `Display` and
/// read back with `FromStr` from the line minus its terminator, so a value
/// whose text spans several lines does not survive a round trip.
pub struct TextCodec;

impl TextCodec {
    pub fn encode<T: Display, W: Write>(queue: &RingQueue<T>, mut writer: W) -> QueueResult<()> {
        writeln!(writer, "{}", queue.len())?;
        for item in queue.iter() {
            writeln!(writer, "{}", item)?;
        }
        Ok(())
    }

    pub fn encode_to_string<T: Display>(queue: &RingQueue<T>) -> QueueResult<String> {
        let mut bytes = Vec::new();
        Self::encode(queue, &mut bytes)?;
        String::from_utf8(bytes).map_err(|e| QueueError::Format(e.to_string()))
    }

    /// Reads a queue holding exactly the encoded elements, sized one slot
    /// larger than the element count.
    pub fn decode<T, R>(reader: R) -> QueueResult<RingQueue<T>>
    where
        T: FromStr,
        T::Err: Display,
        R: BufRead,
    {
        let mut lines = reader.lines();
        let header = next_line(&mut lines, "element count")?;
        let header = header.trim();
        let count = header
            .parse::<i64>()
            .map_err(|e| QueueError::Format(format!("bad element count {:?}: {}", header, e)))?;
        if count < 0 {
            return Err(QueueError::Format(format!(
                "element count {} is negative",
                count
            )));
        }
        if count == 0 {
            return Ok(RingQueue::new());
        }

        let slots = usize::try_from(count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| QueueError::Format(format!("element count {} is too large", count)))?;
        // the header alone does not size the allocation
        let mut values = Vec::new();
        for i in 0..count {
            let line = next_line(&mut lines, "element")?;
            let value = line.parse::<T>().map_err(|e| {
                QueueError::Format(format!("bad element #{} {:?}: {}", i + 1, line, e))
            })?;
            values.push(value);
        }

        let mut queue = RingQueue::with_capacity(slots).map_err(|e| {
            QueueError::Format(format!("element count {} cannot be allocated: {}", count, e))
        })?;
        for value in values {
            queue.push(value)?;
        }
        Ok(queue)
    }

    pub fn decode_str<T>(text: &str) -> QueueResult<RingQueue<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        Self::decode(text.as_bytes())
    }
}

/// Next line without its terminator. Undecodable bytes count as malformed
/// data, not as a stream failure.
fn next_line<R: BufRead>(lines: &mut Lines<R>, what: &str) -> QueueResult<String> {
    match lines.next() {
        Some(Ok(line)) => Ok(line),
        Some(Err(e)) if e.kind() == ErrorKind::InvalidData => Err(QueueError::Format(format!(
            "undecodable {}: {}",
            what, e
        ))),
        Some(Err(e)) => Err(e.into()),
        None => Err(QueueError::Format(format!(
            "unexpected end of input while reading {}",
            what
        ))),
    }
}
