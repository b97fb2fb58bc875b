use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::config::PersistConfig;
use crate::error::QueueResult;
use crate::queue::RingQueue;

/// A queue persisted as a text file at a fixed path.
#[derive(Debug, Clone)]
pub struct QueueFile {
    path: PathBuf,
    config: PersistConfig,
}

impl QueueFile {
    pub fn new(path: impl Into<PathBuf>, config: PersistConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Creates or truncates the file and writes `queue` to it.
    pub fn save<T: Display>(&self, queue: &RingQueue<T>) -> QueueResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::with_capacity(self.config.io_buffer_size, file);
        queue.save_to(&mut writer)?;
        writer.flush()?;
        if self.config.sync_on_save {
            writer.get_ref().sync_all()?;
        }
        debug!(
            "saved {} queued elements to {}",
            queue.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Replaces `queue` with the file contents. If the file cannot be opened
    /// the queue is untouched; any later failure leaves it empty.
    pub fn load<T>(&self, queue: &mut RingQueue<T>) -> QueueResult<()>
    where
        T: FromStr,
        T::Err: Display,
    {
        let file = File::open(&self.path)?;
        queue.load_from(BufReader::with_capacity(self.config.io_buffer_size, file))?;
        debug!(
            "loaded {} queued elements from {}",
            queue.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::QueueFile;
    use crate::config::PersistConfig;
    use crate::error::QueueError;
    use crate::queue::RingQueue;
    use tempfile::TempDir;

    #[test]
    fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = QueueFile::new(
            temp_dir.path().join("queue.txt"),
            PersistConfig::default().with_sync_on_save(true),
        );
        assert!(!file.exists());

        let mut q1 = RingQueue::with_capacity(5).unwrap();
        for v in [101, 202, 303] {
            q1.push(v).unwrap();
        }
        file.save(&q1).unwrap();
        assert!(file.exists());
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "3\n101\n202\n303\n"
        );

        let mut q2: RingQueue<i32> = RingQueue::new();
        file.load(&mut q2).unwrap();
        assert_eq!(q2.len(), q1.len());
        assert_eq!(q2.capacity(), 4);
        assert_eq!(q1.drain(), q2.drain());
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = QueueFile::new(temp_dir.path().join("absent.txt"), PersistConfig::default());
        let mut q: RingQueue<i32> = RingQueue::with_capacity(3).unwrap();
        q.push(1).unwrap();
        assert!(matches!(file.load(&mut q), Err(QueueError::Io(_))));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn corrupt_file_empties_queue() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.txt");
        std::fs::write(&path, "3\n1\n2\n").unwrap();
        let file = QueueFile::new(path, PersistConfig::default().with_io_buffer_size(4usize));

        let mut q: RingQueue<i32> = RingQueue::with_capacity(3).unwrap();
        q.push(9).unwrap();
        assert!(matches!(file.load(&mut q), Err(QueueError::Format(_))));
        assert_eq!(q.capacity(), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn empty_queue_saves() {
        let temp_dir = TempDir::new().unwrap();
        let file = QueueFile::new(temp_dir.path().join("empty.txt"), PersistConfig::default());
        let q: RingQueue<i32> = RingQueue::with_capacity(3).unwrap();
        file.save(&q).unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "0\n");
    }
}
