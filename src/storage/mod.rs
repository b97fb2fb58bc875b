mod queue_file;

pub use queue_file::QueueFile;
