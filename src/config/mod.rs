use derive_with::With;

/// Options used by [`crate::storage::QueueFile`] when persisting a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, With)]
pub struct PersistConfig {
    /// Size in bytes of the buffered reader/writer wrapped around the file.
    pub io_buffer_size: usize,
    /// Whether `save` should fsync the file before returning.
    pub sync_on_save: bool,
}

impl Default for PersistConfig {
    fn default() -> Self {
        PersistConfig {
            io_buffer_size: 8 * 1024,
            sync_on_save: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PersistConfig;

    #[test]
    fn builder_overrides_defaults() {
        let config = PersistConfig::default()
            .with_sync_on_save(true)
            .with_io_buffer_size(64usize);
        assert!(config.sync_on_save);
        assert_eq!(config.io_buffer_size, 64);
        assert!(!PersistConfig::default().sync_on_save);
    }
}
