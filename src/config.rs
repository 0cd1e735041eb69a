/// Runtime configuration for a [`TableClient`](crate::TableClient).
///
/// The batch capacity is deliberately *not* configurable: the store imposes
/// it as a hard ceiling, see [`BATCH_CAPACITY`](crate::batch::BATCH_CAPACITY).
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Interval between `table_exists` polls while `clear_table` waits for a
    /// dropped table to disappear. The poll loop itself is unbounded; wrap
    /// the call in a timeout if the store can wedge.
    pub table_clear_poll_interval_ms: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            table_clear_poll_interval_ms: 1_000,
        }
    }
}

impl SinkConfig {
    pub fn with_table_clear_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.table_clear_poll_interval_ms = interval_ms;
        self
    }
}
