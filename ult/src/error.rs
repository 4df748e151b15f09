#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CreateError {
    /// All 99 usable slots (1..MAX_THREADS) are occupied.
    TableFull,
}
