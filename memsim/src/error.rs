use std::fmt;

/// Failures reported by the tables.
///
/// None of these are fatal: the engine turns each one into a result with
/// `success == false` and the `Display` text as message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A block id outside `[0, block_count)`.
    BlockOutOfRange { block_id: usize, block_count: usize },
    /// Swap-out of an identifier that is not resident.
    NotInRam(String),
    /// Swap-in of an identifier that is not in swap space.
    NotInSwap(String),
    /// Registering as resident an identifier that is currently swapped out.
    AlreadySwapped(String),
    /// The process id counter cannot advance any further.
    ProcessIdsExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BlockOutOfRange { block_id, block_count } => {
                write!(f, "Block {} is out of range (0..{})", block_id, block_count)
            }
            Error::NotInRam(id) => write!(f, "❌ Process {} not found in RAM!", id),
            Error::NotInSwap(id) => write!(f, "❌ Process {} not found in swap space!", id),
            Error::AlreadySwapped(id) => {
                write!(f, "Process {} is in swap space and cannot be added to RAM", id)
            }
            Error::ProcessIdsExhausted => write!(f, "No process ids left"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_messages_name_the_process() {
        assert_eq!(
            Error::NotInRam("P9".into()).to_string(),
            "❌ Process P9 not found in RAM!"
        );
        assert_eq!(
            Error::NotInSwap("P9".into()).to_string(),
            "❌ Process P9 not found in swap space!"
        );
    }

    #[test]
    fn out_of_range_mentions_bounds() {
        let err = Error::BlockOutOfRange { block_id: 150, block_count: 100 };
        assert_eq!(err.to_string(), "Block 150 is out of range (0..100)");
    }
}
