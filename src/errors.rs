use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{periods} bit-periods of {period:?} do not fit in a Duration")]
    DurationOverflow { periods: u64, period: Duration },
    #[error("Failed to read the monotonic clock: {0}")]
    Clock(#[from] nix::Error),
}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::Clock(errno) => errno.into(),
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
