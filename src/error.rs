#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Committed fields do not form a representable date and time.
    #[error("Invalid time fields: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
