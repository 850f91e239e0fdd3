pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The path does not resolve to any entry in the archive.
    NotFound,
    /// The operation does not apply to the resolved entry,
    /// e.g. listing a regular file or opening a directory for reading.
    InvalidOperation,
    /// The underlying byte stream failed or an archive entry was malformed.
    IoError(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotFound => write!(f, "entry not found"),
            Error::InvalidOperation => write!(f, "invalid operation for this entry"),
            Error::IoError(ref err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}
