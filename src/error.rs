use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The trip carries values the page cannot be laid out from (non-finite numbers).
    InvalidTrip(String),
    Pdf(String),
    Archive(zip::result::ZipError),
    NothingSelected,
    /// Every trip in a batch failed to render.
    EmptyArchive { failed: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidTrip(msg) => write!(f, "Invalid trip: {msg}"),
            Error::Pdf(msg) => write!(f, "PDF generation failed: {msg}"),
            Error::Archive(e) => write!(f, "Could not build ZIP archive: {e}"),
            Error::NothingSelected => write!(f, "No trips selected for export"),
            Error::EmptyArchive { failed } => write!(
                f,
                "None of the {failed} selected trip sheets could be generated; try downloading fewer files"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Archive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Archive(e)
    }
}
