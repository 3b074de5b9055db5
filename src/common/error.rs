use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // QR builder
    DataTooLong,
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskingPattern,
    UnsupportedCharset,

    // Capacity table
    MissingTableEntry,
    MalformedTable,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // QR builder
            Self::DataTooLong => "Data too long",
            Self::InvalidVersion => "Invalid version",
            Self::InvalidECLevel => "Invalid error correction level",
            Self::InvalidMaskingPattern => "Invalid masking pattern",
            Self::UnsupportedCharset => "Unsupported character set",

            // Capacity table
            Self::MissingTableEntry => "Capacity table is missing an entry",
            Self::MalformedTable => "Capacity table entry is malformed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
