//! Error types.

/// The donation could not be dispatched.
///
/// This is the only failure a donation attempt can hit.
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationError {
    /// The selected amount is outside the configured bounds.
    OutOfRangeAmount {
        /// The rejected amount.
        amount: u32,
        /// The configured minimum.
        min: u32,
        /// The configured maximum.
        max: u32,
        /// The configured currency label.
        currency: String,
    },
}

impl std::fmt::Display for DonationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonationError::OutOfRangeAmount {
                min, max, currency, ..
            } => {
                write!(f, "Enter an amount from {} to {} {}", min, max, currency)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DonationError {}

/// A general error for configuration and backend failures.
#[derive(Debug)]
pub enum Error {
    /// The widget configuration is malformed or inconsistent.
    Config {
        /// What is wrong.
        msg: String,
    },
    /// The backend (usually the DOM) failed.
    BackendError {
        /// What failed.
        msg: String,
        /// The underlying error, if any.
        err: Option<Box<dyn std::error::Error>>,
    },
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config { msg: msg.into() }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config { msg } => {
                write!(f, "Invalid widget config: {}", msg)?;
            }
            Error::BackendError { msg, err } => {
                if let Some(err) = err {
                    write!(f, "Backend error: {}: {}", msg, err)?;
                } else {
                    write!(f, "Backend error: {}", msg)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::BackendError { err: Some(err), .. } => Some(err.as_ref()),
            _ => None,
        }
    }
}
