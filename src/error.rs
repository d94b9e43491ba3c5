use alloc::string::String;
use core::fmt;

/// Error type for the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A configuration field was outside of its domain.
    InvalidConfig { field: &'static str, value: String },
    /// The input could not be parsed as a base 10 numeral.
    InvalidNumber(String),
    /// A finite, non-zero dividend was divided by zero using a checked operation.
    DivisionByZero,
    /// An operation argument (e.g. decimal places) was outside of its domain.
    InvalidArgument { name: &'static str, value: String },
}

impl Error {
    pub(crate) fn invalid_config(field: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_argument(name: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidConfig { field, ref value } => {
                write!(f, "Invalid configuration: {} cannot be {}", field, value)
            }
            Self::InvalidNumber(ref input) => write!(f, "Invalid decimal: {}", input),
            Self::DivisionByZero => f.pad("Division by zero"),
            Self::InvalidArgument { name, ref value } => {
                write!(f, "Invalid argument: {} cannot be {}", name, value)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_names_the_offending_config_field() {
        let err = Error::invalid_config("precision", 0);
        assert_eq!(
            err,
            Error::InvalidConfig {
                field: "precision",
                value: "0".to_string()
            }
        );
        assert_eq!("Invalid configuration: precision cannot be 0", err.to_string());
    }

    #[test]
    fn it_formats_number_errors() {
        let err = Error::InvalidNumber("1.2.3".to_string());
        assert_eq!("Invalid decimal: 1.2.3", err.to_string());
        assert_eq!("Division by zero", Error::DivisionByZero.to_string());
    }
}
