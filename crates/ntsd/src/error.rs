use thiserror::Error;

/// Errors returned while marshaling or unmarshaling security structures.
///
/// Nested structures wrap the failure of their inner fields in [`Error::Field`],
/// so the path to a failing record reads outside-in, for example
/// `dacl: ace[3]: identity: input truncated`. Use [`Error::root_cause`] to get the
/// innermost error.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer is shorter than the structure being read requires.
    #[error("input truncated: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// A security descriptor offset points past the end of the buffer.
    #[error("{field} offset {offset:#x} is out of bounds (descriptor length {len:#x})")]
    OffsetOutOfBounds {
        field: &'static str,
        offset: u32,
        len: usize,
    },

    /// The ACE header type is not one of the known ACE types.
    #[error("unknown ACE type {0:#04x}")]
    UnknownAceType(u8),

    /// A string could not be parsed (SID, GUID, right names).
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A value cannot be represented on the wire.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// An error in a nested field, annotated with the name of the field.
    #[error("{field}: {source}")]
    Field { field: String, source: Box<Error> },

    /// Any other decoding or encoding failure reported by binrw.
    #[error("binrw error: {0}")]
    BinRw(String),
}

impl Error {
    /// Wraps `self` as the failure of `field`.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Error::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping all [`Error::Field`] layers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the field path leading to the root cause, outermost first.
    pub fn field_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Error::Field { field, source } = current {
            path.push(field.as_str());
            current = source;
        }
        path
    }
}

impl From<binrw::Error> for Error {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Backtrace(backtrace) => Self::from(*backtrace.error),
            binrw::Error::Custom { err, .. } => match err.downcast::<Error>() {
                Ok(err) => *err,
                Err(err) => Error::BinRw(err.to_string()),
            },
            err => Error::BinRw(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_and_path() {
        let err = Error::TruncatedInput {
            needed: 8,
            available: 3,
        }
        .in_field("identity")
        .in_field("ace[2]")
        .in_field("dacl");

        assert!(matches!(
            err.root_cause(),
            Error::TruncatedInput {
                needed: 8,
                available: 3
            }
        ));
        assert_eq!(err.field_path(), vec!["dacl", "ace[2]", "identity"]);
        assert_eq!(
            err.to_string(),
            "dacl: ace[2]: identity: input truncated: needed 8 bytes, 3 available"
        );
    }

    #[test]
    fn test_custom_binrw_error_is_unwrapped() {
        let inner = binrw::Error::Custom {
            pos: 4,
            err: Box::new(Error::UnknownAceType(0x42)),
        };
        assert!(matches!(Error::from(inner), Error::UnknownAceType(0x42)));
    }
}
