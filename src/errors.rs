use failure::Fail;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
/// An error encountered while encoding or decoding QPack.
///
/// Every variant is terminal for the call that produced it: the encoder leaves no partial
/// output behind, and the decoder never returns a partially decoded value.
pub enum QpackError {
    /// The encoder was handed a kind of value the format cannot represent.
    #[fail(display = "packing type `{}` is not supported with qpack", kind)]
    UnsupportedType {
        /// Name of the offending kind.
        kind: &'static str,
    },

    /// A number or a length does not fit in the widest field the format has.
    #[fail(display = "value out of range: {}", reason)]
    ValueOutOfRange {
        /// What did not fit.
        reason: String,
    },

    /// The input is truncated, over-long or structurally inconsistent.
    #[fail(display = "malformed input at byte {}: {}", pos, reason)]
    MalformedInput {
        /// Offset at which decoding failed.
        pos: usize,
        /// What was wrong.
        reason: String,
    },

    /// The input nests collections deeper than the decoder allows.
    #[fail(display = "nesting depth exceeds {} at byte {}", limit, pos)]
    DepthExceeded {
        /// Offset of the collection that crossed the limit.
        pos: usize,
        /// The configured limit.
        limit: usize,
    },
}

impl QpackError {
    /// Creates a [`QpackError::MalformedInput`].
    ///
    /// # Arguments
    ///
    /// * `pos: usize` - The offset at which the problem was found.
    /// * `reason: S` - The message associated with the error.
    pub fn malformed<S: Into<String>>(pos: usize, reason: S) -> Self {
        QpackError::MalformedInput {
            pos,
            reason: reason.into(),
        }
    }

    /// Creates a [`QpackError::ValueOutOfRange`].
    pub fn out_of_range<S: Into<String>>(reason: S) -> Self {
        QpackError::ValueOutOfRange {
            reason: reason.into(),
        }
    }

    /// Indicates whether this error was raised while decoding.
    pub fn is_decode_error(&self) -> bool {
        match self {
            QpackError::MalformedInput { .. } | QpackError::DepthExceeded { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = QpackError::malformed(3, "buffer ended inside a raw payload");
        assert_eq!(
            e.to_string(),
            "malformed input at byte 3: buffer ended inside a raw payload"
        );
        assert!(e.is_decode_error());

        let e = QpackError::UnsupportedType { kind: "char" };
        assert_eq!(e.to_string(), "packing type `char` is not supported with qpack");
        assert!(!e.is_decode_error());
    }
}
