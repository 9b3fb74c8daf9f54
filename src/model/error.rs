use crate::model::record::Family;
use std::fmt;
use std::fmt::Display;

/// Fatal conversion faults. Every variant aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    MalformedLine {
        line: usize,
        content: String,
    },
    InvalidAddress {
        line: usize,
        family: Family,
        address: String,
        reason: String,
    },
    InvalidPrefix {
        line: usize,
        family: Family,
        prefix_len: String,
    },
    InvalidAsn {
        line: usize,
        asn: String,
    },
    /// A partially covered nibble enumerated past `f`: the address carries
    /// non-zero bits below its prefix length.
    Integrity {
        line: usize,
        prefix: String,
        nibble_index: usize,
        digit: u8,
    },
}

impl ConvertError {
    pub fn line(&self) -> usize {
        match self {
            ConvertError::MalformedLine { line, .. }
            | ConvertError::InvalidAddress { line, .. }
            | ConvertError::InvalidPrefix { line, .. }
            | ConvertError::InvalidAsn { line, .. }
            | ConvertError::Integrity { line, .. } => *line,
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MalformedLine { line, content } => {
                write!(f, "line {}: malformed line {:?}", line, content)
            }
            ConvertError::InvalidAddress { line, family, address, reason } => {
                write!(f, "line {}: invalid {} address {:?}: {}", line, family.label(), address, reason)
            }
            ConvertError::InvalidPrefix { line, family, prefix_len } => {
                write!(f, "line {}: invalid {} prefix length /{} (allowed 0-{})", line, family.label(), prefix_len, family.max_prefix_len())
            }
            ConvertError::InvalidAsn { line, asn } => {
                write!(f, "line {}: ASN {} does not fit in 32 bits", line, asn)
            }
            ConvertError::Integrity { line, prefix, nibble_index, digit } => {
                write!(
                    f,
                    "line {}: prefix {} has host bits set in nibble {}, expansion reached digit {} (> 15)",
                    line, prefix, nibble_index, digit
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_line_number() {
        let err = ConvertError::InvalidPrefix {
            line: 7,
            family: Family::V4,
            prefix_len: "33".to_string(),
        };

        assert_eq!(err.line(), 7);
        assert_eq!(err.to_string(), "line 7: invalid IPv4 prefix length /33 (allowed 0-32)");
    }

    #[test]
    fn test_malformed_line_quotes_content() {
        let err = ConvertError::MalformedLine {
            line: 3,
            content: "garbage here".to_string(),
        };

        assert_eq!(err.to_string(), "line 3: malformed line \"garbage here\"");
    }

    #[test]
    fn test_integrity_message() {
        let err = ConvertError::Integrity {
            line: 12,
            prefix: "2001:db8:9000::/33".to_string(),
            nibble_index: 8,
            digit: 16,
        };

        assert_eq!(err.line(), 12);
        assert!(err.to_string().contains("2001:db8:9000::/33"));
        assert!(err.to_string().contains("nibble 8"));
    }
}
