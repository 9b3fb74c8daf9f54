use crate::model::error::ConvertError;
use crate::model::record::PrefixRecord;
use std::net::{IpAddr, Ipv6Addr};

const NIBBLE_BITS: u8 = 4;
const NIBBLES_PER_ADDRESS: usize = 32;
const MAX_NIBBLE: u8 = 0xF;

/// The 32 nibbles of an IPv6 address, most significant first.
pub fn nibbles(address: &Ipv6Addr) -> [u8; NIBBLES_PER_ADDRESS] {
    let mut nibbles = [0u8; NIBBLES_PER_ADDRESS];

    for (index, segment) in address.segments().iter().enumerate() {
        nibbles[index * 4] = ((segment >> 12) & 0xF) as u8;
        nibbles[index * 4 + 1] = ((segment >> 8) & 0xF) as u8;
        nibbles[index * 4 + 2] = ((segment >> 4) & 0xF) as u8;
        nibbles[index * 4 + 3] = (segment & 0xF) as u8;
    }

    nibbles
}

/// Reverse name of an address relative to `ip6.arpa`, e.g.
/// 2001:db8::1 -> 1.0.0.0. ... .8.b.d.0.1.0.0.2
pub fn relative_reverse_name(address: &Ipv6Addr) -> String {
    reversed_labels(&nibbles(address))
}

fn reversed_labels(nibbles: &[u8]) -> String {
    nibbles
        .iter()
        .rev()
        .map(|nibble| format!("{:x}", nibble))
        .collect::<Vec<String>>()
        .join(".")
}

/// Owner name, relative to the zone origin, covering a reverse subtree.
/// An empty entry is the origin itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReverseEntry(String);

impl ReverseEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the relative reverse name of an address falls under this entry.
    pub fn covers(&self, relative_name: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }

        relative_name
            .strip_suffix(self.0.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Wildcard owner form written to the zone data.
    pub fn wildcard(&self) -> String {
        if self.0.is_empty() {
            "*".to_string()
        } else {
            format!("*.{}", self.0)
        }
    }
}

/// Entries that together match every address inside `address/prefix_len`.
///
/// Nibble-aligned prefixes need a single entry. Otherwise the nibble after the
/// covered ones has its top `prefix_len % 4` bits fixed, and one entry is
/// produced for each of the `2^(4 - prefix_len % 4)` values of its free bits,
/// counting up from the nibble's value in `address`. The address is expected
/// to have those free bits cleared; counting past `f` is an integrity fault.
///
/// `line` and `prefix` only serve to describe such a fault.
pub fn expand_prefix(address: &Ipv6Addr, prefix_len: u8, line: usize, prefix: &str) -> Result<Vec<ReverseEntry>, ConvertError> {
    let nibbles = nibbles(address);

    let full_nibbles = (prefix_len / NIBBLE_BITS) as usize;
    let remainder = prefix_len % NIBBLE_BITS;

    let suffix = reversed_labels(&nibbles[..full_nibbles]);

    if remainder == 0 {
        return Ok(vec![ReverseEntry(suffix)]);
    }

    let base_digit = nibbles[full_nibbles];
    let candidates = 1u8 << (NIBBLE_BITS - remainder);

    let mut entries = Vec::with_capacity(candidates as usize);

    for offset in 0..candidates {
        let digit = base_digit + offset;

        if digit > MAX_NIBBLE {
            return Err(ConvertError::Integrity {
                line,
                prefix: prefix.to_string(),
                nibble_index: full_nibbles,
                digit,
            });
        }

        let entry = if suffix.is_empty() {
            format!("{:x}", digit)
        } else {
            format!("{:x}.{}", digit, suffix)
        };

        entries.push(ReverseEntry(entry));
    }

    Ok(entries)
}

/// Expansion of an aggregated IPv6 record. IPv4 records yield no entries.
pub fn expand_record(record: &PrefixRecord) -> Result<Vec<ReverseEntry>, ConvertError> {
    match record.network {
        IpAddr::V6(ipv6) => expand_prefix(&ipv6, record.key.prefix_len, record.first_line, &record.key.to_string()),
        IpAddr::V4(_) => Ok(Vec::new()),
    }
}
