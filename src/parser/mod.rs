use crate::model::error::ConvertError;
use crate::model::record::{Announcement, Family};
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::LazyLock;

// 2001:db8::/32 64500
static IPV6_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Fa-f:]+)/([0-9]+) +([0-9]+) *$").expect("Invalid IPv6 line regex")
});

// 192.0.2.0/24 64500
static IPV4_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)/([0-9]+) +([0-9]+) *$").expect("Invalid IPv4 line regex")
});

/// Longest prefix lengths that are aggregated. Longer, still valid, prefixes
/// are counted and dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrefixLimits {
    pub ipv4_max: u8,
    pub ipv6_max: u8,
}

impl PrefixLimits {
    pub fn max_for(&self, family: Family) -> u8 {
        match family {
            Family::V4 => self.ipv4_max,
            Family::V6 => self.ipv6_max,
        }
    }
}

impl Default for PrefixLimits {
    fn default() -> Self {
        PrefixLimits {
            ipv4_max: 24,
            ipv6_max: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Announcement(Announcement),
    Blank,
    OutOfRange(Family),
}

fn parse_prefix_len(raw: &str, family: Family, line: usize) -> Result<u8, ConvertError> {
    // Digit strings too long for u8 are just as out of range as /129
    raw.parse::<u8>()
        .ok()
        .filter(|len| *len <= family.max_prefix_len())
        .ok_or_else(|| ConvertError::InvalidPrefix {
            line,
            family,
            prefix_len: raw.to_string(),
        })
}

fn parse_asn(raw: &str, line: usize) -> Result<u32, ConvertError> {
    raw.parse::<u32>().map_err(|_| ConvertError::InvalidAsn {
        line,
        asn: raw.to_string(),
    })
}

fn parse_address(raw: &str, family: Family, line: usize) -> Result<IpAddr, ConvertError> {
    let parsed = match family {
        Family::V4 => Ipv4Addr::from_str(raw).map(IpAddr::V4),
        Family::V6 => Ipv6Addr::from_str(raw).map(IpAddr::V6),
    };

    parsed.map_err(|e| ConvertError::InvalidAddress {
        line,
        family,
        address: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Classifies one newline-stripped input line. `line` is 1-based.
pub fn parse_line(content: &str, line: usize, limits: &PrefixLimits) -> Result<ParsedLine, ConvertError> {
    let (family, captures) = if let Some(captures) = IPV6_LINE.captures(content) {
        (Family::V6, captures)
    } else if let Some(captures) = IPV4_LINE.captures(content) {
        (Family::V4, captures)
    } else if content.trim().is_empty() {
        return Ok(ParsedLine::Blank);
    } else {
        return Err(ConvertError::MalformedLine {
            line,
            content: content.to_string(),
        });
    };

    let address = &captures[1];

    let network = parse_address(address, family, line)?;
    let prefix_len = parse_prefix_len(&captures[2], family, line)?;
    let asn = parse_asn(&captures[3], line)?;

    if prefix_len > limits.max_for(family) {
        return Ok(ParsedLine::OutOfRange(family));
    }

    Ok(ParsedLine::Announcement(Announcement {
        family,
        address: address.to_string(),
        network,
        prefix_len,
        asn,
    }))
}
