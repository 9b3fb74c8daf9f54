use tracing::debug;

pub const DEFAULT_MAX_RDATA_LEN: usize = 250;

/// `"| "`, a fully written IPv6 address with `/128`, then `" | NA | NA | NA"`.
const LONGEST_SUFFIX_LEN: usize = 2 + 39 + 4 + 15;

/// Smallest limit under which every prefix still carries one 10 digit ASN.
pub const MIN_MAX_RDATA_LEN: usize = LONGEST_SUFFIX_LEN + 11;

/// Builds `"<asn> <asn> ... | <prefix> | NA | NA | NA"`.
///
/// ASNs are sorted numerically and added while the whole record stays within
/// `max_len`. The first ASN that does not fit ends the list, even if a later
/// one would. `max_len` must be at least [`MIN_MAX_RDATA_LEN`] for the first
/// ASN to be guaranteed a place.
pub fn compose_rdata(asns: &[u32], prefix: &str, max_len: usize) -> String {
    let mut sorted = asns.to_vec();
    sorted.sort();

    let suffix = format!("| {} | NA | NA | NA", prefix);

    let mut buffer = String::new();
    let mut included = 0;

    for asn in &sorted {
        let token = asn.to_string();

        if buffer.len() + token.len() + 1 + suffix.len() > max_len {
            break;
        }

        buffer.push_str(&token);
        buffer.push(' ');
        included += 1;
    }

    if included < sorted.len() {
        debug!("Truncated ASN list for {} to {} of {} entries", prefix, included, sorted.len());
    }

    buffer.push_str(&suffix);

    buffer
}
