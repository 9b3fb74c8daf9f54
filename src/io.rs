use crate::aggregator::Aggregator;
use crate::parser::PrefixLimits;
use anyhow::Context;
use std::fmt::Debug;
use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// First pass: every input line is parsed and aggregated before anything is
/// rendered. The first invalid line aborts the whole read.
pub fn read_announcements(reader: &mut dyn BufRead, limits: PrefixLimits) -> anyhow::Result<Aggregator> {
    let mut aggregator = Aggregator::new(limits);
    let mut total_lines = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read input line {}", line_number))?;

        aggregator.feed_line(&line, line_number)?;
        total_lines = line_number;
    }

    info!(
        "Read {} lines, accepted {}: {} IPv4 and {} IPv6 distinct prefixes.",
        total_lines,
        aggregator.accepted_lines(),
        aggregator.ipv4().len(),
        aggregator.ipv6().len()
    );

    Ok(aggregator)
}

pub fn write_zone_file(path: impl AsRef<Path> + Debug, content: &str) -> anyhow::Result<()> {
    let file = fs::File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))?;
    writer.flush().with_context(|| format!("Failed to flush {:?}", path))?;

    info!("Wrote {} lines to {:?}", content.lines().count(), path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::error::ConvertError;
    use std::io::Cursor;

    #[test]
    fn test_read_announcements() {
        let mut input = Cursor::new("192.0.2.0/24 64500\n\n2001:db8::/32 64500\n192.0.2.0/24 64501\n192.0.2.0/28 1\n");
        let aggregator = read_announcements(&mut input, PrefixLimits::default()).unwrap();

        assert_eq!(aggregator.ipv4().len(), 1);
        assert_eq!(aggregator.ipv6().len(), 1);
        assert_eq!(aggregator.ignored().ipv4, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut input = Cursor::new("192.0.2.0/24 64500\r\n2001:db8::/32 64500\r\n");
        let aggregator = read_announcements(&mut input, PrefixLimits::default()).unwrap();

        assert_eq!(aggregator.accepted_lines(), 2);
    }

    #[test]
    fn test_error_keeps_domain_type() {
        let mut input = Cursor::new("192.0.2.0/24 64500\n10.0.0.0/33 64500\n");
        let err = read_announcements(&mut input, PrefixLimits::default()).unwrap_err();

        let convert_error = err.downcast_ref::<ConvertError>().unwrap();
        assert!(matches!(convert_error, ConvertError::InvalidPrefix { line: 2, .. }));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut input = Cursor::new(vec![0xff, 0xfe, b'\n']);
        assert!(read_announcements(&mut input, PrefixLimits::default()).is_err());
    }
}
