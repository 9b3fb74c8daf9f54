use crate::aggregator::Aggregator;
use crate::formatter::rdata::compose_rdata;
use crate::formatter::reverse::expand_record;
use crate::model::error::ConvertError;
use crate::model::record::{Family, FamilyTable};
use crate::AppConfig;
use anyhow::{bail, Context};
use std::io::BufRead;
use std::str::FromStr;
use tracing::info;

fn push_line(buffer: &mut String, family: Family, payload: &str) {
    buffer.push_str(family.as_ref());
    buffer.push('\t');
    buffer.push_str(payload);
    buffer.push('\n');
}

fn generate_header(buffer: &mut String, family: Family, dataset: &str, ttl: u32) {
    /*
    IPV6	;
    IPV6	$DATASET dnset @
    IPV6	$TTL 3600
    IPV6	;
    */
    push_line(buffer, family, ";");
    push_line(buffer, family, &format!("$DATASET {} @", dataset));
    push_line(buffer, family, &format!("$TTL {}", ttl));
    push_line(buffer, family, ";");
}

fn generate_ipv6_records(buffer: &mut String, table: &FamilyTable, config: &AppConfig) -> Result<usize, ConvertError> {
    // :64500 | 2001:db8::/33 | NA | NA | NA
    // *.0.8.b.d.0.1.0.0.2
    // ...
    // *.7.8.b.d.0.1.0.0.2
    let mut lines = 0;

    // Input order, so the reported integrity fault is the earliest one.
    for record in table.records_in_input_order() {
        let prefix = record.key.to_string();
        let entries = expand_record(record)?;

        let rdata = compose_rdata(record.asns(), &prefix, config.max_rdata_len);
        push_line(buffer, Family::V6, &format!(":{}", rdata));

        for entry in &entries {
            push_line(buffer, Family::V6, &entry.wildcard());
        }

        lines += entries.len() + 1;
    }

    Ok(lines)
}

fn generate_ipv4_records(buffer: &mut String, table: &FamilyTable, config: &AppConfig) -> usize {
    // 192.0.2.0/24:127.0.0.2:64500 | 192.0.2.0/24 | NA | NA | NA
    for record in table.records_in_input_order() {
        let prefix = record.key.to_string();
        let rdata = compose_rdata(record.asns(), &prefix, config.max_rdata_len);

        push_line(buffer, Family::V4, &format!("{}:{}:{}", prefix, config.ipv4_answer, rdata));
    }

    table.len()
}

/// Renders the whole family-tagged stream. Nothing is returned unless every
/// record could be produced.
pub fn format_zone_data(aggregator: &Aggregator, config: &AppConfig) -> Result<String, ConvertError> {
    let mut buffer = String::new();

    generate_header(&mut buffer, Family::V6, &config.ipv6_dataset, config.ttl);
    generate_header(&mut buffer, Family::V4, &config.ipv4_dataset, config.ttl);

    let ipv6_lines = generate_ipv6_records(&mut buffer, aggregator.ipv6(), config)?;
    let ipv4_lines = generate_ipv4_records(&mut buffer, aggregator.ipv4(), config);

    info!("Rendered {} IPv6 and {} IPv4 zone data lines.", ipv6_lines, ipv4_lines);

    Ok(buffer)
}

/// Per-family zone data with the family token stripped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitZoneData {
    pub ipv4: String,
    pub ipv6: String,
}

impl SplitZoneData {
    fn buffer_mut(&mut self, family: Family) -> &mut String {
        match family {
            Family::V4 => &mut self.ipv4,
            Family::V6 => &mut self.ipv6,
        }
    }
}

/// Splits a tagged stream back into one payload per family. Every family must
/// be present, since a complete stream always carries both headers.
pub fn split_zone_data(reader: impl BufRead) -> anyhow::Result<SplitZoneData> {
    let mut output = SplitZoneData::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;

        let (tag, payload) = match line.split_once('\t') {
            Some(parts) => parts,
            None => bail!("line {}: missing family tag in {:?}", line_number, line),
        };

        let family = Family::from_str(tag)
            .with_context(|| format!("line {}: unknown family tag {:?}", line_number, tag))?;

        let buffer = output.buffer_mut(family);
        buffer.push_str(payload);
        buffer.push('\n');
    }

    if output.ipv6.is_empty() {
        bail!("No {} lines in zone data stream", Family::V6);
    }

    if output.ipv4.is_empty() {
        bail!("No {} lines in zone data stream", Family::V4);
    }

    Ok(output)
}
