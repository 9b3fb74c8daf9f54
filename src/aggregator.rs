use crate::model::error::ConvertError;
use crate::model::record::{Announcement, Family, FamilyTable};
use crate::parser::{parse_line, ParsedLine, PrefixLimits};
use tracing::debug;

/// Lines dropped because their prefix is longer than the supported maximum.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IgnoredCounts {
    pub ipv4: usize,
    pub ipv6: usize,
}

impl IgnoredCounts {
    pub fn record(&mut self, family: Family) {
        match family {
            Family::V4 => self.ipv4 += 1,
            Family::V6 => self.ipv6 += 1,
        }
    }

    /// The single end-of-run warning, if anything was dropped.
    pub fn summary(&self, limits: &PrefixLimits) -> Option<String> {
        match (self.ipv4, self.ipv6) {
            (0, 0) => None,
            (ipv4, 0) => Some(format!(
                "Ignored {} IPv4 prefixes longer than /{}",
                ipv4, limits.ipv4_max
            )),
            (0, ipv6) => Some(format!(
                "Ignored {} IPv6 prefixes longer than /{}",
                ipv6, limits.ipv6_max
            )),
            (ipv4, ipv6) => Some(format!(
                "Ignored {} IPv4 prefixes longer than /{} and {} IPv6 prefixes longer than /{}",
                ipv4, limits.ipv4_max, ipv6, limits.ipv6_max
            )),
        }
    }
}

/// Run-scoped aggregation state: one table per family plus the ignored
/// counters. Fed line by line, read after the input is exhausted.
#[derive(Debug)]
pub struct Aggregator {
    limits: PrefixLimits,
    ipv4: FamilyTable,
    ipv6: FamilyTable,
    ignored: IgnoredCounts,
    accepted_lines: usize,
}

impl Aggregator {
    pub fn new(limits: PrefixLimits) -> Self {
        Aggregator {
            limits,
            ipv4: FamilyTable::new(),
            ipv6: FamilyTable::new(),
            ignored: IgnoredCounts::default(),
            accepted_lines: 0,
        }
    }

    pub fn add(&mut self, announcement: &Announcement, line: usize) {
        let table = match announcement.family {
            Family::V4 => &mut self.ipv4,
            Family::V6 => &mut self.ipv6,
        };

        table.add(announcement, line);
        self.accepted_lines += 1;
    }

    /// Parses and aggregates one input line. The first invalid line aborts.
    pub fn feed_line(&mut self, content: &str, line: usize) -> Result<(), ConvertError> {
        match parse_line(content, line, &self.limits)? {
            ParsedLine::Announcement(announcement) => self.add(&announcement, line),
            ParsedLine::Blank => {}
            ParsedLine::OutOfRange(family) => {
                debug!("Line {}: {} prefix beyond /{} ignored", line, family.label(), self.limits.max_for(family));
                self.ignored.record(family);
            }
        }

        Ok(())
    }

    pub fn ipv4(&self) -> &FamilyTable {
        &self.ipv4
    }

    pub fn ipv6(&self) -> &FamilyTable {
        &self.ipv6
    }

    pub fn ignored(&self) -> IgnoredCounts {
        self.ignored
    }

    pub fn accepted_lines(&self) -> usize {
        self.accepted_lines
    }

    pub fn summary(&self) -> Option<String> {
        self.ignored.summary(&self.limits)
    }
}
