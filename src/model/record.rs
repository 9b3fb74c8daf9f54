use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;
use std::net::IpAddr;
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Address family tag, serialized as the leading token of every output line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr)]
pub enum Family {
    #[strum(serialize = "IPV4")]
    V4,
    #[strum(serialize = "IPV6")]
    V6,
}

impl Family {
    pub fn of(address: &IpAddr) -> Family {
        match address {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Longest prefix length the family's address size allows.
    pub fn max_prefix_len(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Human readable name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Family::V4 => "IPv4",
            Family::V6 => "IPv6",
        }
    }
}

/// A routed block as written in the input. The address text is kept verbatim,
/// so `2001:db8::` and `2001:0db8::` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefixKey {
    pub address: String,
    pub prefix_len: u8,
}

impl Display for PrefixKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

/// One accepted input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub family: Family,
    pub address: String,
    pub network: IpAddr,
    pub prefix_len: u8,
    pub asn: u32,
}

impl Announcement {
    pub fn key(&self) -> PrefixKey {
        PrefixKey {
            address: self.address.clone(),
            prefix_len: self.prefix_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRecord {
    pub key: PrefixKey,
    pub network: IpAddr,
    /// Input line that introduced the key, used to locate later faults.
    pub first_line: usize,
    asns: Vec<u32>,
}

impl PrefixRecord {
    pub fn new(key: PrefixKey, network: IpAddr, first_line: usize, asn: u32) -> Self {
        PrefixRecord {
            key,
            network,
            first_line,
            asns: vec![asn],
        }
    }

    pub fn push_asn(&mut self, asn: u32) {
        self.asns.push(asn);
    }

    /// ASNs in insertion order, duplicates included. Never empty.
    pub fn asns(&self) -> &[u32] {
        &self.asns
    }
}

/// Per-family mapping from prefix to its aggregated ASNs.
#[derive(Debug, Default)]
pub struct FamilyTable {
    records: HashMap<PrefixKey, PrefixRecord>,
}

impl FamilyTable {
    pub fn new() -> Self {
        FamilyTable {
            records: HashMap::new(),
        }
    }

    pub fn add(&mut self, announcement: &Announcement, line: usize) {
        match self.records.entry(announcement.key()) {
            Entry::Occupied(mut occupied) => occupied.get_mut().push_asn(announcement.asn),
            Entry::Vacant(vacant) => {
                let key = vacant.key().clone();
                vacant.insert(PrefixRecord::new(key, announcement.network, line, announcement.asn));
            }
        }
    }

    pub fn get(&self, key: &PrefixKey) -> Option<&PrefixRecord> {
        self.records.get(key)
    }

    /// Records ordered by the line that introduced them.
    pub fn records_in_input_order(&self) -> Vec<&PrefixRecord> {
        let mut records: Vec<&PrefixRecord> = self.records.values().collect();
        records.sort_by_key(|record| record.first_line);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
