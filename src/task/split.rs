use crate::formatter::zone_data::split_zone_data;
use crate::io::write_zone_file;
use crate::task::Task;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Tagged zone data on the input, one file per family.
pub struct SplitTask {
    ipv4_path: PathBuf,
    ipv6_path: PathBuf,
}

impl SplitTask {
    pub fn new(ipv4_path: PathBuf, ipv6_path: PathBuf) -> Self {
        Self { ipv4_path, ipv6_path }
    }
}

impl Task for SplitTask {
    fn name(&self) -> &str {
        "Split zone data by family"
    }

    fn run(&self, input: &mut dyn BufRead, _output: &mut dyn Write) -> anyhow::Result<()> {
        // Validate the whole stream before touching either file
        let split = split_zone_data(input)?;

        write_zone_file(&self.ipv4_path, &split.ipv4)?;
        write_zone_file(&self.ipv6_path, &split.ipv6)?;

        Ok(())
    }
}
