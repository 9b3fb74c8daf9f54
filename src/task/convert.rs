use crate::formatter::zone_data::format_zone_data;
use crate::io::read_announcements;
use crate::task::Task;
use crate::AppConfig;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::warn;

/// Announcement table on the input, tagged zone data on the output.
pub struct ConvertTask {
    config: AppConfig,
}

impl ConvertTask {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl Task for ConvertTask {
    fn name(&self) -> &str {
        "Convert announcements to zone data"
    }

    fn run(&self, input: &mut dyn BufRead, output: &mut dyn Write) -> anyhow::Result<()> {
        let aggregator = read_announcements(input, self.config.prefix_limits())?;

        // Rendered in full before the first byte goes out
        let zone_data = format_zone_data(&aggregator, &self.config)?;

        output
            .write_all(zone_data.as_bytes())
            .context("Failed to write zone data")?;
        output.flush().context("Failed to flush zone data")?;

        if let Some(summary) = aggregator.summary() {
            warn!("{}", summary);
        }

        Ok(())
    }
}
