pub mod convert;
pub mod split;

use std::io::{BufRead, Write};

pub trait Task {
    fn name(&self) -> &str;
    fn run(&self, input: &mut dyn BufRead, output: &mut dyn Write) -> anyhow::Result<()>;
}
