use std::io::{self, Write};

use serde::Serialize;

use crate::application::convert::ConversionMode;

/// One row of the `modes` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeDescriptor {
    pub mode: ConversionMode,
    pub function: &'static str,
    pub entry_point: &'static str,
}

impl From<ConversionMode> for ModeDescriptor {
    fn from(mode: ConversionMode) -> Self {
        Self {
            mode,
            function: mode.function_name(),
            entry_point: mode.entry_point(),
        }
    }
}

pub fn describe_modes() -> Vec<ModeDescriptor> {
    ConversionMode::ALL.into_iter().map(ModeDescriptor::from).collect()
}

/// Write the listing as aligned `name entry_point` lines.
pub fn write_text(out: &mut impl Write) -> io::Result<()> {
    for descriptor in describe_modes() {
        writeln!(
            out,
            "{:<20}{}",
            descriptor.mode.as_str(),
            descriptor.entry_point
        )?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &describe_modes())?;
    writeln!(out)
}
