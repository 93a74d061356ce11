use super::{exit_reason, log_captured};
use crate::config::ExternalTool;
use crate::error::Error;
use crate::utils::Result;
use std::path::Path;
use std::process::Stdio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    PostScript,
}

impl OutputFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "ps" => Some(OutputFormat::PostScript),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::PostScript => "ps",
        }
    }

    /// Converter flags: area-clipped export, plus text-to-path for PostScript.
    pub fn converter_flags(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Pdf => &["-A"],
            OutputFormat::PostScript => &["-T", "-P"],
        }
    }
}

/// Runs the SVG converter: `<tool> <flags> <output> <input>`.
pub struct Converter<'a> {
    tool: &'a ExternalTool,
}

impl<'a> Converter<'a> {
    pub fn new(tool: &'a ExternalTool) -> Self {
        Self { tool }
    }

    pub fn convert(&self, input: &Path, output: &Path, format: OutputFormat) -> Result<()> {
        log::debug!(
            "Converting {} to {}",
            input.display(),
            format.extension().to_uppercase()
        );
        let result = self
            .tool
            .command_with(format.converter_flags())
            .arg(output)
            .arg(input)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Render {
                input: input.to_path_buf(),
                reason: format!("failed to run {}: {}", self.tool.program, e),
            })?;

        if result.status.success() {
            log_captured(&self.tool.program, &result);
            Ok(())
        } else {
            let reason = exit_reason(&self.tool.program, &result);
            log::error!("{}", reason);
            Err(Error::Render {
                input: input.to_path_buf(),
                reason,
            })
        }
    }
}
