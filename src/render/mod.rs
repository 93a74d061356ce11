/*!
Adapters around the external programs that do the actual rendering: an
Inkscape-compatible SVG converter, `psmerge`/`psnup` for N-up imposition and
`ps2pdf`. Nothing in here reads or writes document bytes itself.
*/

mod converter;
mod impose;

pub use converter::{Converter, OutputFormat};
pub use impose::Imposer;

use crate::config::ExternalTool;
use crate::error::Error;
use crate::utils::Result;
use std::process::Output;

/// Fails with `ToolNotFound` unless `tool.program` can be located on PATH.
pub fn ensure_available(name: &'static str, tool: &ExternalTool) -> Result<()> {
    match which::which(&tool.program) {
        Ok(path) => {
            log::debug!("Using {} at {}", name, path.display());
            Ok(())
        }
        Err(_) => Err(Error::ToolNotFound {
            tool: name,
            program: tool.program.clone(),
        }),
    }
}

fn log_captured(name: &str, output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        log::debug!("{} stdout: {}", name, stdout.trim());
    }
    if !stderr.trim().is_empty() {
        log::debug!("{} stderr: {}", name, stderr.trim());
    }
}

fn exit_reason(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output
        .status
        .code()
        .map_or("signal".to_string(), |c| c.to_string());
    if stderr.trim().is_empty() {
        format!("{} exited with status {}", name, code)
    } else {
        format!("{} exited with status {}: {}", name, code, stderr.trim())
    }
}
