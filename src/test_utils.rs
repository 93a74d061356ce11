use crate::config::ExternalTool;
use std::fs;
use std::path::Path;

/// Writes `body` to a shell script and returns a tool that runs it via `sh`,
/// so the script never needs to be executable itself.
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> ExternalTool {
    let script = dir.join(format!("{}.sh", name));
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    ExternalTool {
        program: "sh".to_string(),
        args: vec![script.to_string_lossy().into_owned()],
    }
}
