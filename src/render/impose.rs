use super::{exit_reason, log_captured};
use crate::config::{PageGeometry, Toolchain};
use crate::error::Error;
use crate::utils::Result;
use itertools::Itertools;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

/// Tiles single-item PostScript files N-up onto sheets and converts the
/// result to PDF. Geometry is fixed for the lifetime of the imposer.
pub struct Imposer<'a> {
    tools: &'a Toolchain,
    geometry: &'a PageGeometry,
}

impl<'a> Imposer<'a> {
    pub fn new(tools: &'a Toolchain, geometry: &'a PageGeometry) -> Self {
        Self { tools, geometry }
    }

    /// `psmerge <inputs> | psnup <geometry> > output`, preserving input order.
    pub fn impose(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::Imposition(
                "at least one PostScript input is required".to_string(),
            ));
        }
        log::debug!(
            "Imposing {} item(s) {}-up: {}",
            inputs.len(),
            self.geometry.per_page,
            inputs.iter().map(|p| p.display()).join(", ")
        );

        let sink = File::create(output)
            .map_err(|e| Error::io(format!("Creating {}", output.display()), e))?;

        // psmerge stderr goes to a file: nothing drains a pipe while psnup runs.
        let mut merge_stderr = tempfile::tempfile()
            .map_err(|e| Error::io("Creating psmerge stderr capture", e))?;
        let merge_stderr_sink = merge_stderr
            .try_clone()
            .map_err(|e| Error::io("Creating psmerge stderr capture", e))?;

        let psmerge = &self.tools.psmerge;
        let mut merge = psmerge
            .command_with(inputs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::from(merge_stderr_sink))
            .spawn()
            .map_err(|e| {
                Error::Imposition(format!("failed to run {}: {}", psmerge.program, e))
            })?;

        let merged = merge.stdout.take().ok_or_else(|| {
            Error::Imposition(format!("{} stdout was not captured", psmerge.program))
        })?;

        let psnup = &self.tools.psnup;
        let nup = psnup
            .command_with(self.geometry.psnup_flags())
            .stdin(Stdio::from(merged))
            .stdout(Stdio::from(sink))
            .stderr(Stdio::piped())
            .spawn();

        // Reap psmerge before reporting a psnup spawn failure.
        let nup = match nup {
            Ok(child) => child,
            Err(e) => {
                let _ = merge.kill();
                let _ = merge.wait();
                return Err(Error::Imposition(format!(
                    "failed to run {}: {}",
                    psnup.program, e
                )));
            }
        };

        let nup_output = nup.wait_with_output().map_err(|e| {
            Error::Imposition(format!("waiting for {}: {}", psnup.program, e))
        })?;
        let merge_status = merge.wait().map_err(|e| {
            Error::Imposition(format!("waiting for {}: {}", psmerge.program, e))
        })?;
        let mut stderr = Vec::new();
        merge_stderr
            .seek(SeekFrom::Start(0))
            .and_then(|_| merge_stderr.read_to_end(&mut stderr))
            .map_err(|e| Error::io(format!("Reading {} stderr", psmerge.program), e))?;
        let merge_output = Output {
            status: merge_status,
            stdout: Vec::new(),
            stderr,
        };

        for (program, result) in [(&psmerge.program, &merge_output), (&psnup.program, &nup_output)] {
            if !result.status.success() {
                let reason = exit_reason(program, result);
                log::error!("{}", reason);
                return Err(Error::Imposition(reason));
            }
            log_captured(program, result);
        }
        Ok(())
    }

    /// `ps2pdf -dPDFX input output`.
    pub fn to_pdf(&self, input: &Path, output: &Path) -> Result<()> {
        let ps2pdf = &self.tools.ps2pdf;
        log::debug!("Converting {} to PDF/X", input.display());
        let result = ps2pdf
            .command_with(["-dPDFX"])
            .arg(input)
            .arg(output)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::Imposition(format!("failed to run {}: {}", ps2pdf.program, e)))?;

        if result.status.success() {
            log_captured(&ps2pdf.program, &result);
            Ok(())
        } else {
            let reason = exit_reason(&ps2pdf.program, &result);
            log::error!("{}", reason);
            Err(Error::Imposition(reason))
        }
    }
}
