use crate::error::Error;
use crate::utils::Result;
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// Reads one name per line, trimmed; blank lines are skipped.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)
        .map_err(|e| Error::io(format!("File {}", path.display()), e))?;
    let names = names_from_reader(std::io::BufReader::new(file))?;
    if names.is_empty() {
        return Err(Error::InputValidation(format!(
            "No names found in '{}'",
            path.display()
        )));
    }
    Ok(names)
}

pub fn names_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| Error::io(format!("Error reading line {}", line_number + 1), e))?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Copies a finished scratch artifact to its final location.
pub fn publish(staged: &Path, output: &Path) -> Result<()> {
    fs::copy(staged, output).map_err(|e| {
        Error::io(
            format!("Writing {} to {}", staged.display(), output.display()),
            e,
        )
    })?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
