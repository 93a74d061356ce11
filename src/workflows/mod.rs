pub mod badges;
pub mod sign;

use crate::config::Config;
use crate::error::Error;
use crate::render::OutputFormat;
use crate::utils::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Per-run directory holding every intermediate file; removed on drop.
fn scratch_dir(config: &Config) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("badgegen-");
    let dir = match &config.scratch_root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    };
    let dir = dir.map_err(|e| Error::io("Creating scratch directory", e))?;
    log::debug!("Scratch directory {}", dir.path().display());
    Ok(dir)
}

fn output_format(output: &Path) -> Result<OutputFormat> {
    OutputFormat::from_path(output).ok_or_else(|| {
        Error::InputValidation(format!(
            "Output {} must have an extension of .pdf or .ps",
            output.display()
        ))
    })
}

fn load_template(path: &Path, required_token: &str) -> Result<String> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Reading template {}", path.display()), e))?;
    if !text.contains(required_token) {
        return Err(Error::SubstitutionPrecondition(format!(
            "template {} has no '{}' placeholder",
            path.display(),
            required_token
        )));
    }
    Ok(text)
}

fn write_svg(scratch: &TempDir, svg: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("item-")
        .suffix(".svg")
        .tempfile_in(scratch.path())
        .map_err(|e| Error::io("Creating temporary SVG", e))?;
    file.write_all(svg.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| Error::io(format!("Writing {}", file.path().display()), e))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_is_removed_on_drop() {
        let root = TempDir::new().unwrap();
        let config = Config {
            scratch_root: Some(root.path().to_path_buf()),
            ..Config::default()
        };
        let scratch = scratch_dir(&config).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.starts_with(root.path()));
        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_output_format_rejects_unknown_extension() {
        assert!(matches!(
            output_format(Path::new("badges.png")),
            Err(Error::InputValidation(_))
        ));
        assert_eq!(output_format(Path::new("sign.PDF")).unwrap(), OutputFormat::Pdf);
    }

    #[test]
    fn test_shipped_templates_carry_placeholders() {
        let templates = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        load_template(&templates.join("name_badge.svg"), crate::config::DEFAULT_NAME_TOKEN)
            .unwrap();
        for size in ["A4", "A3"] {
            for layout in [sign::Layout::WithImage, sign::Layout::WithoutImage] {
                let text = load_template(&templates.join(layout.template_name(size)), "$$__MESSAGE__$$")
                    .unwrap();
                assert_eq!(text.contains("$$__IMAGE__$$"), layout == sign::Layout::WithImage);
            }
        }
    }

    #[test]
    fn test_load_template_requires_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("name_badge.svg");
        fs::write(&path, "<svg><text>Someone</text></svg>").unwrap();
        assert!(matches!(
            load_template(&path, "Mr Bee"),
            Err(Error::SubstitutionPrecondition(_))
        ));
    }
}
