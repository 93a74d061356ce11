use super::{load_template, output_format, scratch_dir, write_svg};
use crate::config::Config;
use crate::error::{AssetKind, Error};
use crate::render::{ensure_available, Converter};
use crate::template::{escape_xml, substitute, Placeholder, Resolver};
use crate::utils::{publish, Result};
use std::path::{Path, PathBuf};

pub const MESSAGE_KEY: &str = "MESSAGE";
pub const IMAGE_KEY: &str = "IMAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    pub size: String,
    pub message: String,
    /// Path or bare file name looked up in the images directory.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    WithImage,
    WithoutImage,
}

impl Layout {
    pub fn template_name(&self, size: &str) -> String {
        let variant = match self {
            Layout::WithImage => "with-image",
            Layout::WithoutImage => "without-image",
        };
        format!("{}-{}.svg", size, variant)
    }
}

/// Renders a single sign straight to the output document.
pub struct SignJob<'a> {
    config: &'a Config,
}

impl<'a> SignJob<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Returns the template the sign was rendered from.
    pub fn run(&self, request: &SignRequest, output: &Path) -> Result<PathBuf> {
        check_size(&request.size)?;
        let format = output_format(output)?;

        let image = match &request.image {
            Some(name) => Some(self.resolve_image(name)?),
            None => None,
        };
        let layout = if image.is_some() {
            Layout::WithImage
        } else {
            Layout::WithoutImage
        };

        let template_path = Resolver::new(AssetKind::Template, &self.config.templates_dir)
            .resolve_in_default_dir(&layout.template_name(&request.size))?;
        let template = load_template(&template_path, &Placeholder::keyed(MESSAGE_KEY, None).token)?;

        let (message, image_value) = if self.config.escape_xml {
            (
                escape_xml(&request.message),
                image.as_ref().map(|p| escape_xml(&p.to_string_lossy())),
            )
        } else {
            (
                request.message.clone(),
                image.as_ref().map(|p| p.to_string_lossy().into_owned()),
            )
        };
        let svg = substitute(
            &template,
            &[
                Placeholder::keyed(MESSAGE_KEY, Some(message.as_str())),
                Placeholder::keyed(IMAGE_KEY, image_value.as_deref()),
            ],
        );

        ensure_available("converter", &self.config.tools.converter)?;
        let scratch = scratch_dir(self.config)?;
        let svg_file = write_svg(&scratch, &svg)?;
        let staged = scratch.path().join(format!("sign.{}", format.extension()));
        Converter::new(&self.config.tools.converter).convert(svg_file.path(), &staged, format)?;
        publish(&staged, output)?;

        log::info!(
            "Rendered {} sign from {}",
            request.size,
            template_path.display()
        );
        Ok(template_path)
    }

    fn resolve_image(&self, name: &str) -> Result<PathBuf> {
        let path = Resolver::new(AssetKind::Image, &self.config.images_dir).resolve(name)?;
        if !path.is_file() {
            return Err(Error::SubstitutionPrecondition(format!(
                "image {} is not a regular file",
                path.display()
            )));
        }
        Ok(path)
    }
}

fn check_size(size: &str) -> Result<()> {
    if size.trim().is_empty() {
        return Err(Error::InputValidation(
            "Sign size cannot be an empty string".to_string(),
        ));
    }
    if size.contains(['/', '\\']) {
        return Err(Error::InputValidation(format!(
            "Sign size '{}' cannot contain path separators",
            size
        )));
    }
    Ok(())
}
