use super::{load_template, output_format, scratch_dir, write_svg};
use crate::config::Config;
use crate::error::{AssetKind, Error};
use crate::render::{ensure_available, Converter, Imposer, OutputFormat};
use crate::template::{escape_xml, substitute, Placeholder, Resolver};
use crate::utils::{publish, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One badge: a single name rendered from the badge template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeItem {
    pub name: String,
}

/// Generates a sheet of name badges.
///
/// Every name becomes its own PostScript item; the items are imposed N-up and
/// the merged document is converted to PDF unless the output asks for `.ps`.
pub struct BadgeJob<'a> {
    config: &'a Config,
    template: String,
    name_token: String,
}

impl<'a> BadgeJob<'a> {
    pub fn new(config: &'a Config, template: &str, name_token: &str) -> Self {
        Self {
            config,
            template: template.to_string(),
            name_token: name_token.to_string(),
        }
    }

    /// Returns the number of badges written to `output`.
    pub fn run(&self, names: &[String], output: &Path) -> Result<usize> {
        if names.is_empty() {
            return Err(Error::InputValidation(
                "No names to generate badges for".to_string(),
            ));
        }
        let format = output_format(output)?;

        let template_path =
            Resolver::new(AssetKind::Template, &self.config.templates_dir).resolve(&self.template)?;
        let template = load_template(&template_path, &self.name_token)?;

        let tools = &self.config.tools;
        ensure_available("converter", &tools.converter)?;
        ensure_available("psmerge", &tools.psmerge)?;
        ensure_available("psnup", &tools.psnup)?;
        if format == OutputFormat::Pdf {
            ensure_available("ps2pdf", &tools.ps2pdf)?;
        }

        let scratch = scratch_dir(self.config)?;
        let items: Vec<BadgeItem> = names
            .iter()
            .map(|name| BadgeItem { name: name.clone() })
            .collect();

        let mut rendered = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let ps_path = scratch.path().join(format!("badge-{:05}.ps", index));
            self.render_item(&template, item, &scratch, &ps_path)?;
            rendered.push(ps_path);
        }
        log::info!("Rendered {} badge(s) from {}", rendered.len(), template_path.display());

        let imposer = Imposer::new(tools, &self.config.geometry);
        let merged = scratch.path().join("merged.ps");
        imposer.impose(&rendered, &merged)?;

        match format {
            OutputFormat::PostScript => publish(&merged, output)?,
            OutputFormat::Pdf => {
                let staged: PathBuf = scratch.path().join("badges.pdf");
                imposer.to_pdf(&merged, &staged)?;
                publish(&staged, output)?;
            }
        }
        Ok(items.len())
    }

    fn render_item(
        &self,
        template: &str,
        item: &BadgeItem,
        scratch: &TempDir,
        ps_path: &Path,
    ) -> Result<()> {
        log::debug!("Rendering badge for '{}'", item.name);
        let name = if self.config.escape_xml {
            escape_xml(&item.name)
        } else {
            item.name.clone()
        };
        let svg = substitute(
            template,
            &[Placeholder::literal(&self.name_token, Some(name.as_str()))],
        );
        let svg_file = write_svg(scratch, &svg)?;
        Converter::new(&self.config.tools.converter).convert(
            svg_file.path(),
            ps_path,
            OutputFormat::PostScript,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExternalTool, Toolchain, DEFAULT_BADGE_TEMPLATE, DEFAULT_NAME_TOKEN};
    use crate::test_utils::fake_tool;
    use std::fs;

    const COPY_LAST_TO_SECOND_LAST: &str =
        "for a; do prev=$cur; cur=$a; done\ncp \"$cur\" \"$prev\"";

    struct Fixture {
        root: TempDir,
        config: Config,
    }

    impl Fixture {
        fn new(template: &str, converter_body: &str) -> Self {
            let root = TempDir::new().unwrap();
            let templates = root.path().join("templates");
            let scratch = root.path().join("scratch");
            let bin = root.path().join("bin");
            for dir in [&templates, &scratch, &bin] {
                fs::create_dir(dir).unwrap();
            }
            fs::write(templates.join(DEFAULT_BADGE_TEMPLATE), template).unwrap();

            let config = Config {
                templates_dir: templates,
                images_dir: root.path().join("images"),
                tools: Toolchain {
                    converter: fake_tool(&bin, "converter", converter_body),
                    psmerge: fake_tool(&bin, "psmerge", "cat \"$@\""),
                    psnup: fake_tool(&bin, "psnup", "cat"),
                    ps2pdf: fake_tool(&bin, "ps2pdf", "cp \"$2\" \"$3\""),
                },
                scratch_root: Some(scratch),
                ..Config::default()
            };
            Self { root, config }
        }

        fn job(&self) -> BadgeJob<'_> {
            BadgeJob::new(&self.config, DEFAULT_BADGE_TEMPLATE, DEFAULT_NAME_TOKEN)
        }

        fn scratch_entries(&self) -> usize {
            let root = self.config.scratch_root.as_ref().unwrap();
            fs::read_dir(root).unwrap().count()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_names_rejected_before_rendering() {
        let config = Config {
            tools: Toolchain {
                converter: ExternalTool::new("badgegen-no-such-converter"),
                ..Toolchain::default()
            },
            ..Config::default()
        };
        let job = BadgeJob::new(&config, DEFAULT_BADGE_TEMPLATE, DEFAULT_NAME_TOKEN);
        assert!(matches!(
            job.run(&[], Path::new("badges.pdf")),
            Err(Error::InputValidation(_))
        ));
    }

    #[test]
    fn test_missing_template_is_resolution_failure() {
        let root = TempDir::new().unwrap();
        let config = Config {
            templates_dir: root.path().to_path_buf(),
            ..Config::default()
        };
        let job = BadgeJob::new(&config, "no_such_badge.svg", DEFAULT_NAME_TOKEN);
        match job.run(&names(&["Ada"]), &root.path().join("out.pdf")) {
            Err(Error::Resolution { kind, name }) => {
                assert_eq!(kind, AssetKind::Template);
                assert_eq!(name, "no_such_badge.svg");
            }
            other => panic!("expected resolution failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_duplicate_names_are_independent_items_in_order() {
        let fixture = Fixture::new("<text>Mr Bee</text>\n", COPY_LAST_TO_SECOND_LAST);
        let output = fixture.root.path().join("badges.pdf");

        let count = fixture
            .job()
            .run(&names(&["Ada", "Grace", "Ada"]), &output)
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<text>Ada</text>\n<text>Grace</text>\n<text>Ada</text>\n"
        );
        assert_eq!(fixture.scratch_entries(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_postscript_output_skips_pdf_conversion() {
        let mut fixture = Fixture::new("<text>Mr Bee</text>\n", COPY_LAST_TO_SECOND_LAST);
        fixture.config.tools.ps2pdf = fake_tool(fixture.root.path(), "ps2pdf-broken", "exit 1");
        let output = fixture.root.path().join("badges.ps");

        fixture.job().run(&names(&["Ada", "Ada"]), &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<text>Ada</text>\n<text>Ada</text>\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_escape_xml_applies_to_names() {
        let mut fixture = Fixture::new("<text>Mr Bee</text>\n", COPY_LAST_TO_SECOND_LAST);
        fixture.config.escape_xml = true;
        let output = fixture.root.path().join("badges.ps");

        fixture.job().run(&names(&["Tom & Jerry"]), &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<text>Tom &amp; Jerry</text>\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_render_failure_leaves_no_temporaries_or_output() {
        // Fails on the second badge, after the first has been rendered.
        let fixture = Fixture::new(
            "<text>Mr Bee</text>\n",
            &format!(
                "grep -q Grace \"$(for a; do last=$a; done; echo $last)\" && exit 2\n{}",
                COPY_LAST_TO_SECOND_LAST
            ),
        );
        let output = fixture.root.path().join("badges.pdf");

        let result = fixture.job().run(&names(&["Ada", "Grace", "Linus"]), &output);

        assert!(matches!(result, Err(Error::Render { .. })));
        assert!(!output.exists());
        assert_eq!(fixture.scratch_entries(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_imposition_failure_leaves_no_temporaries() {
        let mut fixture = Fixture::new("<text>Mr Bee</text>\n", COPY_LAST_TO_SECOND_LAST);
        fixture.config.tools.psnup = fake_tool(fixture.root.path(), "psnup-broken", "cat >/dev/null\nexit 1");
        let output = fixture.root.path().join("badges.pdf");

        let result = fixture.job().run(&names(&["Ada"]), &output);

        assert!(matches!(result, Err(Error::Imposition(_))));
        assert!(!output.exists());
        assert_eq!(fixture.scratch_entries(), 0);
    }

    #[test]
    fn test_unknown_tool_reported_before_rendering() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(DEFAULT_BADGE_TEMPLATE), "<text>Mr Bee</text>").unwrap();
        let config = Config {
            templates_dir: root.path().to_path_buf(),
            tools: Toolchain {
                converter: ExternalTool::new("badgegen-no-such-converter"),
                ..Toolchain::default()
            },
            scratch_root: Some(root.path().to_path_buf()),
            ..Config::default()
        };
        let job = BadgeJob::new(&config, DEFAULT_BADGE_TEMPLATE, DEFAULT_NAME_TOKEN);
        match job.run(&names(&["Ada"]), &root.path().join("badges.pdf")) {
            Err(Error::ToolNotFound { tool, program }) => {
                assert_eq!(tool, "converter");
                assert_eq!(program, "badgegen-no-such-converter");
            }
            other => panic!("expected missing tool, got {:?}", other),
        }
    }
}
