use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_BADGE_TEMPLATE: &str = "name_badge.svg";
pub const DEFAULT_NAME_TOKEN: &str = "Mr Bee";

/// A configured external program: the executable plus any leading arguments
/// that precede the adapter's own flags (e.g. `flatpak run org.inkscape.Inkscape`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalTool {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    pub fn command_with<I, S>(&self, extra: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command();
        cmd.args(extra);
        cmd
    }
}

impl FromStr for ExternalTool {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or("Tool command cannot be an empty string".to_string())?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub converter: ExternalTool,
    pub psmerge: ExternalTool,
    pub psnup: ExternalTool,
    pub ps2pdf: ExternalTool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            converter: ExternalTool::new("inkscape"),
            psmerge: ExternalTool::new("psmerge"),
            psnup: ExternalTool::new("psnup"),
            ps2pdf: ExternalTool::new("ps2pdf"),
        }
    }
}

/// Sheet layout handed to `psnup`. Sized for the 54 x 90mm badge holders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGeometry {
    pub per_page: u8,
    pub item_width: &'static str,
    pub item_height: &'static str,
    pub margin: &'static str,
    pub paper: &'static str,
}

pub const A4_FOUR_UP: PageGeometry = PageGeometry {
    per_page: 4,
    item_width: "114.89mm",
    item_height: "77.89mm",
    margin: "0cm",
    paper: "a4",
};

impl PageGeometry {
    pub fn psnup_flags(&self) -> Vec<String> {
        vec![
            "-r".to_string(),
            format!("-W{}", self.item_width),
            format!("-H{}", self.item_height),
            format!("-m{}", self.margin),
            format!("-p{}", self.paper),
            format!("-{}", self.per_page),
            "-s1".to_string(),
        ]
    }
}

/// Process-wide settings, passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub templates_dir: PathBuf,
    pub images_dir: PathBuf,
    pub tools: Toolchain,
    pub geometry: PageGeometry,
    /// Parent for per-run scratch directories; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
    pub escape_xml: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            tools: Toolchain::default(),
            geometry: A4_FOUR_UP,
            scratch_root: None,
            escape_xml: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_from_str_splits_leading_args() {
        let tool: ExternalTool = "flatpak run org.inkscape.Inkscape".parse().unwrap();
        assert_eq!(tool.program, "flatpak");
        assert_eq!(tool.args, vec!["run", "org.inkscape.Inkscape"]);
    }

    #[test]
    fn test_tool_from_str_rejects_blank() {
        assert!("   ".parse::<ExternalTool>().is_err());
    }

    #[test]
    fn test_psnup_flags_for_default_geometry() {
        assert_eq!(
            A4_FOUR_UP.psnup_flags(),
            vec!["-r", "-W114.89mm", "-H77.89mm", "-m0cm", "-pa4", "-4", "-s1"]
        );
    }
}
