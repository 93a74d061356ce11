use crate::config::{
    Config, ExternalTool, Toolchain, A4_FOUR_UP, DEFAULT_BADGE_TEMPLATE, DEFAULT_IMAGES_DIR,
    DEFAULT_NAME_TOKEN, DEFAULT_TEMPLATES_DIR,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

type ParseResult<T> = std::result::Result<T, String>;

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="badgegen",
          version=&**FULL_VERSION,
          about="Printable name badges and signs from SVG templates",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Name badges, 4-up on A4, for 54 x 90mm badge holders")]
    Badges(BadgesArgs),
    #[clap(about = "Single sign from a sized template")]
    Sign(SignArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct BadgesArgs {
    #[clap(required = true)]
    #[clap(short = 'n')]
    #[clap(long = "names")]
    #[clap(help = "Text file with one name per line")]
    #[clap(value_name = "NAMES")]
    #[arg(value_parser = check_file_exists)]
    pub names_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output document (.pdf or .ps)")]
    #[clap(value_name = "OUTPUT")]
    #[clap(default_value = "badges.pdf")]
    #[arg(value_parser = check_output_path)]
    pub output_path: PathBuf,

    #[clap(long = "template")]
    #[clap(value_name = "TEMPLATE")]
    #[clap(help = "Badge template, as a path or a file name in the templates directory")]
    #[clap(default_value = DEFAULT_BADGE_TEMPLATE)]
    pub template: String,

    #[clap(long = "name-token")]
    #[clap(value_name = "TOKEN")]
    #[clap(help = "Text in the badge template that is replaced with each name")]
    #[clap(default_value = DEFAULT_NAME_TOKEN)]
    #[arg(value_parser = check_nonempty)]
    pub name_token: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct SignArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "size")]
    #[clap(help = "Sign size, selects {SIZE}-with-image.svg or {SIZE}-without-image.svg")]
    #[clap(value_name = "SIZE")]
    #[arg(value_parser = check_nonempty)]
    pub size: String,

    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "message")]
    #[clap(help = "Message printed on the sign")]
    #[clap(value_name = "MESSAGE")]
    pub message: String,

    #[clap(short = 'i')]
    #[clap(long = "image")]
    #[clap(help = "Image path, or a file name in the images directory")]
    #[clap(value_name = "IMAGE")]
    pub image: Option<String>,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output document (.pdf or .ps)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[clap(help_heading("Advanced"))]
    #[clap(long = "templates-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help = "Directory searched for templates")]
    #[clap(default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "images-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help = "Directory searched for images given by name")]
    #[clap(default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "scratch-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help = "Where intermediate files are created [default: system temp dir]")]
    #[arg(value_parser = check_dir_exists)]
    pub scratch_dir: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "escape-xml")]
    #[clap(help = "Escape XML markup characters in substituted text")]
    pub escape_xml: bool,

    #[clap(help_heading("Tools"))]
    #[clap(long = "inkscape")]
    #[clap(value_name = "COMMAND")]
    #[clap(help = "SVG converter command")]
    #[clap(default_value = "inkscape")]
    #[arg(value_parser = parse_tool)]
    pub converter: ExternalTool,

    #[clap(help_heading("Tools"))]
    #[clap(long = "psmerge")]
    #[clap(value_name = "COMMAND")]
    #[clap(default_value = "psmerge")]
    #[arg(value_parser = parse_tool)]
    pub psmerge: ExternalTool,

    #[clap(help_heading("Tools"))]
    #[clap(long = "psnup")]
    #[clap(value_name = "COMMAND")]
    #[clap(default_value = "psnup")]
    #[arg(value_parser = parse_tool)]
    pub psnup: ExternalTool,

    #[clap(help_heading("Tools"))]
    #[clap(long = "ps2pdf")]
    #[clap(value_name = "COMMAND")]
    #[clap(default_value = "ps2pdf")]
    #[arg(value_parser = parse_tool)]
    pub ps2pdf: ExternalTool,
}

impl ConfigArgs {
    pub fn to_config(&self) -> Config {
        Config {
            templates_dir: self.templates_dir.clone(),
            images_dir: self.images_dir.clone(),
            tools: Toolchain {
                converter: self.converter.clone(),
                psmerge: self.psmerge.clone(),
                psnup: self.psnup.clone(),
                ps2pdf: self.ps2pdf.clone(),
            },
            geometry: A4_FOUR_UP,
            scratch_root: self.scratch_dir.clone(),
            escape_xml: self.escape_xml,
        }
    }
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match level {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_output_path(s: &str) -> ParseResult<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") || ext.eq_ignore_ascii_case("ps") => {
            Ok(path.to_path_buf())
        }
        _ => Err("Output must have an extension of .pdf or .ps".to_string()),
    }
}

fn check_file_exists(s: &str) -> ParseResult<PathBuf> {
    let path = Path::new(s);
    if !path.is_file() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_dir_exists(s: &str) -> ParseResult<PathBuf> {
    let path = Path::new(s);
    if !path.is_dir() {
        Err(format!("Directory does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_nonempty(s: &str) -> ParseResult<String> {
    if s.trim().is_empty() {
        Err("Value cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn parse_tool(s: &str) -> ParseResult<ExternalTool> {
    s.parse()
}
