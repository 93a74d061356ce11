/*!
Printable name badges and signs from SVG templates.

Badges: one SVG per name, converted to PostScript, imposed N-up onto A4
sheets and converted to a single PDF. Signs: one template chosen by size and
whether an image is shown, rendered straight to PDF.
*/

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod template;
pub mod utils;
pub mod workflows;

pub use error::Error;

#[cfg(test)]
mod test_utils;
