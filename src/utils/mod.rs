mod io_utils;
mod util;

pub use io_utils::{names_from_reader, publish, read_names};
pub use util::{handle_error_and_exit, Result};
