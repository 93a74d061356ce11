mod resolve;
mod substitute;

pub use resolve::Resolver;
pub use substitute::{escape_xml, substitute, Placeholder};
