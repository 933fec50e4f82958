mod executor;
mod loader;
mod utils;

pub use executor::*;
pub use loader::{ProgramLineParser, ProgramLoader};
pub use utils::{format_hex_dump, format_hex_dump_with_width};

pub type AppResult<T> = anyhow::Result<T>;
