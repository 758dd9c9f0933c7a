mod args;
mod run;

pub use args::{RunOptions, parse_args};
pub use run::{report_error, run};
