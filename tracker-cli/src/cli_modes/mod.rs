mod calendar_mode;
mod cli_mode;
mod read_mode;
mod write_mode;

pub use calendar_mode::calendar_mode;
pub use cli_mode::CliModeResult;
pub use read_mode::{overview_mode, read_mode};
pub use write_mode::write_mode;
