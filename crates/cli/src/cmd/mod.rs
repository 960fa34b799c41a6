mod common;
mod diff;
mod pending;
mod update;

pub use common::Source;
pub use diff::cmd_diff;
pub use pending::cmd_pending;
pub use update::{UpdateArgs, cmd_update};
