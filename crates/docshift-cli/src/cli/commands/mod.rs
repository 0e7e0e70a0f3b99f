//! CLI command handlers, one file per command.

mod cache;
mod rewrite;
mod send;
mod serve;
mod status;
mod toggle;
mod verify;

pub use cache::{run_cache_clear, run_cache_list};
pub use rewrite::run_rewrite;
pub use send::run_send;
pub use serve::run_serve;
pub use status::run_status;
pub use toggle::run_set_enabled;
pub use verify::run_verify;
