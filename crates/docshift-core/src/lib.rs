pub mod config;
pub mod logging;

pub mod affordance;
pub mod control;
pub mod enablement;
pub mod intercept;
pub mod redirect_cache;
pub mod rewrite;
pub mod store;
pub mod verify;
