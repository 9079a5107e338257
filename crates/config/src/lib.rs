//! Configuration loading and schema.
//!
//! Config is discovered from `herald.{toml,yaml,yml,json}` in the working
//! directory or under `~/.config/herald/`, with `${ENV_VAR}` substitution
//! applied to the raw text before parsing. A missing file means defaults;
//! herald never writes config.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{clear_config_dir, discover_and_load, load_config, set_config_dir},
    schema::{ChannelOverride, ChannelsConfig, DeliveryPolicy, HeraldConfig, LoggingConfig},
};
