//! Relay configuration: BaseConfig (Telegram + log) + source/target routing + pipeline settings.
//! Everything is read from env; `.env` files are loaded by [`load_env_file`].

mod base;
mod env;
mod profiles;
mod relay_config;


pub use base::BaseConfig;
pub use env::load_env_file;
pub use profiles::load_pipeline_config;
pub use relay_config::RelayConfig;
