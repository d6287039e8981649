//! Layered configuration: `.env`, an optional `configuration` file, then
//! `APP__`-prefixed environment variables (`APP__DATABASE__URL` sets
//! `database.url`).

use crate::error::AppError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::de::DeserializeOwned;

pub const ENV_PREFIX: &str = "APP";

/// Base builder with the file and environment layers in precedence order.
pub fn builder() -> ConfigBuilder<DefaultState> {
    Config::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
}

/// Load `T` from the standard layers.
pub fn load<T: DeserializeOwned>() -> Result<T, AppError> {
    dotenvy::dotenv().ok();
    from_builder(builder())
}

/// Build and deserialize an arbitrary builder.
pub fn from_builder<T: DeserializeOwned>(
    builder: ConfigBuilder<DefaultState>,
) -> Result<T, AppError> {
    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}
