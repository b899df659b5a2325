use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Locate the `config` directory of a workspace member.
///
/// Binaries may be started either from the workspace root or from the member
/// directory itself; both resolve to `<member>/config`.
pub fn config_directory(member: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(member) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(member).join("config"))
    }
}

/// Load layered settings.
///
/// Sources, lowest precedence first:
/// 1. `<config_dir>/base.yaml` (optional)
/// 2. `<PREFIX>_*` environment variables, `__` separating nested keys
///
/// `list_keys` names the keys whose environment values are comma separated
/// lists (e.g. `APP_CHANNELS=qr,checkout`).
pub fn load_layered<T: DeserializeOwned>(
    config_dir: &Path,
    env_prefix: &str,
    list_keys: &[&str],
) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let mut environment = Environment::with_prefix(env_prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);

    if !list_keys.is_empty() {
        environment = environment.list_separator(",");
        for key in list_keys {
            environment = environment.with_list_parse_key(key);
        }
    }

    let settings = Cfg::builder()
        .add_source(File::from(config_dir.join("base.yaml")).required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}
