use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("GIT_VERSION");
pub const PROJECT_VERSION_HASH: &str = env!("GIT_HASH");

/// Overrides the config directory. Must be an absolute path without `..`.
pub const ENV_CONFIG_DIR_OVERRIDE: &str = "PROMPTLINE_CONFIG_DIR";

pub fn print_header() {
    println!("{PROJECT_NAME} {PROJECT_VERSION} ({PROJECT_VERSION_HASH})");
}

/// Returns `~/.local/share/promptline` (or platform equivalent), creating it
/// owner-only if needed. Logs live here.
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow!("Unable to determine data directory. Ensure XDG_DATA_HOME or HOME is set")
    })?;

    let dir = data_dir.join(PROJECT_NAME);
    create_secure_directory(&dir)?;
    Ok(dir)
}

/// Returns the directory holding `config.json`, creating it owner-only if needed.
///
/// Uses `PROMPTLINE_CONFIG_DIR` when set, `dirs::config_dir()/promptline` otherwise.
pub fn project_config_dir() -> Result<PathBuf> {
    let dir = match env::var(ENV_CONFIG_DIR_OVERRIDE) {
        Ok(value) => {
            let path = validate_override(&value)?;
            info!(
                "Using config directory override from {ENV_CONFIG_DIR_OVERRIDE}: {}",
                path.display()
            );
            path
        }
        Err(_) => {
            let config_dir = dirs::config_dir().ok_or_else(|| {
                anyhow!("Unable to determine config directory. Ensure XDG_CONFIG_HOME or HOME is set")
            })?;
            config_dir.join(PROJECT_NAME)
        }
    };

    create_secure_directory(&dir)?;
    Ok(dir)
}

fn validate_override(value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(value);

    if !path.is_absolute() {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} must be an absolute path: {value}");
    }
    if path.components().any(|c| c == Component::ParentDir) {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} contains parent directory references: {value}");
    }

    Ok(path)
}

/// Creates `dir` (and parents) with mode 0700, fixing the mode if it already exists.
#[cfg(unix)]
pub(crate) fn create_secure_directory(dir: &Path) -> Result<()> {
    use std::fs::DirBuilder;
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
        .with_context(|| format!("Unable to set permissions on directory: {}", dir.display()))?;

    debug!("Directory secured with 0700 permissions: {}", dir.display());
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn create_secure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;
    Ok(())
}
