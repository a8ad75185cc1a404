use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub fresh: bool,
    pub store: Option<PathBuf>,
    pub key: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            fresh: self.fresh || other.fresh,
            store: other.store.clone().or_else(|| self.store.clone()),
            key: other.key.clone().or_else(|| self.key.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markdraft").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markdraft")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markdraft").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markdraft")
                .join("config");
        }
    }

    PathBuf::from(".markdraftrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markdraftrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markdraft defaults (saved with --save)".to_string());
    if flags.fresh {
        lines.push("--fresh".to_string());
    }
    if let Some(store) = &flags.store {
        lines.push(format!("--store {}", store.display()));
    }
    if let Some(key) = &flags.key {
        lines.push(format!("--key {key}"));
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw argument tokens, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--fresh" {
            flags.fresh = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued(&mut flags, name, value);
        } else if is_valued(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_valued(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_valued(name: &str) -> bool {
    matches!(name, "--store" | "--key" | "--log-file")
}

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--store" => flags.store = Some(PathBuf::from(value)),
        "--key" => flags.key = Some(value.to_string()),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
