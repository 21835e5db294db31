use std::path::PathBuf;

const APP_DIR: &str = "depboard";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/depboard/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        // A `data` directory next to the executable makes the board portable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let portable_data = exe_dir.join("data");
                if portable_data.exists() {
                    return portable_data;
                }
            }
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                if exe_dir.join("config.toml").exists() {
                    return exe_dir.to_path_buf();
                }
            }
        }
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Directory the path prompt starts in when nothing else is configured.
pub fn default_schedule_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_log_file() -> PathBuf {
    data_dir().join("depboard.log")
}

/// Expand a leading `~/` to the home directory. Other input is returned as-is.
pub fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirs_are_namespaced() {
        assert!(data_dir().ends_with(APP_DIR) || data_dir().ends_with("data"));
        assert!(default_log_file().ends_with("depboard.log"));
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/etc/a.csv"), PathBuf::from("/etc/a.csv"));
        assert_eq!(expand_home("rel/a.csv"), PathBuf::from("rel/a.csv"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.csv"), home.join("a.csv"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn unix_config_dir_is_xdg_style() {
        assert!(config_dir().ends_with(".config/depboard"));
    }
}
