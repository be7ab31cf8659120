use std::path::PathBuf;

pub(crate) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

pub(crate) fn default_tmp_path() -> String {
    default_base_dir()
        .join("tmp")
        .to_string_lossy()
        .into_owned()
}

fn default_base_dir() -> PathBuf {
    user_home_dir().map_or_else(
        || PathBuf::from(".wildfire-replay"),
        |home| home.join(".wildfire-replay"),
    )
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
    }

    std::env::var_os("HOME").map(PathBuf::from)
}
