//! Auto-detection of the app port from MoonZoon.toml

use std::path::{Path, PathBuf};

pub const DEFAULT_APP_PORT: u16 = 8080;

pub struct PortConfig {
    pub app_port: u16,
    pub source: PortSource,
}

pub enum PortSource {
    /// Read from MoonZoon.toml
    MoonZoonToml(PathBuf),
    /// Default values (no config found)
    Default,
}

impl PortConfig {
    pub fn app_url(&self) -> String {
        format!("http://localhost:{}", self.app_port)
    }
}

/// Find the repo root by searching upward from a starting directory.
/// The MoonZoon.toml next to the workspace Cargo.toml is the marker.
fn find_moonzoon_toml(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join("MoonZoon.toml");
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read app port from MoonZoon.toml (top-level `port = XXXX`)
fn read_app_port(moonzoon_toml: &Path) -> Option<u16> {
    let content = std::fs::read_to_string(moonzoon_toml).ok()?;
    let table: toml::Table = content.parse().ok()?;
    table
        .get("port")
        .and_then(|v| v.as_integer())
        .and_then(|v| u16::try_from(v).ok())
}

fn detect_from(start: &Path) -> Option<PortConfig> {
    let toml_path = find_moonzoon_toml(start)?;
    let port = read_app_port(&toml_path)?;
    Some(PortConfig {
        app_port: port,
        source: PortSource::MoonZoonToml(toml_path),
    })
}

/// Auto-detect port configuration.
///
/// Search order:
/// 1. Current working directory upward for MoonZoon.toml
/// 2. Relative to the binary path (tools/target/release -> repo root)
/// 3. Fall back to defaults
pub fn detect_ports() -> PortConfig {
    let from_cwd = std::env::current_dir()
        .ok()
        .and_then(|cwd| detect_from(&cwd));
    let from_exe = || {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().and_then(detect_from))
    };

    from_cwd.or_else(from_exe).unwrap_or(PortConfig {
        app_port: DEFAULT_APP_PORT,
        source: PortSource::Default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_config_in_ancestor() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("MoonZoon.toml"), "port = 8123\nhttps = false\n").unwrap();
        let nested = root.path().join("tools").join("target").join("release");
        fs::create_dir_all(&nested).unwrap();

        let config = detect_from(&nested).unwrap();
        assert_eq!(config.app_port, 8123);
        assert_eq!(config.app_url(), "http://localhost:8123");
        assert!(matches!(config.source, PortSource::MoonZoonToml(path) if path.starts_with(root.path())));
    }

    #[test]
    fn rejects_out_of_range_port() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("MoonZoon.toml");
        fs::write(&path, "port = 70000\n").unwrap();
        assert_eq!(read_app_port(&path), None);
    }

    #[test]
    fn missing_port_key() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("MoonZoon.toml");
        fs::write(&path, "[redirect]\nport = 8081\n").unwrap();
        assert_eq!(read_app_port(&path), None);
    }
}
