use std::path::PathBuf;

/// Server configuration - immutable after load
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub http_port: u16,
    pub snapshot_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            http_port: 8080,
            snapshot_path: PathBuf::from("players.json"),
            log_path: PathBuf::from("playerconsole.log"),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}
