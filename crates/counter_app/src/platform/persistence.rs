use std::fs;
use std::io::Write;
use std::path::Path;

use counter_core::ServerEndpoint;
use counter_logging::{counter_error, counter_info, counter_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub const STATE_FILENAME: &str = ".counter_client.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEndpoint {
    host: String,
    port: u16,
}

/// Returns the endpoint saved in `dir`, if any. Unreadable or invalid state is
/// logged and ignored.
pub(crate) fn load_endpoint(dir: &Path) -> Option<ServerEndpoint> {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            counter_warn!("Failed to read persisted endpoint from {:?}: {}", path, err);
            return None;
        }
    };

    let persisted: PersistedEndpoint = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            counter_warn!("Failed to parse persisted endpoint from {:?}: {}", path, err);
            return None;
        }
    };

    match ServerEndpoint::new(&persisted.host, persisted.port) {
        Ok(endpoint) => {
            counter_info!("Loaded persisted endpoint {} from {:?}", endpoint, path);
            Some(endpoint)
        }
        Err(err) => {
            counter_warn!("Ignoring persisted endpoint from {:?}: {}", path, err);
            None
        }
    }
}

pub(crate) fn save_endpoint(dir: &Path, endpoint: &ServerEndpoint) {
    let persisted = PersistedEndpoint {
        host: endpoint.host().to_string(),
        port: endpoint.port(),
    };
    let content = match ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            counter_error!("Failed to serialize endpoint: {}", err);
            return;
        }
    };
    if let Err(err) = write_atomic(dir, &content) {
        counter_error!("Failed to write persisted endpoint to {:?}: {}", dir, err);
    }
}

fn write_atomic(dir: &Path, content: &str) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(dir.join(STATE_FILENAME))
        .map_err(|err| err.error)?;
    Ok(())
}
