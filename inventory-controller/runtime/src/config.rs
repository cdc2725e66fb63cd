use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::{ClusterConfig, ConfigStore};

/// Reads the cluster config from a mounted JSON file on every lookup so
/// that config-map updates take effect without a restart.
#[derive(Clone, Debug)]
pub struct FileConfigStore {
    path: PathBuf,
}

// === impl FileConfigStore ===

impl FileConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl ConfigStore for FileConfigStore {
    async fn get_cluster_config(&self) -> Result<ClusterConfig> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"clusterName": "prod-east", "namespaces": ["team-a"], "globalReadOnly": true}}"#
        )
        .unwrap();

        let store = FileConfigStore::new(file.path().to_path_buf());
        let config = store.get_cluster_config().await.unwrap();
        assert_eq!(config.cluster_name(), "prod-east");
        assert_eq!(config.namespaces, vec!["team-a".to_string()]);
        assert!(config.global_read_only);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let store = FileConfigStore::new(PathBuf::from("/definitely/not/here.json"));
        assert!(store.get_cluster_config().await.is_err());
    }

    #[tokio::test]
    async fn picks_up_edits_between_reads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"clusterName": "a"}}"#).unwrap();
        let store = FileConfigStore::new(file.path().to_path_buf());
        assert_eq!(store.get_cluster_config().await.unwrap().cluster_name(), "a");

        let mut file = std::fs::File::create(file.path()).unwrap();
        write!(file, r#"{{"clusterName": "b"}}"#).unwrap();
        assert_eq!(store.get_cluster_config().await.unwrap().cluster_name(), "b");
    }
}
