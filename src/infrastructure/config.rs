//! アプリ設定（config.json）とデータディレクトリの解決
use crate::error::{LibraryError, Result};
use crate::utils::config::EnvConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "personal_library";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub library_path: Option<String>,
}

/// `$XDG_DATA_HOME/personal_library` か、プラットフォーム既定のデータディレクトリ
pub fn data_dir() -> Result<PathBuf> {
    let config = EnvConfig::get();
    let dir = if let Some(xdg_data_home) = &config.xdg_data_home {
        PathBuf::from(xdg_data_home).join(APP_DIR)
    } else {
        ProjectDirs::from("com", "user", APP_DIR)
            .ok_or_else(|| LibraryError::Config("cannot resolve platform dirs".into()))?
            .data_local_dir()
            .to_path_buf()
    };
    fs::create_dir_all(&dir)
        .map_err(|e| LibraryError::Config(format!("create {}: {}", dir.display(), e)))?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

pub fn default_library_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("library.json"))
}

impl AppConfig {
    /// 設定ファイルがない / 壊れている場合は既定値
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&config_path()?))
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(f) = fs::File::open(path) {
            if let Ok(cfg) = serde_json::from_reader(f) {
                return cfg;
            }
        }
        AppConfig::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp = path.with_extension("json.tmp");
            {
                let f = fs::File::create(&tmp)?;
                serde_json::to_writer_pretty(&f, self)?;
            }
            fs::rename(tmp, path)
        };
        write().map_err(|e| LibraryError::Config(format!("save {}: {}", path.display(), e)))
    }

    /// 設定済みのパス、なければ既定の library.json
    pub fn library_path(&self) -> Result<PathBuf> {
        match &self.library_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => default_library_path(),
        }
    }

    /// 保存先を記録する。既存ファイルの移動は行わない
    pub fn set_library_path(&mut self, new_path: &Path) {
        self.library_path = Some(new_path.to_string_lossy().to_string());
    }
}
