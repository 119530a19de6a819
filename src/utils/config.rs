//! グローバル環境変数設定
//!
//! プロセス起動時に一度だけ取り込み、以降はどこからでも参照できます。

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// グローバル環境変数設定
static ENV_CONFIG: OnceCell<Arc<EnvConfig>> = OnceCell::new();

/// 環境変数設定
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// XDG Data Home ディレクトリ
    pub xdg_data_home: Option<String>,
}

impl EnvConfig {
    fn from_env() -> Self {
        EnvConfig {
            xdg_data_home: non_empty_var("XDG_DATA_HOME"),
        }
    }

    /// 環境変数から設定を初期化
    ///
    /// 既に初期化済みの場合は何もしない（冪等）。
    pub fn init() {
        ENV_CONFIG.get_or_init(|| Arc::new(Self::from_env()));
    }

    /// 設定を取得。未初期化ならこの時点で環境変数から取り込む
    pub fn get() -> Arc<EnvConfig> {
        ENV_CONFIG
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
