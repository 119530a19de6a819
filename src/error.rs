//! 統一エラーハンドリング
//!
//! personal_library 全体で使用するエラー型を定義します。
//! 読み込み時の「ファイルなし / 壊れている」は空コレクションとして回復するため、ここには現れません。

use std::io;
use thiserror::Error;

/// personal_library 全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum LibraryError {
    // ========================================
    // 入力検証エラー（変更前に報告）
    // ========================================
    #[error("Invalid {field}: {value:?} ({reason})")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    // ========================================
    // 永続化エラー（致命的）
    // ========================================
    #[error("Storage I/O error: {0}")]
    StorageIo(#[from] io::Error),

    // ========================================
    // 設定関連エラー
    // ========================================
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, LibraryError>;

impl LibraryError {
    /// year など入力値の変換失敗を組み立てる
    pub fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LibraryError::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 入力を直せばユーザー側で解決できるか
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            LibraryError::Validation { .. } | LibraryError::Config(_)
        )
    }
}
