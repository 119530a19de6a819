use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal library catalog")]
pub struct Cli {
    /// 蔵書ファイルを一時的に指定（設定より優先）
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// 📖 本を追加
    Add {
        title: String,
        author: String,
        /// 出版年（整数に変換できること）
        #[arg(allow_hyphen_values = true)]
        year: String,
        genre: String,
        /// 既読として登録
        #[arg(long, default_value_t = false)]
        read: bool,
    },
    /// 🗑 タイトルが一致する本をすべて削除
    Remove { title: String },
    /// 🔎 タイトル / 著者で検索
    Search {
        #[arg(default_value = "")]
        keyword: String,
    },
    /// 📚 一覧表示
    List,
    /// 📊 統計
    Stats,
    /// 各種設定操作
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// 設定値を変更
    Set {
        #[command(subcommand)]
        field: ConfigField,
    },
    /// 現在の保存先を表示
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ConfigField {
    /// 蔵書ファイルの保存先を指定
    #[command(name = "library-path")]
    LibraryPath { path: PathBuf },
}
