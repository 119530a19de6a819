//! personal_library CLI: 蔵書ストアの薄いフロントエンド。
//! 各サブコマンドは `LibraryStore` の操作を 1 回呼び、結果を表示するだけです。
use clap::Parser;
use personal_library::{
    LibraryStore,
    cli::{Cli, Cmd, ConfigCmd, ConfigField},
    domain::book::BookRecord,
    error::Result,
    infrastructure::config::AppConfig,
    utils::{config::EnvConfig, env::load_env},
};
use std::path::{Path, PathBuf};

fn main() {
    load_env();
    EnvConfig::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        // 入力を直せば解決するものは 2、それ以外は 1
        std::process::exit(if e.is_user_actionable() { 2 } else { 1 });
    }
}

/// `--file` があれば設定ファイル・データディレクトリには触れない
fn library_path(file: Option<&Path>) -> Result<PathBuf> {
    match file {
        Some(p) => Ok(p.to_path_buf()),
        None => AppConfig::load()?.library_path(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let open = || LibraryStore::open(library_path(cli.file.as_deref())?);

    match cli.cmd {
        Cmd::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            open()?.add(title, author, year, genre, read)?;
            println!("✅ Book added successfully!");
        }
        Cmd::Remove { title } => {
            let removed = open()?.remove(&title)?;
            println!("✅ Book removed successfully! ({} removed)", removed);
        }
        Cmd::Search { keyword } => {
            let store = open()?;
            let mut found = store.search(&keyword).peekable();
            if found.peek().is_none() {
                println!("⚠ No books found.");
            }
            for book in found {
                println!("{}", format_line(book));
            }
        }
        Cmd::List => {
            let store = open()?;
            if store.is_empty() {
                println!("⚠ Your library is empty.");
            }
            for book in store.books() {
                println!("{}", format_line(book));
            }
        }
        Cmd::Stats => {
            let stats = open()?.statistics();
            println!("📚 Total Books: {}", stats.total);
            println!("📖 Percentage Read: {:.2}%", stats.percentage_read);
        }
        Cmd::Config { action } => match action {
            ConfigCmd::Set {
                field: ConfigField::LibraryPath { path },
            } => {
                let mut config = AppConfig::load()?;
                config.set_library_path(&path);
                config.save()?;
                println!("✅ library path set to {}", path.display());
            }
            ConfigCmd::Show => println!("{}", library_path(cli.file.as_deref())?.display()),
        },
    }
    Ok(())
}

fn format_line(book: &BookRecord) -> String {
    format!(
        "📘 {} by {} ({}) - {} - {}",
        book.title,
        book.author,
        book.year,
        book.genre,
        if book.read { "✅ Read" } else { "📖 Unread" }
    )
}
