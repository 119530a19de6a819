//! JSON ファイル版 LibraryRepository 実装
use crate::domain::book::{BookRecord, LibraryRepository};
use crate::utils::profiling;
use serde_json::{from_slice, to_writer_pretty};
use std::{
    fs,
    io::{BufWriter, ErrorKind, Result, Write},
    path::{Path, PathBuf},
};

/// 蔵書全体を 1 つの JSON 配列として保存する
///
/// ロックは取らない。同じファイルを複数プロセスで開いた場合は最後の保存が勝つ。
#[derive(Debug, Clone)]
pub struct JsonFileLibraryRepo {
    path: PathBuf,
}

impl JsonFileLibraryRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LibraryRepository for JsonFileLibraryRepo {
    fn load(&self) -> Result<Vec<BookRecord>> {
        let timer = profiling::Timer::start("library.load");
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                profiling::log_point("library.load.missing", &format!("path={}", self.path.display()));
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };
        match from_slice::<Vec<BookRecord>>(&bytes) {
            Ok(books) => {
                timer.log_with(&format!("books={}", books.len()));
                Ok(books)
            }
            Err(e) => {
                // 解析できない内容は空コレクションとして扱う（ファイルはそのまま）
                profiling::log_point(
                    "library.load.unparsable",
                    &format!("path={} err={}", self.path.display(), e),
                );
                Ok(vec![])
            }
        }
    }

    fn save(&self, all: &[BookRecord]) -> Result<()> {
        let timer = profiling::Timer::start("library.save");
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = write_json(&tmp, all).and_then(|()| fs::rename(&tmp, &self.path)) {
            // 書きかけの一時ファイルは残さない
            fs::remove_file(&tmp).ok();
            return Err(e);
        }
        timer.log_with(&format!("books={}", all.len()));
        Ok(())
    }
}

fn write_json(path: &Path, all: &[BookRecord]) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    to_writer_pretty(&mut writer, all)?;
    writer.flush()
}
