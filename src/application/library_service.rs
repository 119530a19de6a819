use crate::domain::book::{BookRecord, LibraryRepository, LibraryStats, YearInput};
use crate::error::Result;
use crate::infrastructure::library::JsonFileLibraryRepo;
use std::path::PathBuf;

/// 蔵書ストア
///
/// コレクションと永続化先を所有する唯一の窓口。
/// 生成時に一度だけ読み込み、`add` / `remove` のたびに全件を書き直します。
pub struct LibraryStore {
    repo: Box<dyn LibraryRepository>,
    books: Vec<BookRecord>,
}

impl LibraryStore {
    /// リポジトリから読み込んでストアを開く
    ///
    /// 保存先がない / 解析できない場合は空で開始。それ以外の I/O エラーは返す。
    pub fn new(repo: Box<dyn LibraryRepository>) -> Result<Self> {
        let books = repo.load()?;
        Ok(Self { repo, books })
    }

    /// JSON ファイルを保存先として開く
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(Box::new(JsonFileLibraryRepo::new(path)))
    }

    /// 末尾に追加して保存。year の変換に失敗した場合は何も変更しない
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl YearInput,
        genre: impl Into<String>,
        read: bool,
    ) -> Result<()> {
        let book = BookRecord::new(title, author, year, genre, read)?;
        self.books.push(book);
        if let Err(e) = self.repo.save(&self.books) {
            self.books.pop();
            return Err(e.into());
        }
        Ok(())
    }

    /// タイトルが一致する全レコードを削除して保存
    ///
    /// 一致がなくても保存は行う。戻り値は削除件数。
    pub fn remove(&mut self, title: &str) -> Result<usize> {
        let kept: Vec<BookRecord> = self
            .books
            .iter()
            .filter(|b| !b.has_title(title))
            .cloned()
            .collect();
        self.repo.save(&kept)?;
        let removed = self.books.len() - kept.len();
        self.books = kept;
        Ok(removed)
    }

    /// タイトルか著者にキーワードを含むレコード（挿入順）
    ///
    /// 空文字は全件に一致する。
    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = &'a BookRecord> + use<'a> {
        let lowered = keyword.to_lowercase();
        self.books
            .iter()
            .filter(move |b| b.matches_lowered(&lowered))
    }

    /// 総数と既読率
    pub fn statistics(&self) -> LibraryStats {
        LibraryStats::from_books(&self.books)
    }

    /// 全レコード（挿入順）
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl std::fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryStore")
            .field("books", &self.books.len())
            .finish()
    }
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::rc::Rc;

    /// 保存回数と最終保存内容を記録するテスト用リポジトリ
    #[derive(Default, Clone)]
    struct RecordingRepo {
        initial: Vec<BookRecord>,
        saves: Rc<Cell<usize>>,
        stored: Rc<RefCell<Vec<BookRecord>>>,
        fail_save: Rc<Cell<bool>>,
    }

    impl LibraryRepository for RecordingRepo {
        fn load(&self) -> io::Result<Vec<BookRecord>> {
            Ok(self.initial.clone())
        }

        fn save(&self, all: &[BookRecord]) -> io::Result<()> {
            if self.fail_save.get() {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.saves.set(self.saves.get() + 1);
            *self.stored.borrow_mut() = all.to_vec();
            Ok(())
        }
    }

    struct FailingLoadRepo;

    impl LibraryRepository for FailingLoadRepo {
        fn load(&self) -> io::Result<Vec<BookRecord>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn save(&self, _all: &[BookRecord]) -> io::Result<()> {
            Ok(())
        }
    }

    fn store_with(repo: &RecordingRepo) -> LibraryStore {
        LibraryStore::new(Box::new(repo.clone())).unwrap()
    }

    fn titles(store: &LibraryStore) -> Vec<&str> {
        store.books().iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn add_appends_and_saves() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);

        store.add("Dune", "Frank Herbert", 1965, "SF", true).unwrap();
        store.add("Dune", "Frank Herbert", "1965", "SF", false).unwrap();

        assert_eq!(titles(&store), ["Dune", "Dune"]);
        assert_eq!(repo.saves.get(), 2);
        assert_eq!(*repo.stored.borrow(), store.books());
    }

    #[test]
    fn add_with_invalid_year_changes_nothing() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);

        let err = store
            .add("X", "Y", "not-a-number", "Z", false)
            .unwrap_err();
        assert!(matches!(err, LibraryError::Validation { field: "year", .. }));
        assert!(store.is_empty());
        assert_eq!(repo.saves.get(), 0);
    }

    #[test]
    fn add_rolls_back_when_save_fails() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("Emma", "Jane Austen", 1815, "Novel", true).unwrap();

        repo.fail_save.set(true);
        let err = store.add("Dune", "Frank Herbert", 1965, "SF", true).unwrap_err();
        assert!(matches!(err, LibraryError::StorageIo(_)));
        assert_eq!(titles(&store), ["Emma"]);
    }

    #[test]
    fn remove_deletes_every_case_insensitive_match() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("Dune", "A", 2000, "SF", false).unwrap();
        store.add("Emma", "B", 2001, "Novel", false).unwrap();
        store.add("DUNE", "C", 2002, "SF", true).unwrap();
        store.add("dune", "D", 2003, "SF", true).unwrap();

        let removed = store.remove("dUnE").unwrap();

        assert_eq!(removed, 3);
        assert_eq!(titles(&store), ["Emma"]);
        assert!(store.books().iter().all(|b| !b.has_title("dune")));
    }

    /// 一致がなくてもコレクションはそのままで保存は行われる
    #[test]
    fn remove_without_match_still_saves() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("Dune", "A", 2000, "SF", false).unwrap();
        store.add("Emma", "B", 2001, "Novel", false).unwrap();
        let before = store.books().to_vec();
        let saves_before = repo.saves.get();

        assert_eq!(store.remove("Ulysses").unwrap(), 0);

        assert_eq!(store.books(), before.as_slice());
        assert_eq!(repo.saves.get(), saves_before + 1);
        assert_eq!(*repo.stored.borrow(), before);
    }

    #[test]
    fn remove_keeps_collection_when_save_fails() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("Dune", "A", 2000, "SF", false).unwrap();

        repo.fail_save.set(true);
        assert!(store.remove("Dune").is_err());
        assert_eq!(titles(&store), ["Dune"]);
    }

    #[test]
    fn search_matches_title_or_author_in_order() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy", true).unwrap();
        store.add("Emma", "Jane Austen", 1815, "Novel", false).unwrap();
        store.add("Tolkien: A Biography", "Humphrey Carpenter", 1977, "Bio", false).unwrap();

        let found: Vec<_> = store.search("TOLKIEN").map(|b| b.title.as_str()).collect();
        assert_eq!(found, ["The Hobbit", "Tolkien: A Biography"]);
        assert_eq!(store.search("nothing here").count(), 0);
        assert_eq!(store.search("novel").count(), 0);
    }

    #[test]
    fn empty_keyword_returns_everything_in_order() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("C", "x", 2000, "g", false).unwrap();
        store.add("A", "y", 2000, "g", false).unwrap();
        store.add("B", "z", 2000, "g", false).unwrap();

        let all: Vec<_> = store.search("").cloned().collect();
        assert_eq!(all, store.books());
    }

    #[test]
    fn read_only_operations_never_save() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        store.add("Dune", "A", 2000, "SF", true).unwrap();
        let saves = repo.saves.get();

        let _ = store.search("dune").count();
        let _ = store.statistics();
        let _ = store.books();

        assert_eq!(repo.saves.get(), saves);
    }

    #[test]
    fn statistics_reports_total_and_percentage() {
        let repo = RecordingRepo::default();
        let mut store = store_with(&repo);
        assert_eq!(<(usize, f64)>::from(store.statistics()), (0, 0.0));

        store.add("a", "x", 2000, "g", true).unwrap();
        store.add("b", "x", 2000, "g", true).unwrap();
        store.add("c", "x", 2000, "g", false).unwrap();
        store.add("d", "x", 2000, "g", true).unwrap();

        let stats = store.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.percentage_read, 75.0);
    }

    #[test]
    fn initial_contents_come_from_repository() {
        let repo = RecordingRepo {
            initial: vec![BookRecord::new("Dune", "A", 2000, "SF", true).unwrap()],
            ..Default::default()
        };
        let store = store_with(&repo);
        assert_eq!(titles(&store), ["Dune"]);
        assert_eq!(repo.saves.get(), 0);
    }

    #[test]
    fn fatal_load_error_is_propagated() {
        let err = LibraryStore::new(Box::new(FailingLoadRepo)).unwrap_err();
        assert!(matches!(err, LibraryError::StorageIo(_)));
    }
}
