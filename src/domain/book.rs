//! 書籍エンティティとリポジトリ抽象 – ドメイン層

use crate::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::io;

/// 1 冊分のレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub read: bool,
}

impl BookRecord {
    /// year を整数へ変換してからレコードを組み立てる
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl YearInput,
        genre: impl Into<String>,
        read: bool,
    ) -> Result<Self> {
        // 変換失敗時は何も組み立てない
        let year = year.into_year()?;
        Ok(Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        })
    }

    /// タイトルが大文字小文字を無視して一致するか
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// 小文字化済みキーワードがタイトルか著者に含まれるか
    pub(crate) fn matches_lowered(&self, lowered: &str) -> bool {
        self.title.to_lowercase().contains(lowered) || self.author.to_lowercase().contains(lowered)
    }
}

/// 出版年として受け付ける入力値
///
/// 整数・浮動小数・文字列などを `i64` に変換します。
/// 変換できない場合は [`LibraryError::Validation`] を返し、黙ってデフォルト値にはしません。
pub trait YearInput {
    fn into_year(self) -> Result<i64>;
}

macro_rules! year_from_int {
    ($($t:ty),*) => {
        $(
            impl YearInput for $t {
                fn into_year(self) -> Result<i64> {
                    Ok(i64::from(self))
                }
            }
        )*
    };
}

macro_rules! year_try_from_int {
    ($($t:ty),*) => {
        $(
            impl YearInput for $t {
                fn into_year(self) -> Result<i64> {
                    i64::try_from(self).map_err(|_| {
                        LibraryError::validation("year", self.to_string(), "out of range")
                    })
                }
            }
        )*
    };
}

year_from_int!(i8, i16, i32, i64, u8, u16, u32);
year_try_from_int!(i128, isize, u64, u128, usize);

/// 2^63。i64 に収まる浮動小数はこれ未満
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl YearInput for f64 {
    /// 小数部は切り捨て（2011.9 → 2011）
    fn into_year(self) -> Result<i64> {
        if !self.is_finite() {
            return Err(LibraryError::validation(
                "year",
                self.to_string(),
                "not a finite number",
            ));
        }
        let truncated = self.trunc();
        if truncated < -I64_LIMIT || truncated >= I64_LIMIT {
            return Err(LibraryError::validation(
                "year",
                self.to_string(),
                "out of range",
            ));
        }
        Ok(truncated as i64)
    }
}

impl YearInput for f32 {
    fn into_year(self) -> Result<i64> {
        f64::from(self).into_year()
    }
}

impl YearInput for &str {
    /// 前後の空白は無視。"2011.0" のような小数表記は受け付けない
    fn into_year(self) -> Result<i64> {
        let trimmed = self.trim();
        trimmed.parse::<i64>().map_err(|e| {
            let reason = match e.kind() {
                std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                    "out of range"
                }
                std::num::IntErrorKind::Empty => "empty",
                _ => "not an integer",
            };
            LibraryError::validation("year", self, reason)
        })
    }
}

impl YearInput for String {
    fn into_year(self) -> Result<i64> {
        self.as_str().into_year()
    }
}

impl YearInput for &String {
    fn into_year(self) -> Result<i64> {
        self.as_str().into_year()
    }
}

/// 集計結果（総数と既読率）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    /// 0.0 〜 100.0。空のときは 0.0
    pub percentage_read: f64,
}

impl LibraryStats {
    pub fn from_books(books: &[BookRecord]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.read).count();
        let percentage_read = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            percentage_read,
        }
    }
}

impl From<LibraryStats> for (usize, f64) {
    fn from(stats: LibraryStats) -> Self {
        (stats.total, stats.percentage_read)
    }
}

/// 蔵書永続化 I/F
///
/// 保存は常にコレクション全体の書き直し。
pub trait LibraryRepository {
    /// 保存先がない / 解析できない場合は空コレクションを返す
    fn load(&self) -> io::Result<Vec<BookRecord>>;
    fn save(&self, all: &[BookRecord]) -> io::Result<()>;
}
