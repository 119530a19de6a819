//! 環境変数で有効化する簡易ログ（stderr）。
//!
//! `PERSONAL_LIBRARY_PROFILE=1` のときだけ `PROFILE label=... ms=...` を出力します。

use std::sync::OnceLock;
use std::time::{Duration, Instant};

const PROFILE_ENV: &str = "PERSONAL_LIBRARY_PROFILE";

#[cfg(test)]
use std::sync::atomic::{AtomicI8, Ordering};

#[cfg(test)]
static ENABLED_OVERRIDE: AtomicI8 = AtomicI8::new(-1);

/// プロファイルログが有効かを返す。
pub fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    #[cfg(test)]
    {
        let override_value = ENABLED_OVERRIDE.load(Ordering::SeqCst);
        if override_value >= 0 {
            return override_value == 1;
        }
    }
    *ENABLED.get_or_init(|| {
        std::env::var(PROFILE_ENV)
            .ok()
            .map(|value| parse_flag(&value))
            .unwrap_or(false)
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 計測開始用タイマー。
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// 追加情報付きで経過時間をログに出力する。
    pub fn log_with(self, extra: &str) {
        log_duration(self.label, self.start.elapsed(), extra);
    }
}

/// 計測済みの経過時間をログに出力する。
fn log_duration(label: &str, elapsed: Duration, extra: &str) {
    if !enabled() {
        return;
    }

    if extra.is_empty() {
        eprintln!("PROFILE label={} ms={}", label, elapsed.as_millis());
    } else {
        eprintln!(
            "PROFILE label={} ms={} {}",
            label,
            elapsed.as_millis(),
            extra
        );
    }
}

/// 任意タイミングのログを出力する。
pub fn log_point(label: &str, extra: &str) {
    log_duration(label, Duration::ZERO, extra);
}

#[cfg(test)]
pub fn set_enabled_override(value: bool) {
    ENABLED_OVERRIDE.store(if value { 1 } else { 0 }, Ordering::SeqCst);
}

#[cfg(test)]
pub fn clear_enabled_override() {
    ENABLED_OVERRIDE.store(-1, Ordering::SeqCst);
}
