/// Environment loading helpers.
///
/// Loads environment variables from `.env` if present, or from the file
/// specified by the `PERSONAL_LIBRARY_ENV_PATH` environment variable. Any
/// errors during loading are ignored.
pub fn load_env() {
    // EnvConfig の初期化前に実行すること
    if let Ok(path) = std::env::var("PERSONAL_LIBRARY_ENV_PATH") {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}
