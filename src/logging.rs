//! Logging Module
//!
//! `tracing-subscriber`による標準エラー出力へのログ初期化。
//! ライブラリ本体はイベントを発行するだけで、初期化はバイナリ側で行います。

use tracing_subscriber::{fmt, EnvFilter};

/// ログシステムを初期化する
///
/// # 環境変数
///
/// - `RUST_LOG`: ログレベルのフィルター（未設定時は`default_level`）
///   例: `RUST_LOG=debug` や `RUST_LOG=mapcard=trace`
///
/// 2回目以降の呼び出しは何もしません。
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// テスト環境のログを初期化する
///
/// テストの出力キャプチャに合わせて`debug`レベルで出力します。
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
