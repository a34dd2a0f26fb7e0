use serde::{Deserialize, Serialize};

/// アプリケーション共通エラー
///
/// 設定読み込みとAPIサーバー通信で発生する横断的なエラー。
/// 機能固有のエラー分類は各機能モジュールの`errors.rs`が担う。
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    /// 設定エラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// バリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 外部サービスエラー
    #[error("外部サービスエラー: {0}")]
    ExternalService(String),
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::ExternalService(format!("HTTPリクエストタイムアウト: {error}"))
        } else if error.is_connect() {
            Self::ExternalService(format!("接続エラー: {error}"))
        } else {
            Self::ExternalService(format!("HTTPエラー: {error}"))
        }
    }
}
