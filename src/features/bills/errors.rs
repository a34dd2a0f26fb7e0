use log::{error, warn};
use serde::{Deserialize, Serialize};

/// 請求書機能のエラーの種類
///
/// レコード単位の整形エラーは`format::RecordFormatError`が担い、ここには含めない
/// （一覧処理の中でログに残すだけで、呼び出し側へは伝播しないため）。
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum BillError {
    /// ファイル検証エラー（ユーザー入力、非致命的）
    #[error("{message}")]
    Validation { message: String },

    /// 一覧取得エラー（一覧呼び出しに対して致命的）
    #[error("請求書一覧の取得に失敗しました: {message}")]
    StoreFetch { message: String },

    /// アップロードエラー（試行に対して致命的、インスタンスは継続可能）
    #[error("証憑ファイルのアップロードに失敗しました: {message}")]
    Upload { message: String },

    /// 更新エラー（試行に対して致命的、ドラフトは保持され再提出できる）
    #[error("請求書の更新に失敗しました: {message}")]
    Update { message: String },

    /// ドラフト未準備エラー（アップロード完了前の提出）
    #[error("証憑ファイルのアップロードが完了していません: {message}")]
    DraftNotReady { message: String },
}

impl BillError {
    /// ファイル検証エラーを作成
    pub fn validation<S: Into<String>>(message: S) -> Self {
        let msg = message.into();
        warn!("ファイル検証エラーが発生: {msg}");
        Self::Validation { message: msg }
    }

    /// 一覧取得エラーを作成
    pub fn store_fetch<S: Into<String>>(message: S) -> Self {
        let msg = message.into();
        error!("請求書一覧の取得エラーが発生: {msg}");
        Self::StoreFetch { message: msg }
    }

    /// アップロードエラーを作成
    pub fn upload<S: Into<String>>(message: S) -> Self {
        let msg = message.into();
        error!("アップロードエラーが発生: {msg}");
        Self::Upload { message: msg }
    }

    /// 更新エラーを作成
    pub fn update<S: Into<String>>(message: S) -> Self {
        let msg = message.into();
        error!("更新エラーが発生: {msg}");
        Self::Update { message: msg }
    }

    /// ドラフト未準備エラーを作成
    pub fn draft_not_ready<S: Into<String>>(message: S) -> Self {
        let msg = message.into();
        warn!("ドラフト未準備エラーが発生: {msg}");
        Self::DraftNotReady { message: msg }
    }

    /// エラーメッセージを取得
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message } => message,
            Self::StoreFetch { message } => message,
            Self::Upload { message } => message,
            Self::Update { message } => message,
            Self::DraftNotReady { message } => message,
        }
    }

    /// エラーの種類を取得
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation",
            Self::StoreFetch { .. } => "StoreFetch",
            Self::Upload { .. } => "Upload",
            Self::Update { .. } => "Update",
            Self::DraftNotReady { .. } => "DraftNotReady",
        }
    }

    /// エラーが再試行可能かどうかを判定
    ///
    /// ストア呼び出しの失敗は再試行できる。入力起因のエラーは入力を直すしかない。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::StoreFetch { .. } => true,
            Self::Upload { .. } => true,
            Self::Update { .. } => true,
            Self::Validation { .. } => false,
            Self::DraftNotReady { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let fetch_error = BillError::store_fetch("error 404");
        assert_eq!(fetch_error.error_type(), "StoreFetch");
        assert_eq!(fetch_error.message(), "error 404");
        assert!(fetch_error.is_retryable());

        let validation_error = BillError::validation("拡張子が不正");
        assert_eq!(validation_error.error_type(), "Validation");
        assert!(!validation_error.is_retryable());
    }

    #[test]
    fn test_store_fetch_display_keeps_store_message() {
        // エラービューにはストアのメッセージがそのまま含まれる必要がある
        let error = BillError::store_fetch("error 500");
        assert!(format!("{error}").contains("error 500"));
    }

    #[test]
    fn test_validation_display_is_exact_message() {
        // 検証エラーの表示は固定メッセージそのもの（アラートにそのまま使う）
        let error = BillError::validation("message exact");
        assert_eq!(format!("{error}"), "message exact");
    }

    #[test]
    fn test_error_serialization() {
        let error = BillError::update("connexion perdue");
        let json = serde_json::to_string(&error).unwrap();
        let deserialized: BillError = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.error_type(), "Update");
        assert_eq!(deserialized.message(), "connexion perdue");
    }
}
