use serde::{Deserialize, Serialize};

/// 認証済みユーザーのセッション情報
///
/// 周辺ストレージから暗黙的に読むのではなく、各コンポーネントの生成時に
/// 明示的な値として渡す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// メールアドレス（請求書の所有者）
    pub email: String,
    /// JWTアクセストークン（APIサーバー認証用）
    pub access_token: Option<String>,
}

impl Session {
    /// 新しいセッションを作成
    pub fn new<S: Into<String>>(email: S, access_token: Option<String>) -> Self {
        Self {
            email: email.into(),
            access_token,
        }
    }

    /// アクセストークンを取得
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}
