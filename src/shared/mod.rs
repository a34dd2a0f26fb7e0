/// 共有モジュール
///
/// 機能モジュール間で共有される横断的な部品（HTTPクライアント、設定、エラー、ルーティング）
pub mod api_client;
pub mod config;
pub mod errors;
pub mod routing;
