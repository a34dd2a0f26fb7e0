// 機能モジュール構造
pub mod features;
pub mod shared;

// 主要な型の再エクスポート
pub use features::auth::Session;
pub use features::bills::{
    BillDraft, BillError, BillForm, BillListing, BillPayload, BillRecord, BillSubmission,
    BillsStore, BillsView, BillsViewModel, CreateBillResponse, DisplayBill, DraftState,
    ReceiptFile, RestBillsStore,
};
pub use shared::errors::AppError;
pub use shared::routing::{Navigator, Route};

use log::info;
use shared::config::environment::{initialize_logging_system, load_environment_variables};

/// アプリケーション初期化
///
/// # 処理内容
/// 1. 環境変数の読み込み（開発環境では.envファイル）
/// 2. ログシステムの初期化
pub fn initialize() {
    load_environment_variables();
    initialize_logging_system();

    info!("billed-front を初期化しました: version={}", env!("CARGO_PKG_VERSION"));
}
