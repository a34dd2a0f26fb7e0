/// 請求書（経費精算）機能モジュール
///
/// このモジュールは請求書管理に関連するすべての機能を提供します：
/// - 請求書一覧の取得と表示用整形
/// - 新規請求書の提出（証憑アップロード→メタデータ更新の2段階プロトコル）
/// - 証憑ファイルのバリデーション
// サブモジュールの宣言
pub mod errors;
pub mod format;
pub mod listing;
pub mod models;
pub mod store;
pub mod submission;
pub mod views;


// 公開インターフェース：外部から使用可能な型と関数をエクスポート

// モデル
pub use models::{BillForm, BillPayload, BillRecord, CreateBillResponse, DisplayBill, ReceiptFile};

// エラー
pub use errors::BillError;

// ストア境界
pub use store::{BillsStore, RestBillsStore};

// コンテナ
pub use listing::BillListing;
pub use submission::{BillDraft, BillSubmission, DraftState, INVALID_FILE_MESSAGE};

// 表示境界
pub use views::{BillsView, BillsViewModel};
