/// 新規請求書提出コンテナ
///
/// 1つの下書きに束縛された状態つきオブジェクト。証憑ファイルの検証と
/// アップロード、フォーム値の組み立て、最終レコードの永続化を担う。
///
/// 状態遷移:
/// `Idle -> (有効なファイル選択) -> アップロード中 -> Ready -> (提出) -> 永続化中 -> Done`
/// 不正なファイル選択は現在状態の自己ループ（ドラフトは変更しない）。
/// アップロード失敗はIdleへ戻る（ドラフト項目は未設定）。
/// 更新失敗はReadyのまま（アップロード済みファイル参照は有効なので再提出できる）。
use crate::features::auth::Session;
use crate::features::bills::errors::BillError;
use crate::features::bills::models::{BillForm, BillPayload, ReceiptFile};
use crate::features::bills::store::BillsStore;
use crate::shared::routing::{Navigator, Route};
use log::info;

/// 許可される証憑ファイルの拡張子
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 拡張子検証の固定メッセージ（互換性のため文言を変更しないこと）
pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers avec des extensions jpg, jpeg ou png sont autorisés.";

/// 新規作成時の初期ステータス。以後の遷移はストア側（管理者）のみが行う
const INITIAL_STATUS: &str = "pending";

/// 税率が未入力の場合の既定値
const DEFAULT_PCT: f64 = 20.0;

/// ドラフトの状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DraftState {
    /// ファイル未選択（またはアップロード失敗後）
    #[default]
    Idle,
    /// アップロード完了、提出可能
    Ready {
        /// ストア発行の恒久ファイルURL
        file_url: String,
        /// 選択されたファイルの元の名前
        file_name: String,
        /// アップロード時にストアが採番した下書き識別子
        bill_id: String,
    },
    /// 永続化完了（終端状態、再利用しない）
    Done,
}

/// 1回の提出セッションが専有する下書き状態
#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    state: DraftState,
}

impl BillDraft {
    /// 現在の状態を取得
    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// アップロード済みファイルの恒久URL
    pub fn file_url(&self) -> Option<&str> {
        match &self.state {
            DraftState::Ready { file_url, .. } => Some(file_url),
            _ => None,
        }
    }

    /// アップロード済みファイルの元の名前
    pub fn file_name(&self) -> Option<&str> {
        match &self.state {
            DraftState::Ready { file_name, .. } => Some(file_name),
            _ => None,
        }
    }

    /// ストアが採番した下書き識別子
    pub fn bill_id(&self) -> Option<&str> {
        match &self.state {
            DraftState::Ready { bill_id, .. } => Some(bill_id),
            _ => None,
        }
    }

    /// 提出可能かどうか
    pub fn is_ready(&self) -> bool {
        matches!(self.state, DraftState::Ready { .. })
    }
}

/// ファイル名の末尾拡張子が許可リストに含まれるか判定する（大文字小文字は区別しない）
pub fn extension_allowed(file_name: &str) -> bool {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    ALLOWED_EXTENSIONS.contains(&extension.as_str())
}

/// 新規請求書提出コンテナ
pub struct BillSubmission<S, N> {
    store: S,
    session: Session,
    navigator: N,
    draft: BillDraft,
}

impl<S: BillsStore, N: Navigator> BillSubmission<S, N> {
    /// 新しい提出コンテナを作成（ドラフトはIdle）
    pub fn new(store: S, session: Session, navigator: N) -> Self {
        Self {
            store,
            session,
            navigator,
            draft: BillDraft::default(),
        }
    }

    /// 下書き状態を参照する
    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    /// ファイル選択時の処理
    ///
    /// 拡張子を検証し、許可されたファイルのみストアのcreateエンドポイントへ
    /// アップロードする。成功時はストアの返す恒久URLと下書き識別子をドラフトへ
    /// 保存する（後から解決した選択が前の値を上書きする・後勝ち）。
    ///
    /// # エラー
    /// - 拡張子が不正: `Validation`（固定メッセージ）。ドラフトは変更しない。
    /// - アップロード失敗: `Upload`。ドラフトはIdleへ戻る。
    pub async fn on_file_selected(&mut self, file: &ReceiptFile) -> Result<(), BillError> {
        if !extension_allowed(&file.name) {
            // アップロードは行わず、下書き識別子も作らない
            return Err(BillError::validation(INVALID_FILE_MESSAGE));
        }

        info!("証憑ファイルをアップロードします: file={}", file.name);

        let receipt = match self.store.create(file, &self.session.email).await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.draft.state = DraftState::Idle;
                return Err(BillError::upload(e.to_string()));
            }
        };

        info!(
            "証憑ファイルのアップロードが完了しました: key={}, fileUrl={}",
            receipt.key, receipt.file_url
        );

        self.draft.state = DraftState::Ready {
            file_url: receipt.file_url,
            file_name: file.name.clone(),
            bill_id: receipt.key,
        };

        Ok(())
    }

    /// フォーム提出時の処理
    ///
    /// アップロード完了（Ready）が前提。フォーム値にアップロード済みの
    /// ファイル参照と所有者メールアドレスを合わせて完全なレコードを組み立て、
    /// 下書き識別子を指定してストアのupdateエンドポイントを呼ぶ。
    /// 成功時は一覧画面へ遷移し、このインスタンスは終端状態になる。
    ///
    /// # エラー
    /// - アップロード未完了: `DraftNotReady`。updateは呼ばれない。
    /// - 更新失敗: `Update`。ドラフトはReadyのままなので再提出できる。
    pub async fn on_submit(&mut self, form: &BillForm) -> Result<(), BillError> {
        let (file_url, file_name, bill_id) = match &self.draft.state {
            DraftState::Ready {
                file_url,
                file_name,
                bill_id,
            } => (file_url.clone(), file_name.clone(), bill_id.clone()),
            _ => {
                return Err(BillError::draft_not_ready(
                    "証憑ファイルを選択してアップロードを完了してください",
                ))
            }
        };

        info!(
            "請求書を提出します: bill_id={bill_id}, type={}, amount={}",
            form.expense_type, form.amount
        );

        let payload = BillPayload {
            email: self.session.email.clone(),
            expense_type: form.expense_type.clone(),
            name: form.name.clone(),
            amount: form.amount,
            date: form.date.clone(),
            vat: form.vat,
            pct: form.pct.unwrap_or(DEFAULT_PCT),
            commentary: form.commentary.clone(),
            file_url,
            file_name,
            status: INITIAL_STATUS.to_string(),
        };

        self.store
            .update(&bill_id, &payload)
            .await
            .map_err(|e| BillError::update(e.to_string()))?;

        info!("請求書の提出が完了しました: bill_id={bill_id}");

        self.draft.state = DraftState::Done;
        self.navigator.navigate(Route::Bills);

        Ok(())
    }
}
