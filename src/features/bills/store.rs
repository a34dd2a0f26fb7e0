/// 請求書ストア境界
///
/// レコードの永続化はバックエンド所有の外部サービス。コアはこの境界を
/// 通じてのみ一覧取得・作成・更新を行う。
use crate::features::auth::Session;
use crate::features::bills::models::{BillPayload, BillRecord, CreateBillResponse, ReceiptFile};
use crate::shared::api_client::{ApiClient, ApiClientConfig};
use crate::shared::errors::AppError;
use log::info;

/// ユーザースコープの"bills"リソースに対するストア操作
#[allow(async_fn_in_trait)]
pub trait BillsStore {
    /// 現在のユーザーの請求書一覧を取得する
    async fn list(&self) -> Result<Vec<BillRecord>, AppError>;

    /// 証憑ファイルをアップロードして下書きを作成する
    ///
    /// 成功時は恒久ファイルURLと、後続の更新フェーズで使う下書き識別子を返す
    async fn create(
        &self,
        file: &ReceiptFile,
        email: &str,
    ) -> Result<CreateBillResponse, AppError>;

    /// 下書き識別子を指定して請求書を更新する
    async fn update(&self, id: &str, payload: &BillPayload) -> Result<BillRecord, AppError>;
}

/// Billed APIサーバーを使うストア実装
pub struct RestBillsStore {
    api: ApiClient,
    session: Session,
}

impl RestBillsStore {
    /// 環境設定からストアを作成
    pub fn new(session: Session) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new()?,
            session,
        })
    }

    /// 設定を指定してストアを作成
    pub fn with_config(config: ApiClientConfig, session: Session) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new_with_config(config)?,
            session,
        })
    }
}

impl BillsStore for RestBillsStore {
    async fn list(&self) -> Result<Vec<BillRecord>, AppError> {
        let records: Vec<BillRecord> = self.api.get("/bills", self.session.token()).await?;

        info!("請求書一覧取得成功: count={}", records.len());
        Ok(records)
    }

    async fn create(
        &self,
        file: &ReceiptFile,
        email: &str,
    ) -> Result<CreateBillResponse, AppError> {
        let response: CreateBillResponse = self
            .api
            .post_multipart(
                "/bills",
                &file.name,
                &file.content,
                &[("email", email.to_string())],
                self.session.token(),
            )
            .await?;

        info!(
            "証憑ファイルアップロード成功: key={}, fileUrl={}",
            response.key, response.file_url
        );
        Ok(response)
    }

    async fn update(&self, id: &str, payload: &BillPayload) -> Result<BillRecord, AppError> {
        let endpoint = format!("/bills/{id}");
        let record: BillRecord = self
            .api
            .patch(&endpoint, payload, self.session.token())
            .await?;

        info!("請求書更新成功: bill_id={id}");
        Ok(record)
    }
}
