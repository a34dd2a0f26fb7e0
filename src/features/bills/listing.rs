/// 請求書一覧コンテナ
///
/// ストアから現在のユーザーの請求書を取得し、1件ずつ表示用に整形する。
/// 不正なレコードが混ざっていても一覧全体は失敗させない。
use crate::features::auth::Session;
use crate::features::bills::errors::BillError;
use crate::features::bills::format;
use crate::features::bills::models::{BillRecord, DisplayBill};
use crate::features::bills::store::BillsStore;
use crate::features::bills::views::{BillsView, BillsViewModel};
use crate::shared::routing::{Navigator, Route};
use log::{info, warn};

/// 請求書一覧コンテナ
pub struct BillListing<S, N> {
    store: S,
    session: Session,
    navigator: N,
}

impl<S: BillsStore, N: Navigator> BillListing<S, N> {
    /// 新しい一覧コンテナを作成
    pub fn new(store: S, session: Session, navigator: N) -> Self {
        Self {
            store,
            session,
            navigator,
        }
    }

    /// 請求書一覧を取得して表示用に整形する
    ///
    /// # 戻り値
    /// ストアが返したのと同じ件数・同じ順序の表示用一覧。
    /// ストアの取得自体が失敗した場合は`StoreFetch`エラー（部分的な一覧は返さない）。
    pub async fn get_bills(&self) -> Result<Vec<DisplayBill>, BillError> {
        info!("請求書一覧を取得します: user={}", self.session.email);

        let records = self
            .store
            .list()
            .await
            .map_err(|e| BillError::store_fetch(e.to_string()))?;

        let count = records.len();
        let bills = records.into_iter().map(to_display).collect();

        info!("請求書一覧を整形しました: count={count}");
        Ok(bills)
    }

    /// 新規請求書の作成入口（NewBillルートへ遷移する）
    pub fn on_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// 一覧を取得して表示コラボレーターへ引き渡す
    ///
    /// 取得に失敗した場合はエラーテキストを表示モデルとして渡す
    pub async fn render_into<V: BillsView>(&self, view: &V) {
        match self.get_bills().await {
            Ok(bills) => view.render(&BillsViewModel::Loaded(bills)),
            Err(e) => view.render(&BillsViewModel::Failed(e.to_string())),
        }
    }
}

/// 1件のレコードを表示用に変換する
///
/// 整形に失敗したレコードは診断ログを1件だけ残し、元の値のまま一覧に含める。
/// 1件の不正レコードが他のレコードを隠してはならない。
fn to_display(record: BillRecord) -> DisplayBill {
    let formatted = format::format_date(&record.date)
        .and_then(|date| format::format_status(&record.status).map(|status| (date, status.to_string())));

    match formatted {
        Ok((date, status)) => DisplayBill::from_record(record, date, status),
        Err(e) => {
            warn!("表示整形に失敗したため元の値で表示します: {e}, record={record:?}");

            let date = record.date.clone();
            let status = format::format_status(&record.status)
                .map(str::to_string)
                .unwrap_or_else(|_| record.status.clone());
            DisplayBill::from_record(record, date, status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;
    use std::sync::Mutex;

    struct StubStore {
        list_result: Mutex<Option<Result<Vec<BillRecord>, AppError>>>,
    }

    impl StubStore {
        fn with_records(records: Vec<BillRecord>) -> Self {
            Self {
                list_result: Mutex::new(Some(Ok(records))),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                list_result: Mutex::new(Some(Err(AppError::ExternalService(message.to_string())))),
            }
        }
    }

    impl BillsStore for StubStore {
        async fn list(&self) -> Result<Vec<BillRecord>, AppError> {
            self.list_result.lock().unwrap().take().expect("list呼び出しは1回のみ")
        }

        async fn create(
            &self,
            _file: &crate::features::bills::models::ReceiptFile,
            _email: &str,
        ) -> Result<crate::features::bills::models::CreateBillResponse, AppError> {
            panic!("一覧テストでcreateは呼ばれない");
        }

        async fn update(
            &self,
            _id: &str,
            _payload: &crate::features::bills::models::BillPayload,
        ) -> Result<BillRecord, AppError> {
            panic!("一覧テストでupdateは呼ばれない");
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    fn record(id: &str, date: &str, status: &str) -> BillRecord {
        BillRecord {
            id: id.to_string(),
            email: "employee@test.tld".to_string(),
            expense_type: "Transports".to_string(),
            name: "vol Paris Londres".to_string(),
            amount: 348.0,
            date: date.to_string(),
            vat: Some(70.0),
            pct: Some(20.0),
            commentary: None,
            file_url: Some("https://test.storage.tld/justificatif.jpg".to_string()),
            file_name: Some("justificatif.jpg".to_string()),
            status: status.to_string(),
        }
    }

    fn session() -> Session {
        Session::new("employee@test.tld", None)
    }

    #[tokio::test]
    async fn test_get_bills_formats_records() {
        let store = StubStore::with_records(vec![
            record("1", "2004-04-04", "pending"),
            record("2", "2001-01-01", "refused"),
            record("3", "2003-03-03", "accepted"),
        ]);
        let listing = BillListing::new(store, session(), RecordingNavigator::default());

        let bills = listing.get_bills().await.unwrap();

        assert_eq!(bills.len(), 3);
        assert_eq!(bills[0].date, "4 Avr. 04");
        assert_eq!(bills[0].status, "En attente");
        assert_eq!(bills[1].status, "Refusé");
        assert_eq!(bills[2].status, "Accepté");
        // 並び順はストアの返却順のまま
        assert_eq!(bills[0].id, "1");
        assert_eq!(bills[2].id, "3");
    }

    #[tokio::test]
    async fn test_get_bills_keeps_malformed_record_with_raw_date() {
        let store = StubStore::with_records(vec![
            record("1", "invalid-date", "refused"),
            record("2", "2004-04-04", "pending"),
        ]);
        let listing = BillListing::new(store, session(), RecordingNavigator::default());

        let bills = listing.get_bills().await.unwrap();

        // 不正レコードが他を隠さない（件数維持）
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].date, "invalid-date");
        assert_eq!(bills[0].status, "Refusé");
        assert_eq!(bills[1].date, "4 Avr. 04");
    }

    #[tokio::test]
    async fn test_get_bills_unknown_status_falls_back_to_raw() {
        let store = StubStore::with_records(vec![record("1", "2004-04-04", "archived")]);
        let listing = BillListing::new(store, session(), RecordingNavigator::default());

        let bills = listing.get_bills().await.unwrap();

        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].status, "archived");
    }

    #[tokio::test]
    async fn test_get_bills_store_failure() {
        let store = StubStore::failing("error 404");
        let listing = BillListing::new(store, session(), RecordingNavigator::default());

        let error = listing.get_bills().await.unwrap_err();

        assert_eq!(error.error_type(), "StoreFetch");
        assert!(format!("{error}").contains("error 404"));
    }

    #[tokio::test]
    async fn test_on_new_bill_navigates() {
        let store = StubStore::with_records(vec![]);
        let listing = BillListing::new(store, session(), RecordingNavigator::default());

        listing.on_new_bill();

        assert_eq!(*listing.navigator.routes.lock().unwrap(), vec![Route::NewBill]);
    }
}
