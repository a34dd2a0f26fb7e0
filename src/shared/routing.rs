use log::debug;
use serde::{Deserialize, Serialize};

/// 画面ルート定義
///
/// ルーティングそのものは外部コラボレーターの責務。コアは名前付き定数だけを扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// 請求書一覧画面
    Bills,
    /// 新規請求書作成画面
    NewBill,
}

impl Route {
    /// ルートに対応するパスを取得
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }
}

/// ナビゲーション境界
///
/// 画面遷移を所有するUI層が実装する。コアは遷移先ルートを通知するだけで、
/// 実際の描画やURL変更には関与しない。
pub trait Navigator {
    /// 指定ルートへ遷移する
    fn navigate(&self, route: Route);
}

/// ログ出力のみ行うナビゲーター（ヘッドレス実行用）
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: Route) {
        debug!("画面遷移: route={route:?}, path={}", route.path());
    }
}
