use crate::features::bills::models::DisplayBill;
use serde::{Deserialize, Serialize};

/// 一覧画面に渡す表示モデル
///
/// 整形済みの一覧か、ユーザーへ見せるエラーテキストのどちらか
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BillsViewModel {
    /// 取得に成功した一覧
    Loaded(Vec<DisplayBill>),
    /// 取得失敗時のエラーテキスト
    Failed(String),
}

/// 表示境界
///
/// マークアップの生成はUI層の責務。コアは表示用データを渡すだけで、
/// DOMやテンプレートには関与しない。
pub trait BillsView {
    /// 表示モデルを描画する
    fn render(&self, model: &BillsViewModel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_model_equality() {
        let failed = BillsViewModel::Failed("error 404".to_string());
        assert_eq!(failed, BillsViewModel::Failed("error 404".to_string()));
        assert_ne!(failed, BillsViewModel::Loaded(vec![]));
    }

    #[test]
    fn test_view_model_serialization() {
        let model = BillsViewModel::Failed("error 500".to_string());
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("error 500"));
    }
}
