use serde::{Deserialize, Serialize};

/// 請求書データモデル（ストアの永続形式）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BillRecord {
    /// ストア採番の一意な識別子
    pub id: String,
    /// 所有者のメールアドレス
    pub email: String,
    /// 経費カテゴリ
    #[serde(rename = "type")]
    pub expense_type: String,
    /// 経費の名称（自由入力）
    pub name: String,
    /// 金額（通貨単位）
    pub amount: f64,
    /// 日付（YYYY-MM-DD）
    pub date: String,
    /// 消費税額
    pub vat: Option<f64>,
    /// 税率（パーセント）
    pub pct: Option<f64>,
    /// 備考
    pub commentary: Option<String>,
    /// 証憑ファイルの恒久URL（アップロード完了までnull）
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    /// 証憑ファイルの元のファイル名
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    /// ステータス（pending / accepted / refused、ストア側のみが遷移させる）
    pub status: String,
}

/// 表示用に整形済みの請求書
///
/// `BillRecord`と同じレコード識別を保ち、dateとstatusだけが表示文字列になる。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    /// 表示用の日付（例: "4 Avr. 04"、整形失敗時は元の値）
    pub date: String,
    pub vat: Option<f64>,
    pub pct: Option<f64>,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    /// 表示用のステータスラベル（例: "En attente"）
    pub status: String,
}

impl DisplayBill {
    /// 整形済みのdate/statusを差し込んで表示用レコードを作る
    pub fn from_record(record: BillRecord, date: String, status: String) -> Self {
        Self {
            id: record.id,
            email: record.email,
            expense_type: record.expense_type,
            name: record.name,
            amount: record.amount,
            date,
            vat: record.vat,
            pct: record.pct,
            commentary: record.commentary,
            file_url: record.file_url,
            file_name: record.file_name,
            status,
        }
    }
}

/// ストアのcreateエンドポイントからのレスポンス
///
/// `key`は後続の更新フェーズで使う下書き識別子
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateBillResponse {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    pub key: String,
}

/// 提出フォームの入力値DTO
#[derive(Debug, Clone, Deserialize)]
pub struct BillForm {
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    /// 税率。未入力の場合は提出時に20が補われる
    pub pct: Option<f64>,
    pub commentary: Option<String>,
}

/// ストアのupdateエンドポイントへ送る完全なペイロード
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub status: String,
}

/// UI層から受け取った選択済みファイル
///
/// コアはDOMノードを参照せず、ファイル名とバイト列だけを受け取る
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    /// 元のファイル名（拡張子バリデーションに使用）
    pub name: String,
    /// ファイル内容
    pub content: Vec<u8>,
}

impl ReceiptFile {
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BillRecord {
        BillRecord {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "employee@test.tld".to_string(),
            expense_type: "Hôtel et logement".to_string(),
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: Some(20.0),
            commentary: Some("séminaire billed".to_string()),
            file_url: Some("https://test.storage.tld/justificatif-1.jpg".to_string()),
            file_name: Some("preview-facture-pdf-1.jpg".to_string()),
            status: "pending".to_string(),
        }
    }

    #[test]
    fn test_bill_record_serialization() {
        // 請求書データのシリアライゼーションテスト（ワイヤ形式のキー名を確認）
        let record = sample_record();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"Hôtel et logement\""));
        assert!(json.contains("\"fileUrl\":"));
        assert!(json.contains("\"fileName\":"));
        assert!(json.contains("\"amount\":400.0"));

        let deserialized: BillRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_bill_record_with_null_file_fields() {
        // fileUrl/fileNameはアップロード完了までnull
        let json = r#"{
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "email": "employee@test.tld",
            "type": "Transports",
            "name": "test1",
            "amount": 100.0,
            "date": "2001-01-01",
            "vat": null,
            "pct": null,
            "commentary": null,
            "fileUrl": null,
            "fileName": null,
            "status": "refused"
        }"#;

        let record: BillRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file_url, None);
        assert_eq!(record.file_name, None);
        assert_eq!(record.vat, None);
    }

    #[test]
    fn test_create_bill_response_deserialization() {
        let json = r#"{"fileUrl": "https://test.storage.tld/file.jpg", "key": "1234"}"#;

        let response: CreateBillResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.file_url, "https://test.storage.tld/file.jpg");
        assert_eq!(response.key, "1234");
    }

    #[test]
    fn test_bill_form_deserialization_without_optionals() {
        let json = r#"{
            "type": "Transports",
            "name": "Taxi",
            "amount": 50.0,
            "date": "2024-12-01"
        }"#;

        let form: BillForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.expense_type, "Transports");
        assert_eq!(form.vat, None);
        assert_eq!(form.pct, None);
        assert_eq!(form.commentary, None);
    }

    #[test]
    fn test_bill_payload_serialization() {
        let payload = BillPayload {
            email: "employee@test.tld".to_string(),
            expense_type: "Transports".to_string(),
            name: "Taxi".to_string(),
            amount: 50.0,
            date: "2024-12-01".to_string(),
            vat: Some(10.0),
            pct: 20.0,
            commentary: Some("Business trip".to_string()),
            file_url: "https://test.storage.tld/file.jpg".to_string(),
            file_name: "file.jpg".to_string(),
            status: "pending".to_string(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"Transports\""));
        assert!(json.contains("\"fileUrl\":\"https://test.storage.tld/file.jpg\""));
        assert!(json.contains("\"fileName\":\"file.jpg\""));
        assert!(json.contains("\"status\":\"pending\""));
    }

    #[test]
    fn test_display_bill_keeps_record_identity() {
        let record = sample_record();
        let display =
            DisplayBill::from_record(record.clone(), "4 Avr. 04".to_string(), "En attente".to_string());

        assert_eq!(display.id, record.id);
        assert_eq!(display.amount, record.amount);
        assert_eq!(display.date, "4 Avr. 04");
        assert_eq!(display.status, "En attente");
    }
}
