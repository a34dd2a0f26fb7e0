/// 表示用整形
///
/// 日付とステータスを一覧画面向けの表示文字列へ変換する。
/// 整形の失敗はレコード単位の非致命的エラーとして呼び出し側が処理する。
use chrono::{Locale, NaiveDate};

/// レコード単位の整形エラー（伝播させず、ログに残して元の値で表示する）
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecordFormatError {
    /// 日付を解釈できない
    #[error("日付を解釈できません: {value}")]
    InvalidDate { value: String },

    /// 未知のステータス
    #[error("不明なステータス: {value}")]
    UnknownStatus { value: String },
}

/// 日付をフランス語の短縮表示へ整形する
///
/// `YYYY-MM-DD` を `"{日} {月略称}. {年下2桁}"` に変換する。
/// 月略称は先頭を大文字化して3文字に切り詰める（例: "2004-04-04" -> "4 Avr. 04"）。
pub fn format_date(raw: &str) -> Result<String, RecordFormatError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        RecordFormatError::InvalidDate {
            value: raw.to_string(),
        }
    })?;

    let month = date.format_localized("%b", Locale::fr_FR).to_string();
    let mut chars = month.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    let short_month: String = capitalized.chars().take(3).collect();

    Ok(format!(
        "{} {}. {}",
        date.format("%-d"),
        short_month,
        date.format("%y")
    ))
}

/// ステータスを表示ラベルへ変換する
pub fn format_status(raw: &str) -> Result<&'static str, RecordFormatError> {
    match raw {
        "pending" => Ok("En attente"),
        "accepted" => Ok("Accepté"),
        "refused" => Ok("Refusé"),
        other => Err(RecordFormatError::UnknownStatus {
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2001-01-01").unwrap(), "1 Jan. 01");
        assert_eq!(format_date("2003-03-03").unwrap(), "3 Mar. 03");
        assert_eq!(format_date("2021-12-25").unwrap(), "25 Déc. 21");
    }

    #[test]
    fn test_format_date_keeps_day_without_leading_zero() {
        assert_eq!(format_date("2002-02-02").unwrap(), "2 Fév. 02");
        assert_eq!(format_date("2002-02-20").unwrap(), "20 Fév. 02");
    }

    #[test]
    fn test_format_date_invalid_input() {
        let error = format_date("invalid-date").unwrap_err();
        assert!(matches!(error, RecordFormatError::InvalidDate { value } if value == "invalid-date"));

        assert!(format_date("").is_err());
        assert!(format_date("2004-13-01").is_err());
        assert!(format_date("04/04/2004").is_err());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status("pending").unwrap(), "En attente");
        assert_eq!(format_status("accepted").unwrap(), "Accepté");
        assert_eq!(format_status("refused").unwrap(), "Refusé");
    }

    #[test]
    fn test_format_status_unknown() {
        let error = format_status("archived").unwrap_err();
        assert!(matches!(error, RecordFormatError::UnknownStatus { value } if value == "archived"));
    }
}
