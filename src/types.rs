//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use calamine::Data;

/// セルの値を表す列挙型
///
/// calamineの`Data`を、変換処理が必要とする形に正規化したものです。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #N/A）や日付など、数値として扱わない値
    Other(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// calamineのセルデータから変換
    pub fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Empty => CellValue::Empty,
            other => CellValue::Other(other.to_string()),
        }
    }

    /// 空セル、または空白のみの文字列かどうかを判定
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) | CellValue::Other(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 値を前後の空白を除去した文字列として取得
    ///
    /// 整数値の浮動小数点数は小数部なしで表記します（例: `1.0` -> `"1"`）。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) | CellValue::Other(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string().to_uppercase(),
            CellValue::Empty => String::new(),
        }
    }

    /// 値を数値として取得
    ///
    /// 数値セルはそのまま、文字列は前後の空白を除去して解析します。
    /// それ以外（論理値、エラー値、日付、解析不能な文字列）は`None`です。
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        assert_eq!(CellValue::from_data(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            CellValue::from_data(&Data::Float(1.5)),
            CellValue::Number(1.5)
        );
        assert_eq!(
            CellValue::from_data(&Data::String("PER-NAME".to_string())),
            CellValue::String("PER-NAME".to_string())
        );
        assert_eq!(CellValue::from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(CellValue::from_data(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::String("   ".to_string()).is_blank());
        assert!(!CellValue::String(" x ".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Number(1.0).as_text(), "1");
        assert_eq!(CellValue::Number(1.25).as_text(), "1.25");
        assert_eq!(CellValue::String("  PER-ID ".to_string()).as_text(), "PER-ID");
        assert_eq!(CellValue::Bool(true).as_text(), "TRUE");
        assert_eq!(CellValue::Empty.as_text(), "");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(23.0).as_number(), Some(23.0));
        assert_eq!(CellValue::String(" 7.0 ".to_string()).as_number(), Some(7.0));
        assert_eq!(CellValue::String("n/a".to_string()).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }
}
