//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

use crate::api::ColumnRole;

/// mapcardクレート全体で使用するエラー型
///
/// 変換処理はすべてのエラーで中断されます（部分的な出力は返しません）。
/// メッセージはそのままエンドユーザーに提示できる形式になっています。
///
/// # エラーの種類
///
/// - `SheetNotFound`: MAPPINGシートが存在しない、または複数存在する
/// - `ColumnNotFound`: 必須列がどの命名規則でも見つからない
/// - `AmbiguousColumn`: 必須列の候補が複数存在する
/// - `MalformedWorkbook`: スプレッドシートとして解析できない（calamine由来）
/// - `Io`: I/O操作中に発生したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズ制限などに違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use mapcard::{ConverterBuilder, MapCardError};
///
/// # fn main() -> Result<(), MapCardError> {
/// let converter = ConverterBuilder::new().build()?;
/// match converter.convert_path("input.xlsx") {
///     Err(MapCardError::SheetNotFound { .. }) => eprintln!("no MAPPING sheet"),
///     Err(e) => eprintln!("{}", e),
///     Ok(card) => println!("{}", card.to_text()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum MapCardError {
    /// 対象シートが見つからない、またはあいまいなエラー
    ///
    /// `candidates`が空の場合はシートが存在しない、2件以上の場合は
    /// 大文字小文字を無視した比較で複数のシートが一致したことを示します。
    #[error("{}", sheet_not_found_message(.expected, .candidates))]
    SheetNotFound {
        /// 探索したシート名（既定: `MAPPING`）
        expected: String,
        /// 一致したシート名
        candidates: Vec<String>,
    },

    /// 必須列が見つからないエラー
    #[error("Required column '{0}' not found in MAPPING sheet header")]
    ColumnNotFound(ColumnRole),

    /// 必須列の候補が複数存在するエラー
    #[error("Column '{role}' is ambiguous: matched headers {headers:?}")]
    AmbiguousColumn {
        /// 解決しようとした列の役割
        role: ColumnRole,
        /// 一致したヘッダー
        headers: Vec<String>,
    },

    /// スプレッドシートの解析に失敗したエラー
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse Excel file: {0}")]
    MalformedWorkbook(#[from] calamine::Error),

    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に無効な設定が検出された場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

fn sheet_not_found_message(expected: &str, candidates: &[String]) -> String {
    if candidates.is_empty() {
        format!("{} sheet not found in Excel file", expected)
    } else {
        format!(
            "{} sheet is ambiguous: {} sheets match ({})",
            expected,
            candidates.len(),
            candidates.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_sheet_not_found_display() {
        let error = MapCardError::SheetNotFound {
            expected: "MAPPING".to_string(),
            candidates: vec![],
        };
        assert_eq!(error.to_string(), "MAPPING sheet not found in Excel file");
    }

    #[test]
    fn test_sheet_ambiguous_display() {
        let error = MapCardError::SheetNotFound {
            expected: "MAPPING".to_string(),
            candidates: vec!["Mapping".to_string(), " MAPPING ".to_string()],
        };
        let msg = error.to_string();
        assert!(msg.contains("ambiguous"));
        assert!(msg.contains("2 sheets"));
        assert!(msg.contains("Mapping"));
    }

    #[test]
    fn test_column_not_found_names_role() {
        let error = MapCardError::ColumnNotFound(ColumnRole::BetaFieldName);
        assert_eq!(
            error.to_string(),
            "Required column 'BETA Field Name' not found in MAPPING sheet header"
        );
    }

    #[test]
    fn test_ambiguous_column_display() {
        let error = MapCardError::AmbiguousColumn {
            role: ColumnRole::Begin,
            headers: vec!["Begin".to_string(), "BEGIN".to_string()],
        };
        let msg = error.to_string();
        assert!(msg.contains("'Begin' is ambiguous"));
        assert!(msg.contains("BEGIN"));
    }

    #[test]
    fn test_malformed_workbook_from_calamine() {
        let error: MapCardError = calamine::Error::Msg("Corrupted file").into();
        match &error {
            MapCardError::MalformedWorkbook(calamine::Error::Msg(msg)) => {
                assert_eq!(*msg, "Corrupted file");
            }
            _ => panic!("Expected MalformedWorkbook error"),
        }
        assert!(error.to_string().starts_with("Failed to parse Excel file"));
    }

    #[test]
    fn test_io_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), MapCardError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(MapCardError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_config_and_security_formats() {
        let config_err = MapCardError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = MapCardError::SecurityViolation("too big".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
