//! Public API Types
//!
//! 公開APIで使用するデータ型を定義するモジュール。

use serde::Serialize;
use std::fmt;

/// MAPPINGシートの必須列の役割
///
/// ヘッダー行からあいまい一致で解決される3つの論理列を表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnRole {
    /// 開始位置（数値または浮動小数点数）
    Begin,

    /// BETA側のフィールド名（例: `PER-NAME`）
    BetaFieldName,

    /// プログラマー向けマッピング指示（自由記述）
    MappingInstructions,
}

impl ColumnRole {
    /// すべての役割（解決順）
    pub const ALL: [ColumnRole; 3] = [
        ColumnRole::Begin,
        ColumnRole::BetaFieldName,
        ColumnRole::MappingInstructions,
    ];

    /// 役割の正式な列名
    pub fn canonical_name(self) -> &'static str {
        match self {
            ColumnRole::Begin => "Begin",
            ColumnRole::BetaFieldName => "BETA Field Name",
            ColumnRole::MappingInstructions => "Mapping Instructions",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// MAPPINGシートの1データ行を必須列に射影したレコード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRecord {
    /// シート上の行番号（0始まり、診断用）
    pub row_index: u32,

    /// 開始位置（数値化できない場合は0）
    pub begin: f64,

    /// 開始位置が0に強制変換されたかどうか
    pub begin_coerced: bool,

    /// BETAフィールド名（前後の空白を除去済み）
    pub beta_field_name: String,

    /// マッピング指示
    pub instructions: String,
}

/// マッピング指示から抽出された選択肢
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingOption {
    /// 選択肢番号（1〜99）
    pub code: u8,

    /// 選択肢に対応する指示文
    pub fragment: String,
}

impl MappingOption {
    /// 2桁ゼロ埋めの選択肢コード（例: `01`）
    pub fn code_str(&self) -> String {
        format!("{:02}", self.code)
    }
}

/// 変換結果の集計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// 出力行の総数（ヘッダーを含む）
    pub total_lines: usize,

    /// フィールドマッピング行の数
    pub field_mappings: usize,

    /// 処理した（空行以外の）データ行の数
    pub rows_processed: usize,

    /// 開始位置を0に強制変換した行の数
    pub coerced_begin_values: usize,
}

/// ワークブック内のシート情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetInfo {
    /// シート名
    pub name: String,

    /// 使用範囲の行数
    pub rows: usize,

    /// 使用範囲の列数
    pub columns: usize,

    /// 先頭行のセル値
    pub column_names: Vec<String>,
}

/// ワークブック全体の情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookInfo {
    /// シート数
    pub num_sheets: usize,

    /// 各シートの情報（ワークブック内の順序）
    pub sheets: Vec<SheetInfo>,
}
