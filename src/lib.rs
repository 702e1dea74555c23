//! mapcard - Pure-Rust converter from MAPPING spreadsheets to control-card text
//!
//! ワークブック内の`MAPPING`シート（大文字小文字を区別しない）を読み込み、
//! 下流のメインフレーム処理が読み込む固定形式のコントロールカードを生成します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mapcard::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let card = converter.convert_path("Input1.xlsx")?;
//!     std::fs::write("Input1.txt", card.to_text())?;
//!
//!     let summary = card.summary();
//!     println!(
//!         "{} lines, {} field mappings",
//!         summary.total_lines, summary.field_mappings
//!     );
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, pass the bytes directly:
//!
//! ```rust,no_run
//! use mapcard::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! let card = converter.convert_bytes(&excel_data)?;
//! for line in card.record_lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # 出力形式
//!
//! 先頭に19行の固定バナーが付き、その後にフィールドマッピング行が続きます。
//!
//! ```text
//! 0000 0001  01                                    DEMO-ACCOUNT-NUMBER
//! ```
//!
//! | 桁 | 内容 |
//! |----|------|
//! | 06-09 | 開始位置（`Begin`列、4桁ゼロ埋め） |
//! | 12-13 | マッピング選択肢（指示文の`1.`、`2.`…） |
//! | 50- | DEMOフィールド名（`PER-` → `DEMO-` など） |

mod api;
mod builder;
mod error;
mod formatter;
pub mod logging;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{
    ColumnRole, ConversionSummary, MappingOption, RowRecord, SheetInfo, WorkbookInfo,
};
pub use builder::{Converter, ConverterBuilder, DEFAULT_SHEET_NAME};
pub use error::MapCardError;
pub use formatter::{extract_options, normalize_begin, translate_field_name};
pub use output::ControlCard;
