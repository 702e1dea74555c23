//! Output Module
//!
//! 変換結果（コントロールカード）の組み立てと書き出しを提供するモジュール。

mod header;

use std::fmt;
use std::io::{BufWriter, Write};

use crate::api::ConversionSummary;
use crate::error::MapCardError;

pub(crate) use header::HEADER_LINES;

/// 変換結果のコントロールカード
///
/// バナー行とフィールドマッピング行を、シートの行順のまま保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCard {
    /// 先頭のバナー行数
    header_len: usize,

    /// 全出力行（バナー + フィールドマッピング行）
    lines: Vec<String>,

    /// 集計値
    summary: ConversionSummary,
}

impl ControlCard {
    /// バナーとフィールドマッピング行からコントロールカードを組み立てる
    pub(crate) fn assemble(
        include_header: bool,
        records: Vec<String>,
        rows_processed: usize,
        coerced_begin_values: usize,
    ) -> Self {
        let header: Vec<String> = if include_header {
            HEADER_LINES.iter().map(|line| line.to_string()).collect()
        } else {
            Vec::new()
        };
        let header_len = header.len();
        let field_mappings = records.len();

        let mut lines = header;
        lines.extend(records);

        Self {
            header_len,
            summary: ConversionSummary {
                total_lines: lines.len(),
                field_mappings,
                rows_processed,
                coerced_begin_values,
            },
            lines,
        }
    }

    /// 全出力行
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// バナーを除いたフィールドマッピング行
    pub fn record_lines(&self) -> &[String] {
        &self.lines[self.header_len..]
    }

    /// 集計値
    pub fn summary(&self) -> ConversionSummary {
        self.summary
    }

    /// 全出力行を取り出す
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// 出力テキスト（行区切りは`\n`、末尾に改行なし）
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// 出力テキストをライターに書き出す
    ///
    /// 書き出すバイト列は`to_text()`と同一です。
    pub fn write_to<W: Write>(&self, output: W) -> Result<(), MapCardError> {
        let mut writer = BufWriter::new(output);
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for ControlCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
