//! Mapping Sheet
//!
//! MAPPINGシートの本体行を`RowRecord`の列として取り出す。

use calamine::{Data, Range};
use tracing::{debug, warn};

use crate::api::{ColumnRole, RowRecord};
use crate::error::MapCardError;
use crate::parser::columns::{resolve_columns, ColumnSet};
use crate::types::CellValue;

/// 列解決済みのMAPPINGシート
///
/// ワークブックから読み込んだセル範囲を保持し、`rows()`を呼ぶたびに
/// 先頭から行を走査し直します。
#[derive(Debug, Clone)]
pub(crate) struct MappingSheet {
    /// シート名（ワークブック上の表記）
    name: String,
    /// シートの使用範囲
    range: Range<Data>,
    /// 解決済みの列
    columns: ColumnSet,
}

impl MappingSheet {
    /// セル範囲の先頭行をヘッダーとして必須列を解決する
    ///
    /// # 戻り値
    ///
    /// * `Ok(MappingSheet)` - すべての必須列が解決できた場合
    /// * `Err(MapCardError)` - 列が見つからない、またはあいまいな場合
    pub fn new(name: String, range: Range<Data>) -> Result<Self, MapCardError> {
        let headers: Vec<String> = range
            .rows()
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| CellValue::from_data(cell).as_text())
                    .collect()
            })
            .unwrap_or_default();

        let columns = resolve_columns(&headers)?;
        debug!(sheet = %name, ?columns, "mapping columns resolved");

        Ok(Self {
            name,
            range,
            columns,
        })
    }

    /// シート名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ヘッダー行より下の行を`RowRecord`として順に返す
    ///
    /// 3つの必須列がすべて空の行はスキップします。
    /// `Begin`が数値として解釈できない場合は0とし、`begin_coerced`を立てます。
    pub fn rows(&self) -> impl Iterator<Item = RowRecord> + '_ {
        let first_row = self.range.start().map(|(row, _)| row).unwrap_or(0);

        self.range
            .rows()
            .enumerate()
            .skip(1)
            .filter_map(move |(offset, row)| {
                let row_index = first_row + offset as u32;
                self.extract_record(row_index, row)
            })
    }

    fn extract_record(&self, row_index: u32, row: &[Data]) -> Option<RowRecord> {
        let cell = |role: ColumnRole| {
            row.get(self.columns.index_of(role))
                .map(CellValue::from_data)
                .unwrap_or(CellValue::Empty)
        };

        let begin = cell(ColumnRole::Begin);
        let field = cell(ColumnRole::BetaFieldName);
        let instructions = cell(ColumnRole::MappingInstructions);

        if begin.is_blank() && field.is_blank() && instructions.is_blank() {
            return None;
        }

        let (begin_value, begin_coerced) = match begin.as_number() {
            Some(n) => (n, false),
            None => {
                warn!(
                    sheet = %self.name,
                    row = row_index + 1,
                    value = %begin.as_text(),
                    "Begin value is not numeric, using 0"
                );
                (0.0, true)
            }
        };

        Some(RowRecord {
            row_index,
            begin: begin_value,
            begin_coerced,
            beta_field_name: field.as_text(),
            instructions: instructions.as_text(),
        })
    }
}
