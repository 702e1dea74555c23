//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::Cursor;
use tracing::debug;

use crate::api::{SheetInfo, WorkbookInfo};
use crate::error::MapCardError;
use crate::parser::MappingSheet;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// 1回の変換呼び出しの間だけ保持され、呼び出し終了時に破棄されます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX/XLS/XLSB/ODS）
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(MapCardError::MalformedWorkbook)` - スプレッドシートとして解析できない場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, MapCardError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// 対象シート名に一致するシートを1つだけ選ぶ
    ///
    /// # 引数
    ///
    /// * `expected` - 探索するシート名（大文字小文字・前後の空白を無視して比較）
    pub fn find_mapping_sheet(&self, expected: &str) -> Result<String, MapCardError> {
        select_sheet(&self.sheet_names(), expected)
    }

    /// MAPPINGシートを読み込み、必須列を解決する
    pub fn load_mapping_sheet(&mut self, expected: &str) -> Result<MappingSheet, MapCardError> {
        let name = self.find_mapping_sheet(expected)?;
        let range = self.workbook.worksheet_range(&name)?;
        debug!(sheet = %name, height = range.height(), width = range.width(), "mapping sheet loaded");
        MappingSheet::new(name, range)
    }

    /// 全シートの行数・列数・先頭行を収集する
    pub fn inspect(&mut self) -> Result<WorkbookInfo, MapCardError> {
        let mut sheets = Vec::new();
        for name in self.sheet_names() {
            let range = self.workbook.worksheet_range(&name)?;
            let column_names = range
                .rows()
                .next()
                .map(|row| {
                    row.iter()
                        .map(|cell| CellValue::from_data(cell).as_text())
                        .collect()
                })
                .unwrap_or_default();

            sheets.push(SheetInfo {
                name,
                rows: range.height(),
                columns: range.width(),
                column_names,
            });
        }

        Ok(WorkbookInfo {
            num_sheets: sheets.len(),
            sheets,
        })
    }
}

/// シート名の一覧から対象シートを選ぶ
///
/// 一致が0件、または2件以上の場合は`MapCardError::SheetNotFound`を返します。
pub(crate) fn select_sheet(names: &[String], expected: &str) -> Result<String, MapCardError> {
    let target = expected.trim().to_lowercase();
    let candidates: Vec<String> = names
        .iter()
        .filter(|name| name.trim().to_lowercase() == target)
        .cloned()
        .collect();

    match candidates.as_slice() {
        [single] => Ok(single.clone()),
        _ => Err(MapCardError::SheetNotFound {
            expected: expected.to_string(),
            candidates,
        }),
    }
}
