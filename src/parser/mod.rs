//! Parser Module
//!
//! calamineを使用したMAPPINGシートの抽出処理。
//! シートの選択、ヘッダーからの列解決、本体行の読み出しを行います。

mod columns;
mod mapping;
mod workbook;

pub(crate) use mapping::MappingSheet;
pub(crate) use workbook::WorkbookParser;
