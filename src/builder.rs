//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::api::WorkbookInfo;
use crate::error::MapCardError;
use crate::formatter::LineFormatter;
use crate::output::ControlCard;
use crate::parser::WorkbookParser;
use crate::security::{read_input, SecurityConfig};

/// 既定の対象シート名
pub const DEFAULT_SHEET_NAME: &str = "MAPPING";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionConfig {
    /// 対象シート名（大文字小文字を無視して比較）
    pub sheet_name: String,

    /// 先頭にバナー行を出力するか
    pub include_header: bool,

    /// 入力サイズの制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            include_header: true,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use mapcard::ConverterBuilder;
///
/// # fn main() -> Result<(), mapcard::MapCardError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_name("Mapping")
///     .include_header(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 対象シート: `MAPPING`
    /// - バナー行: 出力する
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 対象シート名を指定する
    ///
    /// 比較は前後の空白と大文字小文字を無視して行います。
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.sheet_name = name.into();
        self
    }

    /// 先頭のバナー行を出力するかを指定する
    ///
    /// # 引数
    ///
    /// * `include: bool`:
    ///   * `true`: バナー行を出力する（デフォルト）
    ///   * `false`: フィールドマッピング行のみを出力する
    pub fn include_header(mut self, include: bool) -> Self {
        self.config.include_header = include;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合
    /// * `Err(MapCardError::Config)`: シート名が空、または入力サイズ上限が0の場合
    pub fn build(self) -> Result<Converter, MapCardError> {
        if self.config.sheet_name.trim().is_empty() {
            return Err(MapCardError::Config(
                "Sheet name must not be empty".to_string(),
            ));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(MapCardError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// MAPPINGシートを含むワークブックをコントロールカードに変換するための
/// メインエントリーポイントです。変換呼び出しごとにワークブックを開き直し、
/// 呼び出し間で状態を共有しません。
///
/// # 使用例
///
/// ```rust,no_run
/// use mapcard::ConverterBuilder;
///
/// # fn main() -> Result<(), mapcard::MapCardError> {
/// let converter = ConverterBuilder::new().build()?;
/// let card = converter.convert_path("Input1.xlsx")?;
/// println!("{}", card.to_text());
/// println!("{} field mappings", card.summary().field_mappings);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// 行フォーマッター
    formatter: LineFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: LineFormatter::new(),
            config,
        }
    }

    /// ワークブックをコントロールカードに変換
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込む（サイズ制限を適用）
    /// 2. MAPPINGシートの選択と必須列の解決
    /// 3. 各行のフォーマット（シートの行順）
    /// 4. バナーと集計値の付与
    ///
    /// # 戻り値
    ///
    /// * `Ok(ControlCard)` - 変換に成功した場合
    /// * `Err(MapCardError)` - エラーが発生した場合（部分的な出力は返しません）
    pub fn convert<R: Read>(&self, input: R) -> Result<ControlCard, MapCardError> {
        let buffer = read_input(input, &self.config.security)?;
        self.convert_buffer(buffer)
    }

    /// メモリ上のバイト列を変換
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<ControlCard, MapCardError> {
        self.convert(bytes)
    }

    /// ファイルパスを指定して変換
    pub fn convert_path(&self, path: impl AsRef<Path>) -> Result<ControlCard, MapCardError> {
        let file = File::open(path.as_ref())?;
        self.convert(file)
    }

    /// ワークブックを変換し、出力テキストを返す
    ///
    /// 結果は`convert(input)?.to_text()`と同一です。
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, MapCardError> {
        Ok(self.convert(input)?.to_text())
    }

    /// ワークブック内の全シートの概要を取得
    pub fn inspect<R: Read>(&self, input: R) -> Result<WorkbookInfo, MapCardError> {
        let buffer = read_input(input, &self.config.security)?;
        WorkbookParser::open(buffer)?.inspect()
    }

    fn convert_buffer(&self, buffer: Vec<u8>) -> Result<ControlCard, MapCardError> {
        let mut parser = WorkbookParser::open(buffer)?;
        let sheet = parser.load_mapping_sheet(&self.config.sheet_name)?;

        let mut records = Vec::new();
        let mut rows_processed = 0;
        let mut coerced = 0;
        for row in sheet.rows() {
            rows_processed += 1;
            if row.begin_coerced {
                coerced += 1;
            }
            records.extend(self.formatter.format_record(&row));
        }

        let card = ControlCard::assemble(
            self.config.include_header,
            records,
            rows_processed,
            coerced,
        );

        let summary = card.summary();
        info!(
            sheet = %sheet.name(),
            rows = summary.rows_processed,
            field_mappings = summary.field_mappings,
            total_lines = summary.total_lines,
            coerced_begin_values = summary.coerced_begin_values,
            "conversion finished"
        );

        Ok(card)
    }
}
