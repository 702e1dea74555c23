//! Formatter Module
//!
//! `RowRecord`を固定形式のコントロールカード行に変換するモジュール。
//! 行間で状態を共有しない純粋関数のみで構成されています。

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::api::{MappingOption, RowRecord};

/// フィールドマッピング行のレコードタイプ（COL 01-04）
pub(crate) const RECORD_TYPE: &str = "0000";

/// DEMOフィールド名の開始桁（1始まり）
pub(crate) const FIELD_NAME_COLUMN: usize = 50;

/// BETA → DEMO の接頭辞変換テーブル
pub(crate) const PREFIX_TABLE: [(&str, &str); 4] = [
    ("PER-", "DEMO-"),
    ("IRAS-", "DEMO-"),
    ("DIST-", "DEMO-"),
    ("DOCA-", "DEMO-"),
];

/// 開始位置の最大値（4桁）
const MAX_BEGIN: f64 = 9999.0;

/// 選択肢番号の最大値（2桁）
const MAX_OPTION: u8 = 99;

/// 行フォーマッター
///
/// 1つの`RowRecord`から、抽出した選択肢ごとに1行を生成します。
#[derive(Debug, Default)]
pub(crate) struct LineFormatter;

impl LineFormatter {
    /// 新しいLineFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// レコードを出力行に変換
    ///
    /// 行は選択肢番号の昇順に並びます。選択肢が無い場合も必ず1行（`01`）を返します。
    pub fn format_record(&self, record: &RowRecord) -> Vec<String> {
        let begin = normalize_begin(record.begin);
        let field = demo_field_name(&record.beta_field_name, &begin);
        let options = extract_options(&record.instructions);

        debug!(
            row = record.row_index + 1,
            begin = %begin,
            field = %field,
            options = options.len(),
            "record formatted"
        );

        options
            .iter()
            .map(|option| format_record_line(&begin, &option.code_str(), &field))
            .collect()
    }
}

/// 開始位置を4桁ゼロ埋めの文字列に正規化する
///
/// 小数部は切り捨て、範囲外の値は`0000`〜`9999`に丸めます。NaNは`0000`です。
///
/// # 使用例
///
/// ```rust
/// use mapcard::normalize_begin;
///
/// assert_eq!(normalize_begin(1.0), "0001");
/// assert_eq!(normalize_begin(23.9), "0023");
/// assert_eq!(normalize_begin(-4.0), "0000");
/// assert_eq!(normalize_begin(12345.0), "9999");
/// ```
pub fn normalize_begin(value: f64) -> String {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.trunc().clamp(0.0, MAX_BEGIN)
    };
    format!("{:04}", clamped as u16)
}

/// BETAフィールド名の接頭辞をDEMO形式に変換する
///
/// 変換は1回だけ行い、最も長く一致した接頭辞を採用します。
/// 既知の接頭辞が無い名前はそのまま返します。
///
/// # 使用例
///
/// ```rust
/// use mapcard::translate_field_name;
///
/// assert_eq!(translate_field_name("PER-NAME"), "DEMO-NAME");
/// assert_eq!(translate_field_name("OTHER-FIELD"), "OTHER-FIELD");
/// ```
pub fn translate_field_name(name: &str) -> String {
    PREFIX_TABLE
        .iter()
        .filter(|(from, _)| name.starts_with(*from))
        .max_by_key(|(from, _)| from.len())
        .map(|(from, to)| format!("{}{}", to, &name[from.len()..]))
        .unwrap_or_else(|| name.to_string())
}

/// 出力行に載せるDEMOフィールド名
///
/// BETAフィールド名が空の場合は`DEMO-POSITION-<開始位置>`を使います。
fn demo_field_name(beta_field_name: &str, begin: &str) -> String {
    if beta_field_name.is_empty() {
        format!("DEMO-POSITION-{}", begin)
    } else {
        translate_field_name(beta_field_name)
    }
}

fn option_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        // 行頭、または "." / ";" と空白の直後にある "<1-2桁の数字>." を選択肢の開始とみなす
        Regex::new(r"(?m)(?:^[ \t]*|([.;])[ \t]+)(\d{1,2})\.(?:[ \t]+|$)")
            .expect("option marker pattern is valid")
    })
}

/// 選択肢マーカーの位置
struct Marker {
    code: u8,
    /// 番号の開始位置（直前の選択肢の終端）
    start: usize,
    /// 指示文の開始位置
    text_start: usize,
    /// 行頭のマーカーか
    at_line_start: bool,
}

/// 指示文中の選択肢マーカーを出現順に列挙する
///
/// 検索は各マーカーの "." から再開するため、"1. 2. Copy" のように
/// 続けて並んだマーカーも両方検出されます。
fn scan_markers(instructions: &str) -> Vec<Marker> {
    let pattern = option_marker();
    let mut markers = Vec::new();
    let mut pos = 0;

    while let Some(caps) = pattern.captures_at(instructions, pos) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(2)) else {
            break;
        };
        // 番号の後の "." から再開し、その "." を次のマーカーの区切りとして使えるようにする
        pos = digits.end();

        if let Some(code) = digits
            .as_str()
            .parse::<u8>()
            .ok()
            .filter(|code| (1..=MAX_OPTION).contains(code))
        {
            markers.push(Marker {
                code,
                start: digits.start(),
                text_start: whole.end(),
                at_line_start: caps.get(1).is_none(),
            });
        }
    }

    // 列挙は行頭のマーカーから始まる。それより前の文中の "10." などは値の一部
    match markers.iter().position(|m| m.at_line_start) {
        Some(first) => markers.split_off(first),
        None => Vec::new(),
    }
}

/// マッピング指示から列挙された選択肢を抽出する
///
/// 列挙は行頭の "<番号>." から始まり、以降は行頭、または "." / ";" に続く
/// "<番号>." が次の選択肢になります。各選択肢の指示文は次の選択肢の直前までです。
/// 最初の選択肢より前の文は無視します。
/// 選択肢が1つも無い場合は、指示全体を暗黙の選択肢`01`として返します。
///
/// # 使用例
///
/// ```rust
/// use mapcard::extract_options;
///
/// let options = extract_options("1. Move value\n2. Validate length");
/// assert_eq!(options.len(), 2);
/// assert_eq!(options[0].code_str(), "01");
/// assert_eq!(options[1].fragment, "Validate length");
///
/// let options = extract_options("Just copy the value");
/// assert_eq!(options.len(), 1);
/// assert_eq!(options[0].code, 1);
///
/// let options = extract_options("Max length: 10. Pad left with zeros");
/// assert_eq!(options[0].code_str(), "01");
/// ```
pub fn extract_options(instructions: &str) -> Vec<MappingOption> {
    let markers = scan_markers(instructions);

    if markers.is_empty() {
        return vec![MappingOption {
            code: 1,
            fragment: instructions.trim().to_string(),
        }];
    }

    let mut options: Vec<MappingOption> = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let text_end = markers
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(instructions.len());
            MappingOption {
                code: marker.code,
                fragment: instructions[marker.text_start..text_end].trim().to_string(),
            }
        })
        .collect();

    // 同じ番号は出現順を保つ
    options.sort_by_key(|option| option.code);
    options
}

/// 1行分のコントロールカードを組み立てる
///
/// | 桁 | 内容 |
/// |----|------|
/// | 01-04 | レコードタイプ `0000` |
/// | 06-09 | 開始位置 |
/// | 12-13 | 選択肢番号 |
/// | 50- | DEMOフィールド名 |
///
/// それ以外の桁は空白です。行末に空白は付きません。
pub(crate) fn format_record_line(begin: &str, code: &str, field: &str) -> String {
    let head = format!("{} {}  {}", RECORD_TYPE, begin, code);
    format!("{:<width$}{}", head, field, width = FIELD_NAME_COLUMN - 1)
}
