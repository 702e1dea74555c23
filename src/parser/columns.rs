//! Column Resolution
//!
//! ヘッダー行から必須列を解決する宣言的なルールテーブル。

use tracing::debug;

use crate::api::ColumnRole;
use crate::error::MapCardError;

/// 1つの役割に対する列名の一致ルール
#[derive(Debug)]
pub(crate) struct ColumnRule {
    /// 対象の役割
    pub role: ColumnRole,
    /// 完全一致（大文字小文字を無視）する列名
    pub exact: &'static [&'static str],
    /// 部分一致する別名（優先順）
    pub aliases: &'static [&'static str],
}

/// 役割 → 許容する列名のテーブル
///
/// 別名は小文字で記述します。
pub(crate) const COLUMN_RULES: [ColumnRule; 3] = [
    ColumnRule {
        role: ColumnRole::Begin,
        exact: &["Begin"],
        aliases: &["begin", "start position"],
    },
    ColumnRule {
        role: ColumnRole::BetaFieldName,
        exact: &["BETA Field Name"],
        aliases: &["beta field", "field name"],
    },
    ColumnRule {
        role: ColumnRole::MappingInstructions,
        exact: &["Mapping Instructions for Programmer", "Mapping Instructions"],
        aliases: &["mapping instructions", "instructions"],
    },
];

/// 解決済みの列インデックス（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnSet {
    pub begin: usize,
    pub beta_field_name: usize,
    pub instructions: usize,
}

impl ColumnSet {
    /// 役割に対応する列インデックス
    pub fn index_of(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::Begin => self.begin,
            ColumnRole::BetaFieldName => self.beta_field_name,
            ColumnRole::MappingInstructions => self.instructions,
        }
    }
}

/// ヘッダー行から3つの必須列を解決する
///
/// 役割ごとに、完全一致 → 別名の部分一致の順で評価します。
/// 同じ段階で複数の列が一致した場合、または2つの役割が同じ列に
/// 解決された場合は`MapCardError::AmbiguousColumn`を返します。
///
/// # 戻り値
///
/// * `Ok(ColumnSet)` - すべての役割が解決できた場合
/// * `Err(MapCardError::ColumnNotFound)` - いずれかの役割が見つからない場合
pub(crate) fn resolve_columns(headers: &[String]) -> Result<ColumnSet, MapCardError> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let mut resolved = [0usize; 3];
    for (slot, rule) in resolved.iter_mut().zip(COLUMN_RULES.iter()) {
        *slot = resolve_role(rule, headers, &normalized)?;
    }

    for i in 0..resolved.len() {
        for j in 0..i {
            if resolved[i] == resolved[j] {
                return Err(MapCardError::AmbiguousColumn {
                    role: COLUMN_RULES[i].role,
                    headers: vec![headers[resolved[i]].clone()],
                });
            }
        }
    }

    Ok(ColumnSet {
        begin: resolved[0],
        beta_field_name: resolved[1],
        instructions: resolved[2],
    })
}

fn resolve_role(
    rule: &ColumnRule,
    headers: &[String],
    normalized: &[String],
) -> Result<usize, MapCardError> {
    let exact: Vec<usize> = normalized
        .iter()
        .enumerate()
        .filter(|(_, h)| rule.exact.iter().any(|name| **h == normalize_header(name)))
        .map(|(idx, _)| idx)
        .collect();

    if let Some(idx) = single_match(rule.role, &exact, headers)? {
        debug!(role = %rule.role, header = %headers[idx], "column resolved by exact match");
        return Ok(idx);
    }

    for alias in rule.aliases {
        let hits: Vec<usize> = normalized
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains(*alias))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(idx) = single_match(rule.role, &hits, headers)? {
            debug!(role = %rule.role, header = %headers[idx], alias = %alias, "column resolved by alias");
            return Ok(idx);
        }
    }

    Err(MapCardError::ColumnNotFound(rule.role))
}

fn single_match(
    role: ColumnRole,
    hits: &[usize],
    headers: &[String],
) -> Result<Option<usize>, MapCardError> {
    match hits {
        [] => Ok(None),
        [idx] => Ok(Some(*idx)),
        _ => Err(MapCardError::AmbiguousColumn {
            role,
            headers: hits.iter().map(|&idx| headers[idx].clone()).collect(),
        }),
    }
}

/// 前後の空白を除去し、連続する空白（改行を含む）を1つにまとめて小文字化する
fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
