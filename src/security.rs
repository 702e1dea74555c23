//! Security Module
//!
//! 入力ファイルの読み込み制限を実装するモジュール。

use std::io::Read;

use crate::error::MapCardError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// 入力全体をメモリに読み込む
///
/// 上限を1バイトでも超えた時点で読み込みを打ち切り、
/// `MapCardError::SecurityViolation`を返します。
///
/// # 引数
///
/// * `reader` - 入力元
/// * `config` - セキュリティ設定
pub(crate) fn read_input<R: Read>(
    reader: R,
    config: &SecurityConfig,
) -> Result<Vec<u8>, MapCardError> {
    let limit = config.max_input_file_size;
    let mut buffer = Vec::new();
    let bytes_read = reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut buffer)?;

    if bytes_read as u64 > limit {
        return Err(MapCardError::SecurityViolation(format!(
            "Input file size exceeds maximum: more than {} bytes",
            limit
        )));
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2_147_483_648);
    }

    #[test]
    fn test_read_input_within_limit() {
        let config = SecurityConfig {
            max_input_file_size: 4,
        };
        let data = read_input(Cursor::new(vec![1u8, 2, 3, 4]), &config).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_read_input_over_limit() {
        let config = SecurityConfig {
            max_input_file_size: 3,
        };
        let result = read_input(Cursor::new(vec![0u8; 10]), &config);
        assert!(matches!(result, Err(MapCardError::SecurityViolation(_))));
    }
}
