//! Control Card Header
//!
//! コントロールカード先頭の固定バナー。サンプル出力と1バイト単位で一致させる。

/// バナー行（19行）
pub(crate) const HEADER_LINES: [&str; 19] = [
    "***********************************************************************",
    "****",
    "**** DATA FILE FOR LPL/CUS PERSHING DEMO TRANSLATION",
    "****",
    "***********************************************************************",
    "****  FILE CONVERSION SUMMARY OF RECORD TYPES USED:",
    "****",
    "****  0000 - EDIT CONTROL FIELDS",
    "****",
    "***********************************************************************",
    "**** RECORD TYPE 0000 - EDIT CONTROL FIELDS",
    "****",
    "****   COL 06-09     FIELD STARTING POSITION",
    "****   COL 12-13     MAPPING OPTION (01 THRU 99)",
    "****   COL 16-30     DEFAULT VALUE #1 (IF APPLICABLE)",
    "****   COL 33-47     DEFAULT VALUE #2 (IF APPLICABLE)",
    "****   COL 50-72     DEMO FIELD NAME",
    "****",
    "**** ****  **  ***************  ***************  *** LEVEL 1 FIELDS  **",
];
