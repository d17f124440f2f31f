//! Throwable gift id tables.
//!
//! Mirrors the service's catalog closely enough for presentation: free
//! stars/seeds, the paid catalog, and the per-ballot pseudo-gifts used while
//! a vote is open. Ids missing from the tables render as their number.

pub const FREE_GIFTS: &[(i64, &str)] = &[
    (1, "YELLOW_STAR"),
    (1001, "RED_STAR"),
    (1002, "PURPLE_STAR"),
    (1003, "GREEN_STAR"),
    (2, "BLUE_STAR"),
    (1601, "RAINBOW_STAR"),
    (1501, "YELLOW_SEED"),
    (1502, "RED_SEED"),
    (1503, "PURPLE_SEED"),
    (1504, "GREEN_SEED"),
    (1505, "BLUE_SEED"),
    (2309, "UNKNOWN_FREE_GIFT"),
    (2311, "UNKNOWN_FREE_GIFT_2"),
];

pub const PAID_GIFTS: &[(i64, &str)] = &[
    (4, "RED_DARUMA"),
    (1101, "YELLOW_DARUMA"),
    (1102, "PURPLE_DARUMA"),
    (1103, "GREEN_DARUMA"),
    (1104, "BLUE_DARUMA"),
    (3, "HEART"),
    (5, "ROSE"),
    (6, "COIN"),
    (20039, "SAKURA"),
    (7, "RACIMO"),
    (8, "FUROSHIKI"),
    (11, "IINE"),
    (12, "TAKO"),
    (13, "ICECREAM"),
    (2037, "VALENTINE_HEART"),
    (2038, "VALENTINE_CHOCO"),
    (2041, "WHITE_VALENTINE_CHOCO"),
    (700045, "DARUMA_FACE"),
    (700046, "DARUMA_CAN"),
    (600028, "AKB_MAMORI"),
    (600033, "STU_MAMORI"),
];

pub const BALLOT_GIFTS: &[(i64, &str)] = &[
    (10001, "BALLOT_01"),
    (10002, "BALLOT_02"),
    (10003, "BALLOT_03"),
    (10004, "BALLOT_04"),
    (10005, "BALLOT_05"),
    (10006, "BALLOT_06"),
    (10007, "BALLOT_07"),
    (10008, "BALLOT_08"),
    (10009, "BALLOT_09"),
    (10010, "BALLOT_10"),
    (10011, "BALLOT_11"),
    (10012, "BALLOT_12"),
    (10013, "BALLOT_13"),
    (10014, "BALLOT_14"),
    (10015, "BALLOT_15"),
    (10016, "BALLOT_16"),
    (10017, "BALLOT_17"),
    (10018, "BALLOT_18"),
    (10019, "BALLOT_19"),
    (10020, "BALLOT_20"),
    (10021, "BALLOT_21"),
];

fn lookup(table: &[(i64, &'static str)], id: i64) -> Option<&'static str> {
    table.iter().find(|(gift, _)| *gift == id).map(|(_, name)| *name)
}

/// Free and ballot throws are colored as costless.
pub fn is_free_item(id: i64) -> bool {
    lookup(FREE_GIFTS, id).is_some() || lookup(BALLOT_GIFTS, id).is_some()
}

/// Display name of a throwable item, falling back to the raw id.
pub fn throwable_item_name(id: i64) -> String {
    lookup(FREE_GIFTS, id)
        .or_else(|| lookup(PAID_GIFTS, id))
        .or_else(|| lookup(BALLOT_GIFTS, id))
        .map(str::to_owned)
        .unwrap_or_else(|| id.to_string())
}
