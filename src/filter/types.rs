use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 25;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 500;
pub const DEFAULT_ORDER: &str = "id.asc";
pub const DEFAULT_SELECT: &str = "*";

/// Raw lookup parameters as they arrive on the query string.
///
/// Every field is kept as text so that malformed numbers fall back to
/// defaults instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterData {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub order: Option<String>,
    pub select: Option<String>,
    pub debug: Option<String>,
}

impl FilterData {
    pub fn debug_enabled(&self) -> bool {
        matches!(
            self.debug.as_deref().map(|d| d.trim().to_ascii_lowercase()).as_deref(),
            Some("1") | Some("true") | Some("yes") | Some("on")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_postgrest(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub fn to_postgrest(&self) -> &'static str {
        match self {
            NullsOrder::First => "nullsfirst",
            NullsOrder::Last => "nullslast",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
    pub nulls: Option<NullsOrder>,
}
