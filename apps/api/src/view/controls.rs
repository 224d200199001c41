use serde::{Deserialize, Serialize};

/// Category filter applied before the text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterBy {
    Saved,
    Remote,
    Onsite,
    #[default]
    #[serde(other)]
    All,
}

/// Sort order for the displayed list. Unknown keys deserialize to `Unsorted`,
/// which keeps the incoming order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    MatchScore,
    Company,
    JobTitle,
    PostedDate,
    #[serde(other)]
    Unsorted,
}
