use serde::{Deserialize, Serialize};

/// How a symbol's history download ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    Fetched,
    Failed,
}

