// API type definitions
// Request/response payloads for the demo data endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body accepted by POST /api/data
///
/// Both fields are optional; any JSON value is accepted and rendered into
/// the response strings.
#[derive(Debug, Default, Deserialize)]
pub struct DataRequest {
    pub input1: Option<Value>,
    pub input2: Option<Value>,
}

/// Response payload for POST /api/data
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub row1: MainRow,
    pub row2: Vec<NestedItem>,
}

#[derive(Debug, Serialize)]
pub struct MainRow {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NestedItem {
    pub item: String,
}
