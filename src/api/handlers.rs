// Demo data handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;

use super::response;
use super::types::{DataRequest, DataResponse, MainRow, NestedItem};
use crate::logger;

/// POST /api/data
///
/// Renders the optional `input1`/`input2` fields into a fixed two-row
/// payload. An unparseable body is rejected with 400.
pub fn data(body: &Bytes) -> Response<Full<Bytes>> {
    let request: DataRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!("Rejected /api/data payload: {e}"));
            return response::bad_request("Invalid JSON body");
        }
    };

    response::json(StatusCode::OK, &build_data_response(&request))
}

/// GET /api/error
///
/// Always fails. Exists so clients can exercise their error paths.
pub fn simulated_error() -> Response<Full<Bytes>> {
    response::error_response(StatusCode::INTERNAL_SERVER_ERROR, "An error occurred")
}

fn build_data_response(request: &DataRequest) -> DataResponse {
    DataResponse {
        row1: MainRow {
            name: format!(
                "Main row with input1: {}",
                render_input(request.input1.as_ref())
            ),
        },
        row2: vec![
            NestedItem {
                item: format!(
                    "Nested item 1 with input2: {}",
                    render_input(request.input2.as_ref())
                ),
            },
            NestedItem {
                item: "Nested item 2".to_string(),
            },
        ],
    }
}

/// Render an optional JSON value for embedding in a message string.
///
/// Strings are inserted bare; anything else uses its compact JSON form,
/// and an absent field shows up as `null`.
fn render_input(input: Option<&Value>) -> String {
    match input {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
