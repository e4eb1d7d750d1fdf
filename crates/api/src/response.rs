//! Shared response envelope for list endpoints.

use serde::Serialize;

/// `{ "data": T }` envelope wrapping collection responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
