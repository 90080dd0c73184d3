//! JSON downloads — pretty-printed snapshots of in-memory collections, served
//! as attachments named `<board>-YYYY-MM-DD.json`. No schema versioning.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Record;

#[derive(Debug, Clone)]
pub struct JsonExport {
    pub filename: String,
    pub body: String,
}

impl JsonExport {
    pub fn new<T: Serialize + ?Sized>(stem: &str, value: &T) -> Result<Self, AppError> {
        let body = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.into()))?;
        Ok(Self {
            filename: dated_filename(stem),
            body,
        })
    }

    /// Exports exactly the records passed in, in their in-memory shape.
    pub fn records<R: Record>(records: &[R]) -> Result<Self, AppError> {
        Self::new(R::BOARD, records)
    }
}

pub fn dated_filename(stem: &str) -> String {
    format!("{stem}-{}.json", Utc::now().format("%Y-%m-%d"))
}

impl IntoResponse for JsonExport {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}
