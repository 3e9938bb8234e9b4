use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ValidationError;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: Vec::new(),
        }
    }

    pub fn validation(err: &ValidationError) -> Self {
        let errors = err
            .violations()
            .iter()
            .map(|v| FieldError {
                field: v.field().to_string(),
                message: v.to_string(),
            })
            .collect();
        Self {
            detail: err.to_string(),
            errors,
        }
    }
}
