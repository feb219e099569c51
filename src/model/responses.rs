/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/10/26
******************************************************************************/
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// `{"success": .., "value": ..}` wrapper used by the JSON APIs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    /// False when the server could not satisfy the request
    #[serde(default = "default_success")]
    pub success: bool,
    /// Payload
    pub value: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Returns the payload, failing when the server flagged an error or sent none
    pub fn into_value(self) -> Result<T, AppError> {
        if !self.success {
            return Err(AppError::Deserialization(
                "server reported success=false".to_string(),
            ));
        }
        self.value
            .ok_or_else(|| AppError::Deserialization("response has no value".to_string()))
    }
}
