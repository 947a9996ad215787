use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ValidateAccountResponse {
    pub valid: bool,
}
