use crate::domain::model::{GatewayRequest, LookupRequest};
use crate::utils::error::{LookupError, Result};

pub const CADASTRAL_NUMBER_PARAM: &str = "cadastralNumber";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedRequest {
    /// CORS preflight; answered before any other check.
    Preflight,
    Lookup(LookupRequest),
}

pub fn validate_request(request: &GatewayRequest) -> Result<ValidatedRequest> {
    let method = request.method();

    if method == "OPTIONS" {
        return Ok(ValidatedRequest::Preflight);
    }

    if method != "GET" {
        return Err(LookupError::MethodNotAllowed {
            method: method.to_string(),
        });
    }

    match request.query_param(CADASTRAL_NUMBER_PARAM) {
        // no format check, malformed numbers are left for the upstream to reject
        Some(number) if !number.is_empty() => Ok(ValidatedRequest::Lookup(LookupRequest {
            cadastral_number: number.to_string(),
        })),
        _ => Err(LookupError::MissingParameter),
    }
}
