//! JSON extractor that treats unusable bodies as `{}`

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ServerError;

/// Like `axum::Json`, but an empty, malformed or mistyped body decodes to
/// `T::default()` instead of being rejected. Only a body that cannot be
/// read at all is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
        Ok(LenientJson(decode_lenient(&bytes)))
    }
}

pub fn decode_lenient<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unusable JSON body, treating as empty: {}", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::EstimateRequest;
    use quote_pdf::PresentationRequest;

    #[test]
    fn test_empty_body_is_default() {
        let req: EstimateRequest = decode_lenient(b"");
        assert_eq!(req, EstimateRequest::default());
        let req: PresentationRequest = decode_lenient(b"  \n");
        assert_eq!(req, PresentationRequest::default());
    }

    #[test]
    fn test_malformed_body_is_default() {
        let req: EstimateRequest = decode_lenient(b"{\"lines\": [");
        assert_eq!(req, EstimateRequest::default());
        let req: EstimateRequest = decode_lenient(b"null");
        assert_eq!(req, EstimateRequest::default());
        let req: PresentationRequest = decode_lenient(b"[1, 2, 3]");
        assert_eq!(req, PresentationRequest::default());
    }

    #[test]
    fn test_valid_body_decodes() {
        let req: EstimateRequest = decode_lenient(br#"{"lines": [{"code": "K-01"}]}"#);
        assert_eq!(req.lines.len(), 1);
    }
}
