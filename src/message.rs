// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Publish Request
//!
//! The value type describing a single send: target exchange, routing key,
//! payload bytes and content type. Requests are transient, built per send
//! and handed to the publisher.

use crate::errors::AmqpError;
use serde::Serialize;

/// Default content type for published messages
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A single publish: exchange, routing key, payload and content type.
///
/// The content type defaults to [`JSON_CONTENT_TYPE`]; use
/// [`PublishRequest::content_type`] to override it for non-JSON payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub(crate) exchange: String,
    pub(crate) routing_key: String,
    pub(crate) body: Vec<u8>,
    pub(crate) content_type: String,
}

impl PublishRequest {
    /// Creates a request carrying `body` as given.
    pub fn new(exchange: &str, routing_key: &str, body: Vec<u8>) -> Self {
        PublishRequest {
            exchange: exchange.to_owned(),
            routing_key: routing_key.to_owned(),
            body,
            content_type: JSON_CONTENT_TYPE.to_owned(),
        }
    }

    /// Creates a request by serializing `payload` to JSON.
    pub fn json<T>(exchange: &str, routing_key: &str, payload: &T) -> Result<Self, AmqpError>
    where
        T: Serialize,
    {
        let body =
            serde_json::to_vec(payload).map_err(|err| AmqpError::Payload(err.to_string()))?;

        Ok(PublishRequest::new(exchange, routing_key, body))
    }

    /// Creates a request from payload text, rejecting anything that is not
    /// valid JSON.
    pub fn json_str(exchange: &str, routing_key: &str, payload: &str) -> Result<Self, AmqpError> {
        serde_json::from_str::<serde_json::Value>(payload)
            .map_err(|err| AmqpError::Payload(err.to_string()))?;

        Ok(PublishRequest::new(
            exchange,
            routing_key,
            payload.as_bytes().to_vec(),
        ))
    }

    /// Overrides the content type.
    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_owned();
        self
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_json_content_type() {
        let req = PublishRequest::new("logs", "info", b"{}".to_vec());

        assert_eq!(req.content_type, JSON_CONTENT_TYPE);
        assert_eq!(req.exchange(), "logs");
        assert_eq!(req.routing_key(), "info");
    }

    #[test]
    fn json_serializes_the_payload() {
        let req = PublishRequest::json("logs", "info", &json!({"msg": "hi"})).unwrap();

        assert_eq!(req.body(), br#"{"msg":"hi"}"#);
    }

    #[test]
    fn json_str_keeps_the_exact_bytes() {
        let req = PublishRequest::json_str("logs", "info", r#"{"msg":"hi"}"#).unwrap();

        assert_eq!(req.body(), br#"{"msg":"hi"}"#);
    }

    #[test]
    fn json_str_rejects_invalid_payloads() {
        let err = PublishRequest::json_str("logs", "info", "{not json").unwrap_err();

        assert!(matches!(err, AmqpError::Payload(_)));
    }

    #[test]
    fn content_type_can_be_overridden() {
        let req =
            PublishRequest::new("logs", "info", b"plain".to_vec()).content_type("text/plain");

        assert_eq!(req.content_type, "text/plain");
    }
}
