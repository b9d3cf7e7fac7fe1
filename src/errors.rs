// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Error Types for the Publish Core
//!
//! This module provides the error taxonomy for broker connectivity and
//! publishing. The `AmqpError` enum covers the dial, channel-open and
//! publish paths; every failure in this crate is returned as one of these
//! values and none of them panics.

use thiserror::Error;

/// Represents errors that can occur while connecting to the broker or
/// publishing a message.
///
/// Variants carry the underlying cause as text so the caller can render it
/// in a dialog or a log line without this crate deciding the presentation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AmqpError {
    /// The transport session to the broker could not be established
    /// (unreachable host, rejected credentials, protocol negotiation
    /// failure or dial timeout)
    #[error("failure to dial the broker: {0}")]
    Dial(String),

    /// The session was established but the channel could not be opened
    #[error("failure to open a channel: {0}")]
    ChannelOpen(String),

    /// A publish was attempted without a connected session; detected
    /// locally, never reaches the network
    #[error("not connected to the broker")]
    NotConnected,

    /// Channel-level failure while sending, including an expired publish
    /// deadline
    #[error("failure to publish: {0}")]
    Publish(String),

    /// The payload was rejected while building the request (not valid
    /// JSON or not serializable)
    #[error("invalid payload: {0}")]
    Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_cause() {
        assert_eq!(
            AmqpError::Dial("connection refused".to_owned()).to_string(),
            "failure to dial the broker: connection refused"
        );
        assert_eq!(
            AmqpError::ChannelOpen("resource limit".to_owned()).to_string(),
            "failure to open a channel: resource limit"
        );
        assert_eq!(
            AmqpError::Publish("channel closed".to_owned()).to_string(),
            "failure to publish: channel closed"
        );
    }

    #[test]
    fn not_connected_is_a_fixed_message() {
        assert_eq!(
            AmqpError::NotConnected.to_string(),
            "not connected to the broker"
        );
    }
}
