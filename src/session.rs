// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Queue Session
//!
//! An explicitly owned session replacing ambient connection state: the
//! caller holds one `QueueSession`, connects it at startup, reconnects it
//! when the broker URL changes and publishes through it on every send.
//!
//! The session is either disconnected or holds one connection with one
//! channel. `connect` and `close` take `&mut self` so there is a single
//! writer; `publish` takes `&self`. Callers issuing publishes from other
//! tasks must add their own lock, and a publish racing a reconnect may
//! fail with a channel-closed error once the old connection is torn down.

use crate::{
    channel::{new_queue_connection, ConnectOptions, QueueConnection},
    errors::AmqpError,
    message::PublishRequest,
    publisher::{AmqpPublisher, Publisher, DEFAULT_PUBLISH_TIMEOUT},
};
use opentelemetry::Context;
use std::time::Duration;
use tracing::{debug, warn};

struct SessionInner {
    connection: QueueConnection,
    publisher: AmqpPublisher,
}

/// The connection state of the publish core.
///
/// Starts disconnected; a publish in that state returns
/// [`AmqpError::NotConnected`] without touching the network.
pub struct QueueSession {
    options: ConnectOptions,
    publish_timeout: Duration,
    inner: Option<SessionInner>,
}

impl Default for QueueSession {
    fn default() -> Self {
        QueueSession::new()
    }
}

impl QueueSession {
    /// Creates a disconnected session with default options.
    pub fn new() -> Self {
        QueueSession {
            options: ConnectOptions::default(),
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
            inner: None,
        }
    }

    /// Sets the dial options used by [`QueueSession::connect`].
    pub fn with_options(mut self, options: ConnectOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the bound applied to each publish call.
    pub fn with_publish_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_some()
    }

    /// Connects the session to the broker at `url`, replacing any current
    /// connection.
    ///
    /// A blank `url` resolves to the local default endpoint. The old
    /// connection is closed before the new dial so a reconfiguration never
    /// leaks the previous socket. One attempt is made; on failure the
    /// session is left disconnected and the caller decides whether to
    /// retry.
    ///
    /// # Parameters
    /// * `url` - Broker URL, typically the value the operator saved in
    ///   settings
    ///
    /// # Returns
    /// Ok(()) once connected, `Dial` or `ChannelOpen` otherwise
    pub async fn connect(&mut self, url: &str) -> Result<(), AmqpError> {
        self.disconnect().await;

        let connection = new_queue_connection(url, &self.options).await?;
        let publisher =
            AmqpPublisher::new(connection.channel()).with_publish_timeout(self.publish_timeout);

        self.inner = Some(SessionInner {
            connection,
            publisher,
        });

        Ok(())
    }

    /// Closes the session, leaving it disconnected.
    pub async fn close(&mut self) {
        self.disconnect().await;
    }

    async fn disconnect(&mut self) {
        if let Some(inner) = self.inner.take() {
            debug!("closing amqp connection...");
            if let Err(err) = inner.connection.close().await {
                warn!(error = err.to_string(), "error closing the connection");
            }
        }
    }

    /// Publishes one message through the session.
    ///
    /// Returns [`AmqpError::NotConnected`] when no successful dial has
    /// happened yet, without any network round trip. Identical requests
    /// produce independent sends; nothing is deduplicated, confirmed or
    /// retried.
    pub async fn publish(&self, req: &PublishRequest) -> Result<(), AmqpError> {
        match &self.inner {
            None => Err(AmqpError::NotConnected),
            Some(inner) => inner.publisher.publish(&Context::current(), req).await,
        }
    }
}
