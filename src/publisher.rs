// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Message Publisher
//!
//! This module provides fire-and-forget publishing to broker exchanges.
//! One publish frame is sent per request, without mandatory or immediate
//! flags and without delivery confirmation; a failed send is surfaced to
//! the caller and never retried or buffered. OpenTelemetry trace context
//! is carried in the message headers.

use crate::{errors::AmqpError, message::PublishRequest, otel::AmqpTracePropagator};
use async_trait::async_trait;
use lapin::{
    options::BasicPublishOptions,
    types::{AMQPValue, FieldTable, ShortString},
    BasicProperties, Channel,
};
use opentelemetry::{global, Context};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::error;
use uuid::Uuid;

/// Default bound on a single publish call.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Interface for publishing a single message to an exchange.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, ctx: &Context, req: &PublishRequest) -> Result<(), AmqpError>;
}

/// AMQP implementation of the [`Publisher`] trait.
///
/// Sends on the single channel of an established session. The channel is
/// driven from one caller at a time; concurrent senders need their own
/// synchronization around it.
pub struct AmqpPublisher {
    channel: Arc<Channel>,
    publish_timeout: Duration,
}

impl AmqpPublisher {
    /// Creates a publisher over an open channel.
    pub fn new(channel: Arc<Channel>) -> AmqpPublisher {
        AmqpPublisher {
            channel,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }

    /// Sets the bound after which an in-flight publish is abandoned.
    pub fn with_publish_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }
}

#[async_trait]
impl Publisher for AmqpPublisher {
    /// Publishes one message to the request's exchange and routing key.
    ///
    /// The send may block briefly on channel flow control but not past the
    /// publish timeout; when the bound expires the call is cancelled and a
    /// `Publish` error returned. Success means the frame was handed to the
    /// broker without confirmation, per the non-confirmed publish contract.
    ///
    /// # Parameters
    /// * `ctx` - OpenTelemetry context propagated in the message headers
    /// * `req` - Exchange, routing key, payload and content type
    ///
    /// # Returns
    /// Ok(()) on success or a `Publish` error on failure
    async fn publish(&self, ctx: &Context, req: &PublishRequest) -> Result<(), AmqpError> {
        let mut headers = BTreeMap::<ShortString, AMQPValue>::default();

        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(ctx, &mut AmqpTracePropagator::new(&mut headers))
        });

        let publishing = self.channel.basic_publish(
            &req.exchange,
            &req.routing_key,
            BasicPublishOptions {
                immediate: false,
                mandatory: false,
            },
            &req.body,
            BasicProperties::default()
                .with_content_type(ShortString::from(req.content_type.as_str()))
                .with_message_id(ShortString::from(Uuid::new_v4().to_string()))
                .with_headers(FieldTable::from(headers)),
        );

        match timeout(self.publish_timeout, publishing).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => {
                error!(error = err.to_string(), "error publishing message");
                Err(AmqpError::Publish(err.to_string()))
            }
            Err(_) => {
                error!(timeout = ?self.publish_timeout, "error publishing message");
                Err(AmqpError::Publish(format!(
                    "publish timed out after {:?}",
                    self.publish_timeout
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mocked_publisher_reports_success_to_its_caller() {
        let mut publisher = MockPublisher::new();
        publisher.expect_publish().returning(|_, _| Ok(()));

        let req = PublishRequest::new("logs", "info", b"{}".to_vec());
        let result = publisher.publish(&Context::current(), &req).await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn mocked_publisher_surfaces_channel_failures_verbatim() {
        let mut publisher = MockPublisher::new();
        publisher
            .expect_publish()
            .returning(|_, _| Err(AmqpError::Publish("channel closed".to_owned())));

        let req = PublishRequest::new("logs", "info", b"{}".to_vec());
        let err = publisher
            .publish(&Context::current(), &req)
            .await
            .unwrap_err();

        assert_eq!(err, AmqpError::Publish("channel closed".to_owned()));
    }
}
