// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # OpenTelemetry Integration
//!
//! Propagates the caller's trace context into AMQP message headers so a
//! downstream consumer can pick the trace up. Only injection exists here;
//! this crate never consumes messages.

use lapin::types::{AMQPValue, ShortString};
use opentelemetry::propagation::Injector;
use std::collections::BTreeMap;

/// An adapter for injecting OpenTelemetry context into AMQP headers.
pub(crate) struct AmqpTracePropagator<'a> {
    headers: &'a mut BTreeMap<ShortString, AMQPValue>,
}

impl<'a> AmqpTracePropagator<'a> {
    pub(crate) fn new(headers: &'a mut BTreeMap<ShortString, AMQPValue>) -> Self {
        Self { headers }
    }
}

impl Injector for AmqpTracePropagator<'_> {
    /// Sets a trace context key-value pair in the outgoing message headers.
    fn set(&mut self, key: &str, value: String) {
        self.headers.insert(
            key.to_lowercase().into(),
            AMQPValue::LongString(value.into()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_lowercases_keys_and_stores_long_strings() {
        let mut headers = BTreeMap::default();
        let mut propagator = AmqpTracePropagator::new(&mut headers);

        propagator.set("Traceparent", "00-abc-def-01".to_owned());

        assert_eq!(
            headers.get(&ShortString::from("traceparent")),
            Some(&AMQPValue::LongString("00-abc-def-01".into()))
        );
    }
}
