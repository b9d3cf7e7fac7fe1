// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

mod otel;

pub mod channel;
pub mod errors;
pub mod message;
pub mod publisher;
pub mod session;

#[cfg(any(test, feature = "mocks"))]
pub use publisher::MockPublisher;
