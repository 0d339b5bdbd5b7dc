// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod compare;
pub mod openid;
pub mod session;
pub mod steam;

pub use openid::SteamOpenId;
pub use session::SessionStore;
pub use steam::SteamClient;
