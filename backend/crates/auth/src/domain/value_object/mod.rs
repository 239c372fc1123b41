//! Value Object Module

pub mod email;
pub mod password;
pub mod refresh_token;
pub mod role;
pub mod username;
pub mod visibility;
