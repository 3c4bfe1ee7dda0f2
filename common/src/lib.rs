//! Wire types shared between the sweeper server and its clients.

pub mod models;
pub mod protocol;
