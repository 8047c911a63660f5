//! Account rotation, retry, and caching for the Twitter proxy. Every
//! upstream call goes through [`dispatch::fetch`], which draws credentials
//! from the shared [`pool::AccountPool`] and rotates them cooperatively on
//! rate-limit responses.

pub mod account;
pub mod api;
pub mod cache;
pub mod dispatch;
pub mod pool;
mod state;

pub use state::ProxyState;
