//! Meta Graph API collaborator.

mod client;
mod traits;
mod types;

pub use client::GraphClient;
pub use traits::GraphApi;
pub use types::{
    require, AuthRequest, GraphResponse, StatsResponse, TokenResponse, WabaQuery,
};
