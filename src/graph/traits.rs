use async_trait::async_trait;

use super::types::GraphResponse;
use crate::error::RelayError;

/// The Graph API calls the relay makes.
///
/// Implementations return whatever upstream answered, error statuses
/// included. Only a transport failure is an `Err`; deciding what a status
/// means is left to the caller.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Exchange an Embedded Signup code for an access token.
    async fn exchange_code(
        &self,
        app_id: &str,
        app_secret: &str,
        code: &str,
    ) -> Result<GraphResponse, RelayError>;

    /// Businesses, their WABAs and phone numbers visible to `access_token`.
    async fn business_assets(&self, access_token: &str) -> Result<GraphResponse, RelayError>;

    /// Sent / delivered / read counts for one WABA.
    async fn analytics(&self, waba_id: &str, access_token: &str)
        -> Result<GraphResponse, RelayError>;

    async fn phone_numbers(
        &self,
        waba_id: &str,
        access_token: &str,
    ) -> Result<GraphResponse, RelayError>;
}
