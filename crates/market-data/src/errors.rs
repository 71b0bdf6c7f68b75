//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Variants are classified by [`is_transient`](Self::is_transient), which
/// callers use to decide how loudly to log and whether a later attempt can
/// reasonably be expected to succeed.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The upstream response did not contain a price for the requested
    /// asset/currency pair. This is a terminal error - retrying won't help.
    #[error("No price for {asset_id} in {currency}")]
    PriceNotFound {
        /// The asset that was requested
        asset_id: String,
        /// The currency that was requested
        currency: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success status, malformed
    /// body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true if this error is transient and a later attempt may
    /// succeed without any configuration change.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MarketDataError::RateLimited { .. }
                | MarketDataError::Timeout { .. }
                | MarketDataError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_not_found_is_terminal() {
        let error = MarketDataError::PriceNotFound {
            asset_id: "bitcoin".to_string(),
            currency: "KES".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_rate_limited_is_transient() {
        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_timeout_is_transient() {
        let error = MarketDataError::Timeout {
            provider: "COINGECKO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_provider_error_is_terminal() {
        let error = MarketDataError::ProviderError {
            provider: "COINGECKO".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::PriceNotFound {
            asset_id: "bitcoin".to_string(),
            currency: "KES".to_string(),
        };
        assert_eq!(format!("{}", error), "No price for bitcoin in KES");

        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: COINGECKO");
    }
}
