use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures crossing the call-gateway boundary.
///
/// None of these ever reach a query caller: the client reduces every fault
/// to the query's default value and logs it. They exist so the gateway and
/// the logs can say precisely what went wrong.
#[derive(Debug, ThisError)]
pub enum GatewayError {
    #[error("Provider Absent: no procedure registered on {channel} {location}")]
    ProviderAbsent {
        channel: String,
        location: ErrorLocation,
    },

    #[error("Call Fault: {channel}: {message} {location}")]
    CallFault {
        channel: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Codec Error: {channel}: {message} {location}")]
    Codec {
        channel: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Subscription Error: {channel}: {message} {location}")]
    Subscription {
        channel: String,
        message: String,
        location: ErrorLocation,
    },
}

impl GatewayError {
    #[track_caller]
    pub fn provider_absent(channel: &str) -> Self {
        GatewayError::ProviderAbsent {
            channel: channel.to_string(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn call_fault(channel: &str, message: impl Into<String>) -> Self {
        GatewayError::CallFault {
            channel: channel.to_string(),
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    /// Payload did not match the shape the channel promises.
    #[track_caller]
    pub fn codec(channel: &str, error: &serde_json::Error) -> Self {
        GatewayError::Codec {
            channel: channel.to_string(),
            message: error.to_string(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn subscription(channel: &str, message: impl Into<String>) -> Self {
        GatewayError::Subscription {
            channel: channel.to_string(),
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }
}
