use thiserror::Error;

/// Coarse classification of a failed gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The network tool could not be executed at all
    Unavailable,
    /// The tool ran and reported a failure
    CommandFailed,
    /// The tool asked for credentials it did not have
    SecretsRequired,
    /// The call was rejected before reaching the tool
    InvalidArgument,
    /// The tool's output could not be understood
    Parse,
}

/// Error returned by every `NetworkGateway` call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

// nmcli prints these in English only; a localized system never matches them.
const SECRETS_SIGNATURES: &[&str] = &[
    "802-11-wireless-security.key-mgmt: property is missing",
    "secrets were required",
];

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build a command failure, promoting it to `SecretsRequired` when the
    /// tool output carries a missing-credentials signature.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        let kind = if SECRETS_SIGNATURES.iter().any(|sig| lowered.contains(sig)) {
            GatewayErrorKind::SecretsRequired
        } else {
            GatewayErrorKind::CommandFailed
        };
        Self { kind, message }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unavailable, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidArgument, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Parse, message)
    }

    pub fn is_secrets_required(&self) -> bool {
        self.kind == GatewayErrorKind::SecretsRequired
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Unified error type for airlink
#[derive(Error, Debug)]
pub enum AirlinkError {
    #[error("Network tool unavailable: {0}")]
    GatewayUnavailable(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Cannot identify {0}")]
    UnresolvedIdentifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

pub type AirlinkResult<T> = Result<T, AirlinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_signature_is_detected() {
        let err = GatewayError::classify(
            "nmcli command 'device wifi connect Home' failed: Error: Connection activation failed: Secrets were required, but not provided.",
        );
        assert_eq!(err.kind, GatewayErrorKind::SecretsRequired);

        let err = GatewayError::classify(
            "Error: 802-11-wireless-security.key-mgmt: property is missing.",
        );
        assert!(err.is_secrets_required());
    }

    #[test]
    fn other_failures_stay_generic() {
        let err = GatewayError::classify("Error: No network with SSID 'Cafe' found.");
        assert_eq!(err.kind, GatewayErrorKind::CommandFailed);
        assert_eq!(err.to_string(), "Error: No network with SSID 'Cafe' found.");
    }

    #[test]
    fn crate_error_wraps_gateway_error() {
        let err: AirlinkError = GatewayError::unavailable("nmcli not found").into();
        assert_eq!(err.to_string(), "nmcli not found");
        assert_eq!(
            AirlinkError::UnresolvedIdentifier("the profile to forget".into()).to_string(),
            "Cannot identify the profile to forget"
        );
    }
}
