//! Payment channels and the channel reference stored on fee payments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How a payment source collects money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    /// Cash at the counter.
    Cash,
    /// Scan-to-pay QR code.
    Qr,
}

impl PaymentMode {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Qr => "QR",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "QR" => Ok(Self::Qr),
            _ => Err(ChannelError::InvalidMode(s.to_string())),
        }
    }
}

/// Errors raised while validating payment sources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// Source name missing.
    #[error("Payment source name is required")]
    NameRequired,

    /// Unknown mode string.
    #[error("Invalid payment mode: {0}")]
    InvalidMode(String),

    /// QR source without an image reference.
    #[error("QR payment source requires a QR image")]
    QrImageRequired,
}

impl ChannelError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NameRequired => "NAME_REQUIRED",
            Self::InvalidMode(_) => "INVALID_PAYMENT_MODE",
            Self::QrImageRequired => "QR_IMAGE_REQUIRED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

/// A validated payment source ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentSource {
    /// Display name.
    pub name: String,
    /// Collection mode.
    pub mode: PaymentMode,
    /// QR image reference; always `None` for cash sources.
    pub qr_image: Option<String>,
}

impl NewPaymentSource {
    /// Validates raw form input.
    ///
    /// The QR reference is kept only for QR sources.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError` for a blank name, unknown mode, or a QR source
    /// without an image.
    pub fn parse(name: &str, mode: &str, qr_image: Option<&str>) -> Result<Self, ChannelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChannelError::NameRequired);
        }
        let mode: PaymentMode = mode.parse()?;
        let qr_image = qr_image
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(ToString::to_string);

        let qr_image = match mode {
            PaymentMode::Cash => None,
            PaymentMode::Qr => Some(qr_image.ok_or(ChannelError::QrImageRequired)?),
        };

        Ok(Self {
            name: name.to_string(),
            mode,
            qr_image,
        })
    }
}

/// Channel reference on a fee payment.
///
/// Rows written by this service always hold a source id. Rows imported from
/// older data may carry a free-text label instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SourceRef {
    /// Reference to a payment source row.
    SourceId(Uuid),
    /// Free-text channel name.
    RawLabel(String),
}

impl SourceRef {
    /// Builds a reference from the two nullable storage columns.
    ///
    /// The id column wins when both are set. Returns `None` when neither is.
    #[must_use]
    pub fn from_columns(source_id: Option<Uuid>, raw_label: Option<&str>) -> Option<Self> {
        match (source_id, raw_label) {
            (Some(id), _) => Some(Self::SourceId(id)),
            (None, Some(label)) if !label.trim().is_empty() => {
                Some(Self::RawLabel(label.trim().to_string()))
            }
            _ => None,
        }
    }

    /// Splits the reference back into storage columns.
    #[must_use]
    pub fn into_columns(self) -> (Option<Uuid>, Option<String>) {
        match self {
            Self::SourceId(id) => (Some(id), None),
            Self::RawLabel(label) => (None, Some(label)),
        }
    }

    /// Resolves a display label.
    ///
    /// Ids missing from `names` fall back to the raw id text.
    #[must_use]
    pub fn label(&self, names: &HashMap<Uuid, String>) -> String {
        match self {
            Self::SourceId(id) => names.get(id).cloned().unwrap_or_else(|| id.to_string()),
            Self::RawLabel(label) => label.clone(),
        }
    }
}

/// Label used when a payment carries no channel reference at all.
pub const UNKNOWN_CHANNEL: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CASH", PaymentMode::Cash)]
    #[case("cash", PaymentMode::Cash)]
    #[case(" QR ", PaymentMode::Qr)]
    fn test_mode_from_str(#[case] input: &str, #[case] expected: PaymentMode) {
        assert_eq!(input.parse::<PaymentMode>().unwrap(), expected);
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [PaymentMode::Cash, PaymentMode::Qr] {
            assert_eq!(mode.as_str().parse::<PaymentMode>().unwrap(), mode);
        }
        assert!("UPI".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_cash_source_drops_qr_image() {
        let source = NewPaymentSource::parse("Counter", "CASH", Some("qr/a.png")).unwrap();
        assert_eq!(source.mode, PaymentMode::Cash);
        assert_eq!(source.qr_image, None);
    }

    #[test]
    fn test_qr_source_keeps_image() {
        let source = NewPaymentSource::parse(" QR1 ", "QR", Some("qr/one.png")).unwrap();
        assert_eq!(source.name, "QR1");
        assert_eq!(source.qr_image.as_deref(), Some("qr/one.png"));
    }

    #[rstest]
    #[case("", "CASH", None, ChannelError::NameRequired)]
    #[case("QR1", "QR", None, ChannelError::QrImageRequired)]
    #[case("QR1", "QR", Some("  "), ChannelError::QrImageRequired)]
    #[case("X", "CARD", None, ChannelError::InvalidMode("CARD".into()))]
    fn test_invalid_sources(
        #[case] name: &str,
        #[case] mode: &str,
        #[case] qr: Option<&str>,
        #[case] expected: ChannelError,
    ) {
        assert_eq!(NewPaymentSource::parse(name, mode, qr), Err(expected));
    }

    #[test]
    fn test_source_ref_from_columns() {
        let id = Uuid::new_v4();
        assert_eq!(
            SourceRef::from_columns(Some(id), Some("ignored")),
            Some(SourceRef::SourceId(id))
        );
        assert_eq!(
            SourceRef::from_columns(None, Some("GPay")),
            Some(SourceRef::RawLabel("GPay".into()))
        );
        assert_eq!(SourceRef::from_columns(None, None), None);
    }

    #[test]
    fn test_label_falls_back_for_dangling_id() {
        let known = Uuid::new_v4();
        let dangling = Uuid::new_v4();
        let names = HashMap::from([(known, "CASH".to_string())]);

        assert_eq!(SourceRef::SourceId(known).label(&names), "CASH");
        assert_eq!(SourceRef::SourceId(dangling).label(&names), dangling.to_string());
        assert_eq!(SourceRef::RawLabel("Cheque".into()).label(&names), "Cheque");
    }
}
