//! HMAC-SHA256 authentication of CMS webhook deliveries.
//!
//! The CMS signs each payload with the shared webhook secret and sends the
//! result in the `x-bridge-signature-256` header as `sha256=<hex>`. Deliveries
//! are verified before their body is parsed.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

/// A raw HMAC-SHA256 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    /// Parses a `sha256=<hex>` header value.
    ///
    /// Returns `None` for anything malformed. Never panics.
    ///
    /// ```
    /// use headless_bridge::webhooks::Signature;
    ///
    /// assert!(Signature::parse_header("sha256=abcd1234").is_some());
    /// assert!(Signature::parse_header("abcd1234").is_none());
    /// assert!(Signature::parse_header("sha1=abcd1234").is_none());
    /// assert!(Signature::parse_header("sha256=xyz").is_none());
    /// ```
    pub fn parse_header(header: &str) -> Option<Self> {
        let hex_sig = header.trim().strip_prefix(PREFIX)?;
        hex::decode(hex_sig).ok().map(Signature)
    }

    /// Signs `payload` with `secret`.
    pub fn compute(payload: &[u8], secret: &[u8]) -> Self {
        let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
        mac.update(payload);
        Signature(mac.finalize().into_bytes().to_vec())
    }

    /// Formats the signature as a header value.
    pub fn to_header(&self) -> String {
        format!("{}{}", PREFIX, hex::encode(&self.0))
    }

    /// Checks this signature against `payload` in constant time.
    pub fn verify(&self, payload: &[u8], secret: &[u8]) -> bool {
        let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
            return false;
        };
        mac.update(payload);
        mac.verify_slice(&self.0).is_ok()
    }
}

/// Verifies a signature header against the payload and secret.
///
/// ```
/// use headless_bridge::webhooks::{Signature, verify_signature};
///
/// let header = Signature::compute(b"{}", b"secret").to_header();
/// assert!(verify_signature(b"{}", &header, b"secret"));
/// assert!(!verify_signature(b"{}", &header, b"other"));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    Signature::parse_header(signature_header).is_some_and(|sig| sig.verify(payload, secret))
}
