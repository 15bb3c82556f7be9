//! Authenticated request construction and signing.
//!
//! Every REST call goes through [`RequestSigner::sign`], which turns an ordered
//! parameter list into a [`SignedRequest`] ready for the HTTP transport.
//!
//! # Signing scheme
//!
//! For [`Security::Signed`] endpoints:
//!
//! 1. `timestamp` is appended from the [`Clock`] unless the caller already set one
//! 2. `recvWindow` is appended if one was supplied
//! 3. the parameters are serialized in insertion order as `key=value` pairs joined by `&`
//! 4. the signature is the lowercase hex HMAC-SHA256 of that string keyed by the API secret
//! 5. `signature` is appended as the final parameter
//!
//! The transmitted query string is exactly the signed payload followed by
//! `&signature=<hex>`, so any reordering between signing and sending is impossible.
//!
//! # Example
//!
//! ```
//! use binance_sdk::spot::signing::{Credentials, FixedClock, Params, RequestSigner, Security};
//!
//! let signer = RequestSigner::new(Some(Credentials::new("key", "secret")))
//!     .with_clock(FixedClock(1_499_827_319_559));
//!
//! let mut params = Params::new();
//! params.push("symbol", "ETHBTC");
//!
//! let signed = signer.sign(params, Security::Signed, None).unwrap();
//! assert!(signed.query().starts_with("symbol=ETHBTC&timestamp=1499827319559&signature="));
//! ```

use std::{fmt, sync::Arc};

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Largest `recvWindow` the exchange accepts, in milliseconds.
pub const MAX_RECV_WINDOW: u64 = 60_000;

const TIMESTAMP: &str = "timestamp";
const RECV_WINDOW: &str = "recvWindow";
const SIGNATURE: &str = "signature";

/// API credentials.
///
/// The secret is only ever used as the HMAC key: it is never sent, logged or
/// serialized, and the `Debug` output redacts it.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret: Option<String>,
}

impl Credentials {
    /// Creates credentials able to sign requests.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: Some(secret.into()),
        }
    }

    /// Creates key-only credentials.
    ///
    /// Enough for user data stream management and historical trades, but any
    /// [`Security::Signed`] call fails with [`Error::MissingCredentials`].
    pub fn api_key_only(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: None,
        }
    }

    /// Reads `BINANCE_API_KEY` and, if present, `BINANCE_API_SECRET`.
    ///
    /// Returns `None` when no key is set.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BINANCE_API_KEY").ok()?;
        Some(Self {
            api_key,
            secret: std::env::var("BINANCE_API_SECRET").ok(),
        })
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns true if a secret is configured.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.secret.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Endpoint security class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Security {
    /// Public endpoint, sent as is.
    #[display("none")]
    None,
    /// Needs the API key header but no signature.
    #[display("api-key")]
    ApiKey,
    /// Needs the API key header, a timestamp and a signature.
    #[display("signed")]
    Signed,
}

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync + 'static {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        Utc::now().timestamp_millis() as u64
    }
}

/// Clock frozen at a given millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> u64 + Send + Sync + 'static,
{
    fn now_millis(&self) -> u64 {
        self()
    }
}

/// Ordered request parameters.
///
/// Serialization follows insertion order; the exchange verifies signatures
/// against the exact string, so order is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Appends a parameter if `value` is set.
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Appends a mandatory parameter, failing if it is absent.
    pub fn required<V: ToString>(&mut self, key: &str, value: Option<V>) -> Result<&mut Self> {
        match value {
            Some(value) => Ok(self.push(key, value)),
            None => Err(Error::invalid(key, "is mandatory")),
        }
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes as `k1=v1&k2=v2`, values verbatim.
    ///
    /// [`RequestSigner::sign`] rejects values that would need percent-encoding,
    /// so this string is also what goes on the wire.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut out = String::new();
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Characters the transport sends unchanged and that cannot start a new
/// parameter. Anything else would make the transmitted query differ from
/// the signed payload.
fn is_query_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | ',' | '@' | '~' | '*')
}

fn check_query_safe(params: &Params) -> Result<()> {
    for (key, value) in params.iter() {
        if key.is_empty() || !key.chars().all(is_query_safe) {
            return Err(Error::invalid(key, "parameter name is not query-safe"));
        }
        if let Some(c) = value.chars().find(|c| !is_query_safe(*c)) {
            return Err(Error::invalid(
                key,
                format!("character {c:?} is not allowed in a query value"),
            ));
        }
    }
    Ok(())
}

/// Transport-ready request: final parameters plus the key header value.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: Params,
    api_key: Option<String>,
}

impl SignedRequest {
    /// Final parameters, `signature` last when signed.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Query string to transmit.
    #[must_use]
    pub fn query(&self) -> String {
        self.params.to_query()
    }

    /// Value for the [`API_KEY_HEADER`] header, if required.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The computed signature, if the request was signed.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.params.get(SIGNATURE)
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("params", &self.params)
            .field("api_key", &self.api_key.is_some())
            .finish()
    }
}

/// Computes the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign_payload(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    const_hex::encode(mac.finalize().into_bytes())
}

/// Builds [`SignedRequest`]s from parameters.
///
/// Stateless apart from its configuration; cheap to clone and safe to share.
#[derive(Clone)]
pub struct RequestSigner {
    credentials: Option<Credentials>,
    clock: Arc<dyn Clock>,
    recv_window: Option<u64>,
}

impl RequestSigner {
    /// Creates a signer using the system clock and no default `recvWindow`.
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
            recv_window: None,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(self, clock: impl Clock) -> Self {
        Self {
            clock: Arc::new(clock),
            ..self
        }
    }

    /// Sets the `recvWindow` applied to signed calls that do not supply one.
    pub fn with_recv_window(self, recv_window: Option<u64>) -> Self {
        Self {
            recv_window,
            ..self
        }
    }

    /// Returns the configured credentials.
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Turns `params` into a transport-ready request.
    ///
    /// `recv_window` overrides the signer default for this call only.
    pub fn sign(
        &self,
        mut params: Params,
        security: Security,
        recv_window: Option<u64>,
    ) -> Result<SignedRequest> {
        check_query_safe(&params)?;

        let api_key = match security {
            Security::None => None,
            Security::ApiKey | Security::Signed => Some(
                self.credentials
                    .as_ref()
                    .map(|creds| creds.api_key.clone())
                    .ok_or(Error::MissingCredentials("api key"))?,
            ),
        };

        if security.is_signed() {
            let secret = self
                .credentials
                .as_ref()
                .and_then(|creds| creds.secret.as_deref())
                .ok_or(Error::MissingCredentials("api secret"))?;

            if !params.contains(TIMESTAMP) {
                params.push(TIMESTAMP, self.clock.now_millis());
            }

            if !params.contains(RECV_WINDOW) {
                if let Some(window) = recv_window.or(self.recv_window) {
                    if window == 0 || window > MAX_RECV_WINDOW {
                        return Err(Error::invalid(
                            RECV_WINDOW,
                            format!("must be within 1..={MAX_RECV_WINDOW}, got {window}"),
                        ));
                    }
                    params.push(RECV_WINDOW, window);
                }
            }

            let signature = sign_payload(secret, &params.to_query());
            params.push(SIGNATURE, signature);
        }

        Ok(SignedRequest { params, api_key })
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("credentials", &self.credentials)
            .field("recv_window", &self.recv_window)
            .finish_non_exhaustive()
    }
}
