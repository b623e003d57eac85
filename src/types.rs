//! Domain types for NCANode requests and responses.
//!
//! This module models the wire-facing value types: signer credentials,
//! revocation-check selection, certificate inputs and the uniform call
//! outcome shared by every operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NcaNodeError, NcaNodeResult};

/// One signing identity: base64 key material, its password and an optional
/// store alias.
///
/// Serializes with the service's camelCase field names; an absent alias is
/// sent as an explicit `"keyAlias": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub key: String,
    pub password: String,
    pub key_alias: Option<String>,
}

impl Signer {
    pub fn new(key: impl Into<String>, password: impl Into<String>) -> Self {
        Signer {
            key: key.into(),
            password: password.into(),
            key_alias: None,
        }
    }

    pub fn with_alias(
        key: impl Into<String>,
        password: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Signer {
            key: key.into(),
            password: password.into(),
            key_alias: Some(alias.into()),
        }
    }
}

/// Key material for a signing operation: either one implicit signer built
/// from flat key/password/alias values, or an explicit ordered signer list.
///
/// A default (empty) spec resolves to [`NcaNodeError::MissingSigner`] before
/// any request is constructed.
#[derive(Debug, Clone, Default)]
pub struct SignerSpec {
    pub key: Option<String>,
    pub password: Option<String>,
    pub key_alias: Option<String>,
    pub signers: Option<Vec<Signer>>,
}

impl SignerSpec {
    /// Flat single-signer material without an alias.
    pub fn single(key: impl Into<String>, password: impl Into<String>) -> Self {
        SignerSpec {
            key: Some(key.into()),
            password: Some(password.into()),
            ..SignerSpec::default()
        }
    }

    /// Flat single-signer material with a key alias.
    pub fn single_with_alias(
        key: impl Into<String>,
        password: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        SignerSpec {
            key: Some(key.into()),
            password: Some(password.into()),
            key_alias: Some(alias.into()),
            signers: None,
        }
    }

    /// Explicit ordered signer list.
    pub fn list(signers: Vec<Signer>) -> Self {
        SignerSpec {
            signers: Some(signers),
            ..SignerSpec::default()
        }
    }

    /// Resolve to the signer list that goes on the wire.
    ///
    /// An explicit non-empty list wins; otherwise flat key material becomes a
    /// one-element list. Neither present is a precondition failure.
    pub(crate) fn resolve(&self) -> NcaNodeResult<Vec<Signer>> {
        if let Some(signers) = &self.signers {
            if !signers.is_empty() {
                return Ok(signers.clone());
            }
        }

        if let Some(key) = &self.key {
            return Ok(vec![Signer {
                key: key.clone(),
                password: self.password.clone().unwrap_or_default(),
                key_alias: self.key_alias.clone(),
            }]);
        }

        Err(NcaNodeError::MissingSigner(
            "either key or signers must be provided".to_string(),
        ))
    }
}

/// Certificate revocation checking mechanisms supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RevocationCheck {
    Ocsp,
    Crl,
}

impl RevocationCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationCheck::Ocsp => "OCSP",
            RevocationCheck::Crl => "CRL",
        }
    }

    /// Build the revocation-check set from the two independent flags.
    /// Order is fixed: OCSP before CRL. The set is serialized as-is into
    /// request bodies, so the order is part of the wire surface.
    pub fn set(verify_ocsp: bool, verify_crl: bool) -> Vec<RevocationCheck> {
        let mut checks = Vec::with_capacity(2);
        if verify_ocsp {
            checks.push(RevocationCheck::Ocsp);
        }
        if verify_crl {
            checks.push(RevocationCheck::Crl);
        }
        checks
    }
}

/// Certificate input for [`crate::NcaNodeClient::x509_info`]: one base64
/// certificate or an ordered chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertInput {
    Single(String),
    Many(Vec<String>),
}

impl CertInput {
    /// Normalize to the list form the service expects; a single certificate
    /// becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            CertInput::Single(cert) => vec![cert],
            CertInput::Many(certs) => certs,
        }
    }
}

impl From<&str> for CertInput {
    fn from(cert: &str) -> Self {
        CertInput::Single(cert.to_string())
    }
}

impl From<String> for CertInput {
    fn from(cert: String) -> Self {
        CertInput::Single(cert)
    }
}

impl From<Vec<String>> for CertInput {
    fn from(certs: Vec<String>) -> Self {
        CertInput::Many(certs)
    }
}

impl From<&[String]> for CertInput {
    fn from(certs: &[String]) -> Self {
        CertInput::Many(certs.to_vec())
    }
}

/// Uniform outcome of a remote call.
///
/// `Ok` carries the full decoded response body (the timestamp-creation
/// operation narrows this to the token string); `Failed` carries the
/// service's human-readable failure message. Transport-level details never
/// leak through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    Ok(Value),
    Failed(String),
}

impl ServiceResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, ServiceResponse::Ok(_))
    }

    /// The success payload, if any.
    pub fn ok(self) -> Option<Value> {
        match self {
            ServiceResponse::Ok(value) => Some(value),
            ServiceResponse::Failed(_) => None,
        }
    }

    /// The failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            ServiceResponse::Ok(_) => None,
            ServiceResponse::Failed(message) => Some(message),
        }
    }
}
