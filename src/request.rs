//! Request-body builders.
//!
//! One pure builder per operation. Builders are total functions of their
//! inputs except the two signing builders, which fail fast on a missing
//! signer before any network interaction is attempted.

use serde_json::{json, Value};

use crate::error::NcaNodeResult;
use crate::types::{CertInput, RevocationCheck, SignerSpec};

/// Body for `POST /xml/verify`.
pub fn xml_verify_body(xml: &str, verify_ocsp: bool, verify_crl: bool) -> Value {
    json!({
        "revocationCheck": RevocationCheck::set(verify_ocsp, verify_crl),
        "xml": xml,
    })
}

/// Body for `POST /xml/sign`.
pub fn xml_sign_body(
    xml: &str,
    signers: &SignerSpec,
    clear_signatures: bool,
    trim_xml: bool,
) -> NcaNodeResult<Value> {
    let signers = signers.resolve()?;
    Ok(json!({
        "xml": xml,
        "signers": signers,
        "clearSignatures": clear_signatures,
        "trimXml": trim_xml,
    }))
}

/// Body for `POST /wsse/sign`.
pub fn wsse_sign_body(
    xml: &str,
    key: &str,
    password: &str,
    key_alias: Option<&str>,
    trim_xml: bool,
) -> Value {
    json!({
        "key": key,
        "password": password,
        "keyAlias": key_alias,
        "xml": xml,
        "trimXml": trim_xml,
    })
}

/// Body for `POST /x509/info`.
pub fn x509_info_body(certs: CertInput, verify_ocsp: bool, verify_crl: bool) -> Value {
    json!({
        "revocationCheck": RevocationCheck::set(verify_ocsp, verify_crl),
        "certs": certs.into_list(),
    })
}

/// Body for `POST /cms/sign`.
pub fn cms_sign_body(
    data: &str,
    signers: &SignerSpec,
    with_tsp: bool,
    tsa_policy: &str,
    detached: bool,
) -> NcaNodeResult<Value> {
    let signers = signers.resolve()?;
    Ok(json!({
        "data": data,
        "signers": signers,
        "withTsp": with_tsp,
        "tsaPolicy": tsa_policy,
        "detached": detached,
    }))
}

/// Body for `POST /tsp/create`. The service takes the payload under an
/// `xml` field even though the data is an arbitrary string.
pub fn tsp_create_body(data: &str) -> Value {
    json!({ "xml": data })
}

/// Envelope for `POST /tsp/sign` on the v2 endpoint family. This operation
/// speaks the JSON-RPC envelope style even for a single call.
pub fn tsp_verify_body(cms: &str) -> Value {
    json!({
        "version": "1.0",
        "method": "TSP.verify",
        "params": { "cms": cms },
    })
}
