//! The NCANode client.
//!
//! Each operation builds its request body, issues exactly one blocking POST
//! through the transport and normalizes the result. Calls share no state,
//! so a client is safe to use from multiple threads.

use serde_json::Value;

use crate::config::{ClientConfig, ConfigOverrides};
use crate::error::{NcaNodeError, NcaNodeResult};
use crate::request;
use crate::response::{
    self, handle_response, handle_response_v2, handle_tsp_create_response,
};
use crate::transport::{HttpTransport, RawResponse, ReqwestTransport};
use crate::types::{CertInput, ServiceResponse, SignerSpec};

/// Default TSA policy identifier for CMS signing.
pub const TSA_GOST_POLICY: &str = "TSA_GOST_POLICY";

const XML_VERIFY_PATH: &str = "/xml/verify";
const XML_SIGN_PATH: &str = "/xml/sign";
const WSSE_SIGN_PATH: &str = "/wsse/sign";
const X509_INFO_PATH: &str = "/x509/info";
const CMS_SIGN_PATH: &str = "/cms/sign";
const TSP_CREATE_PATH: &str = "/tsp/create";
// The v2 endpoint multiplexes TSP methods behind one path; the envelope's
// `method` field selects the operation.
const TSP_VERIFY_PATH: &str = "/tsp/sign";

/// Options for [`NcaNodeClient::xml_sign`].
#[derive(Debug, Clone, Default)]
pub struct XmlSignOptions {
    pub signers: SignerSpec,
    pub clear_signatures: bool,
    pub trim_xml: bool,
}

/// Options for [`NcaNodeClient::cms_sign`]. Defaults request a TSP token
/// under the GOST policy, attached.
#[derive(Debug, Clone)]
pub struct CmsSignOptions {
    pub signers: SignerSpec,
    pub with_tsp: bool,
    pub tsa_policy: String,
    pub detached: bool,
}

impl Default for CmsSignOptions {
    fn default() -> Self {
        Self {
            signers: SignerSpec::default(),
            with_tsp: true,
            tsa_policy: TSA_GOST_POLICY.to_string(),
            detached: false,
        }
    }
}

/// Client for the NCANode signing and verification service.
pub struct NcaNodeClient {
    config: ClientConfig,
    transport: Box<dyn HttpTransport>,
}

impl NcaNodeClient {
    /// Create a client from environment configuration and defaults.
    pub fn new() -> NcaNodeResult<Self> {
        Self::with_config(ClientConfig::resolve(ConfigOverrides::default())?)
    }

    /// Create a client with an explicit, already-resolved configuration.
    pub fn with_config(config: ClientConfig) -> NcaNodeResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    /// Create a client over a custom transport. Used by tests and by hosts
    /// that bring their own HTTP stack.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Verify XML digital signatures.
    pub fn xml_verify(
        &self,
        xml: &str,
        verify_ocsp: bool,
        verify_crl: bool,
    ) -> NcaNodeResult<ServiceResponse> {
        let body = request::xml_verify_body(xml, verify_ocsp, verify_crl);
        self.dispatch(&self.config.base_url, XML_VERIFY_PATH, &body, handle_response)
    }

    /// Sign an XML document.
    ///
    /// # Errors
    ///
    /// [`NcaNodeError::MissingSigner`] before any network interaction when
    /// the options carry neither flat key material nor a signer list.
    pub fn xml_sign(&self, xml: &str, options: &XmlSignOptions) -> NcaNodeResult<ServiceResponse> {
        let body = request::xml_sign_body(
            xml,
            &options.signers,
            options.clear_signatures,
            options.trim_xml,
        )?;
        self.dispatch(&self.config.base_url, XML_SIGN_PATH, &body, handle_response)
    }

    /// Sign a SOAP message per WS-Security.
    pub fn wsse_sign(
        &self,
        xml: &str,
        key: &str,
        password: &str,
        key_alias: Option<&str>,
        trim_xml: bool,
    ) -> NcaNodeResult<ServiceResponse> {
        let body = request::wsse_sign_body(xml, key, password, key_alias, trim_xml);
        self.dispatch(&self.config.base_url, WSSE_SIGN_PATH, &body, handle_response)
    }

    /// Inspect one certificate or an ordered chain.
    pub fn x509_info(
        &self,
        certs: impl Into<CertInput>,
        verify_ocsp: bool,
        verify_crl: bool,
    ) -> NcaNodeResult<ServiceResponse> {
        let body = request::x509_info_body(certs.into(), verify_ocsp, verify_crl);
        self.dispatch(&self.config.base_url, X509_INFO_PATH, &body, handle_response)
    }

    /// Produce a CMS signature over `data`.
    ///
    /// # Errors
    ///
    /// Same signer precondition as [`NcaNodeClient::xml_sign`].
    pub fn cms_sign(&self, data: &str, options: &CmsSignOptions) -> NcaNodeResult<ServiceResponse> {
        let body = request::cms_sign_body(
            data,
            &options.signers,
            options.with_tsp,
            &options.tsa_policy,
            options.detached,
        )?;
        self.dispatch(&self.config.base_url, CMS_SIGN_PATH, &body, handle_response)
    }

    /// Create a timestamp token over `data`. On success the payload is the
    /// token string alone.
    pub fn tsp_create(&self, data: &str) -> NcaNodeResult<ServiceResponse> {
        let body = request::tsp_create_body(data);
        self.dispatch(
            &self.config.base_url,
            TSP_CREATE_PATH,
            &body,
            handle_tsp_create_response,
        )
    }

    /// Verify a timestamp inside a CMS blob via the v2 endpoint family.
    pub fn tsp_verify(&self, cms: &str) -> NcaNodeResult<ServiceResponse> {
        let body = request::tsp_verify_body(cms);
        self.dispatch(
            &self.config.base_url_v2,
            TSP_VERIFY_PATH,
            &body,
            handle_response_v2,
        )
    }

    /// Issue the POST and normalize the result. Transport-send failures are
    /// folded into the uniform `Failed` outcome with one error log; only
    /// undecodable bodies surface as `Err`.
    fn dispatch(
        &self,
        base_url: &str,
        path: &str,
        body: &Value,
        normalize: fn(RawResponse) -> ServiceResponse,
    ) -> NcaNodeResult<ServiceResponse> {
        let url = format!("{base_url}{path}");
        log::debug!("POST {url}");

        match self.transport.post_json(&url, body) {
            Ok(raw) => Ok(normalize(raw)),
            Err(NcaNodeError::Transport(message)) => Ok(response::failure_without_body(message)),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Transport stub answering every call with a fixed response and
    /// recording each POST. Clones share the call log.
    #[derive(Clone)]
    struct FixedTransport {
        status: u16,
        body: Value,
        calls: Arc<Mutex<Vec<(String, Value)>>>,
    }

    impl FixedTransport {
        fn ok(body: Value) -> Self {
            Self {
                status: 200,
                body,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HttpTransport for FixedTransport {
        fn post_json(&self, url: &str, body: &Value) -> NcaNodeResult<RawResponse> {
            self.calls.lock().unwrap().push((url.to_string(), body.clone()));
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn post_json(&self, _url: &str, _body: &Value) -> NcaNodeResult<RawResponse> {
            Err(NcaNodeError::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn test_urls_resolve_against_the_right_base() {
        let transport = FixedTransport::ok(json!({"status": 0}));
        let client =
            NcaNodeClient::with_transport(ClientConfig::default(), Box::new(transport.clone()));
        client.xml_verify("<xml/>", false, false).unwrap();
        client.tsp_verify("CMSBLOB").unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].0, "http://localhost:14579/xml/verify");
        assert_eq!(calls[1].0, "http://localhost:14578/tsp/sign");
    }

    #[test]
    fn test_missing_signer_never_reaches_transport() {
        let transport = FixedTransport::ok(json!({}));
        let client =
            NcaNodeClient::with_transport(ClientConfig::default(), Box::new(transport.clone()));

        let err = client.xml_sign("<xml/>", &XmlSignOptions::default()).unwrap_err();
        assert!(matches!(err, NcaNodeError::MissingSigner(_)));

        let err = client.cms_sign("data", &CmsSignOptions::default()).unwrap_err();
        assert!(matches!(err, NcaNodeError::MissingSigner(_)));

        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_transport_failure_becomes_failed_outcome() {
        let client =
            NcaNodeClient::with_transport(ClientConfig::default(), Box::new(FailingTransport));
        let outcome = client.xml_verify("<xml/>", false, false).unwrap();
        assert_eq!(
            outcome,
            ServiceResponse::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn test_cms_sign_default_options() {
        let options = CmsSignOptions::default();
        assert!(options.with_tsp);
        assert_eq!(options.tsa_policy, TSA_GOST_POLICY);
        assert!(!options.detached);
    }
}
