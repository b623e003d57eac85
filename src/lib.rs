//! NCANode Client Library
//!
//! A client for the NCANode digital signature service: XML signature
//! signing and verification, WS-Security signing, X.509 certificate
//! inspection, CMS signing, and timestamp creation/verification. All
//! cryptographic work happens on the remote service; this crate builds the
//! request bodies and normalizes the heterogeneous responses into one
//! uniform outcome.
//!
//! ```no_run
//! use ncanode_client::{NcaNodeClient, ServiceResponse};
//!
//! fn main() -> ncanode_client::NcaNodeResult<()> {
//!     let client = NcaNodeClient::new()?;
//!     match client.xml_verify("<xml/>", true, false)? {
//!         ServiceResponse::Ok(report) => println!("{report}"),
//!         ServiceResponse::Failed(message) => eprintln!("rejected: {message}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{CmsSignOptions, NcaNodeClient, XmlSignOptions, TSA_GOST_POLICY};
pub use config::{ClientConfig, ConfigOverrides};
pub use error::{NcaNodeError, NcaNodeResult};
pub use response::FALLBACK_ERROR_MESSAGE;
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
pub use types::{CertInput, RevocationCheck, ServiceResponse, Signer, SignerSpec};
