//! NCANode command-line client.
//!
//! One subcommand per service operation. Success payloads are printed as
//! pretty JSON on stdout; normalized failures exit nonzero with the
//! service's message.

use clap::{Parser, Subcommand};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use ncanode_client::{
    ClientConfig, CmsSignOptions, ConfigOverrides, NcaNodeClient, ServiceResponse, SignerSpec,
    XmlSignOptions, TSA_GOST_POLICY,
};

#[derive(Parser)]
#[command(name = "ncanode")]
#[command(about = "Sign and verify documents through an NCANode service")]
#[command(long_about = "
NCANode client - remote signing and verification

EXAMPLES:
    # Verify XML signatures with OCSP revocation checking
    ncanode xml-verify signed.xml --ocsp

    # Sign an XML document
    ncanode xml-sign document.xml --key key.p12.b64 --password secret

    # Inspect a certificate chain
    ncanode x509-info leaf.pem.b64 issuer.pem.b64 --crl

    # Create and verify timestamps
    ncanode tsp-create payload.txt
    ncanode tsp-verify token.cms.b64

ENVIRONMENT VARIABLES:
    NCANODE_BASE_URL      Base URL for v1 endpoints (default http://localhost:14579)
    NCANODE_BASE_URL_V2   Base URL for v2 endpoints (default http://localhost:14578)
    NCANODE_TIMEOUT       Request timeout in seconds (default 30)
    RUST_LOG              Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Base URL for v1 endpoints (overrides NCANODE_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Base URL for v2 endpoints (overrides NCANODE_BASE_URL_V2)
    #[arg(long, global = true, value_name = "URL")]
    base_url_v2: Option<String>,

    /// Request timeout in seconds (overrides NCANODE_TIMEOUT)
    #[arg(long, global = true, value_name = "SECONDS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify XML digital signatures
    XmlVerify {
        /// XML document to verify
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Check certificate revocation via OCSP
        #[arg(long)]
        ocsp: bool,

        /// Check certificate revocation via CRL
        #[arg(long)]
        crl: bool,
    },

    /// Sign an XML document
    XmlSign {
        /// XML document to sign
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// File holding the base64 key material
        #[arg(short, long, value_name = "FILE")]
        key: PathBuf,

        /// Key password
        #[arg(short, long, value_name = "PASSWORD")]
        password: String,

        /// Key alias within the store
        #[arg(long, value_name = "ALIAS")]
        key_alias: Option<String>,

        /// Remove existing signatures before signing
        #[arg(long)]
        clear_signatures: bool,

        /// Trim the XML before signing
        #[arg(long)]
        trim_xml: bool,
    },

    /// Sign a SOAP message per WS-Security
    WsseSign {
        /// SOAP message to sign
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// File holding the base64 key material
        #[arg(short, long, value_name = "FILE")]
        key: PathBuf,

        /// Key password
        #[arg(short, long, value_name = "PASSWORD")]
        password: String,

        /// Key alias within the store
        #[arg(long, value_name = "ALIAS")]
        key_alias: Option<String>,

        /// Trim the XML before signing
        #[arg(long)]
        trim_xml: bool,
    },

    /// Inspect one or more certificates
    X509Info {
        /// Files holding base64 certificates, in chain order
        #[arg(value_name = "FILE", required = true)]
        certs: Vec<PathBuf>,

        /// Check certificate revocation via OCSP
        #[arg(long)]
        ocsp: bool,

        /// Check certificate revocation via CRL
        #[arg(long)]
        crl: bool,
    },

    /// Produce a CMS signature
    CmsSign {
        /// File holding the data to sign
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// File holding the base64 key material
        #[arg(short, long, value_name = "FILE")]
        key: PathBuf,

        /// Key password
        #[arg(short, long, value_name = "PASSWORD")]
        password: String,

        /// Key alias within the store
        #[arg(long, value_name = "ALIAS")]
        key_alias: Option<String>,

        /// Skip the embedded timestamp token
        #[arg(long)]
        no_tsp: bool,

        /// TSA policy identifier
        #[arg(long, value_name = "POLICY", default_value = TSA_GOST_POLICY)]
        tsa_policy: String,

        /// Produce a detached signature
        #[arg(long)]
        detached: bool,
    },

    /// Create a timestamp token
    TspCreate {
        /// File holding the data to timestamp
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Verify a timestamp inside a CMS blob
    TspVerify {
        /// File holding the base64 CMS blob
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = ClientConfig::resolve(ConfigOverrides {
        base_url: cli.base_url.clone(),
        base_url_v2: cli.base_url_v2.clone(),
        timeout_seconds: cli.timeout,
    })
    .into_diagnostic()?;
    let client = NcaNodeClient::with_config(config).into_diagnostic()?;

    let outcome = run_command(&client, cli.command)?;

    match outcome {
        ServiceResponse::Ok(payload) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).into_diagnostic()?
            );
            Ok(())
        }
        ServiceResponse::Failed(message) => Err(miette!("{message}")),
    }
}

fn run_command(client: &NcaNodeClient, command: Commands) -> Result<ServiceResponse> {
    let outcome = match command {
        Commands::XmlVerify { file, ocsp, crl } => {
            let xml = read_input(&file)?;
            client.xml_verify(&xml, ocsp, crl)
        }
        Commands::XmlSign {
            file,
            key,
            password,
            key_alias,
            clear_signatures,
            trim_xml,
        } => {
            let xml = read_input(&file)?;
            let options = XmlSignOptions {
                signers: signer_spec(&key, password, key_alias)?,
                clear_signatures,
                trim_xml,
            };
            client.xml_sign(&xml, &options)
        }
        Commands::WsseSign {
            file,
            key,
            password,
            key_alias,
            trim_xml,
        } => {
            let xml = read_input(&file)?;
            let key = read_input(&key)?;
            client.wsse_sign(&xml, &key, &password, key_alias.as_deref(), trim_xml)
        }
        Commands::X509Info { certs, ocsp, crl } => {
            let certs = certs
                .iter()
                .map(|path| read_input(path))
                .collect::<Result<Vec<_>>>()?;
            client.x509_info(certs, ocsp, crl)
        }
        Commands::CmsSign {
            file,
            key,
            password,
            key_alias,
            no_tsp,
            tsa_policy,
            detached,
        } => {
            let data = read_input(&file)?;
            let options = CmsSignOptions {
                signers: signer_spec(&key, password, key_alias)?,
                with_tsp: !no_tsp,
                tsa_policy,
                detached,
            };
            client.cms_sign(&data, &options)
        }
        Commands::TspCreate { file } => {
            let data = read_input(&file)?;
            client.tsp_create(&data)
        }
        Commands::TspVerify { file } => {
            let cms = read_input(&file)?;
            client.tsp_verify(&cms)
        }
    };

    outcome.into_diagnostic()
}

fn signer_spec(key_path: &Path, password: String, key_alias: Option<String>) -> Result<SignerSpec> {
    let key = read_input(key_path)?;
    Ok(match key_alias {
        Some(alias) => SignerSpec::single_with_alias(key, password, alias),
        None => SignerSpec::single(key, password),
    })
}

fn read_input(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    Ok(content.trim_end().to_string())
}
