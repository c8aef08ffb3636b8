//! PEM to PKCS12 trust-store conversion for secure transport
//!
//! The analysis binary is a native-image build of a Java runtime: it does
//! not honor trust configuration passed through environment variables, so a
//! custom CA bundle has to reach it as `-Djavax.net.ssl.*` arguments backed
//! by a PKCS12 store. Conversion shells out to system `openssl` (then
//! `keytool`); when neither is available or conversion fails, the trust
//! arguments are omitted silently and the binary reports its own transport
//! error.
//!
//! Generated stores are cached at a digest-derived path, so repeated calls
//! with the same certificate skip regeneration and concurrent requests
//! race benignly (temp-file + rename, content-addressed).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};

use crate::core::config::Config;

/// Well-known default password for throwaway trust stores.
const STORE_PASSWORD: &str = "changeit";

/// Trust-store CLI arguments for the analysis binary, or empty when no CA
/// bundle is configured / conversion is not possible.
pub fn ssl_cli_args(config: &Config) -> Vec<String> {
  let Some(pem_path) = &config.ca_bundle else {
    return Vec::new();
  };

  match create_truststore_from_pem(pem_path) {
    Some(store) => vec![
      format!("-Djavax.net.ssl.trustStore={}", store.display()),
      "-Djavax.net.ssl.trustStoreType=PKCS12".to_string(),
      format!("-Djavax.net.ssl.trustStorePassword={}", STORE_PASSWORD),
    ],
    None => Vec::new(),
  }
}

/// Convert a PEM bundle into a cached PKCS12 store.
///
/// Returns None on any failure: unreadable file, no certificate blocks,
/// no converter available, converter error. Never raises.
pub fn create_truststore_from_pem(pem_path: &Path) -> Option<PathBuf> {
  let pem = match fs::read(pem_path) {
    Ok(bytes) => bytes,
    Err(err) => {
      log::debug!("CA bundle {} unreadable: {}", pem_path.display(), err);
      return None;
    }
  };

  if !looks_like_pem(&pem) {
    log::debug!("CA bundle {} contains no certificate blocks", pem_path.display());
    return None;
  }

  let store_path = cached_store_path(&pem);
  if store_path.exists() {
    return Some(store_path);
  }

  convert(pem_path, &store_path)
}

/// Content-addressed cache location: same PEM bytes, same store path.
fn cached_store_path(pem: &[u8]) -> PathBuf {
  let digest = Sha256::digest(pem);
  let tag: String = digest.iter().take(8).map(|b| format!("{:02x}", b)).collect();
  env::temp_dir().join(format!("cq-truststore-{}.p12", tag))
}

fn looks_like_pem(bytes: &[u8]) -> bool {
  std::str::from_utf8(bytes)
    .map(|text| text.contains("-----BEGIN CERTIFICATE-----"))
    .unwrap_or(false)
}

/// Run the first available converter. The store is written to a sibling
/// temp path and renamed into place, so a concurrent request either sees
/// the finished file or recreates identical content.
fn convert(pem_path: &Path, store_path: &Path) -> Option<PathBuf> {
  let staging = store_path.with_extension(format!("p12.{}", std::process::id()));

  let converted = convert_with_openssl(pem_path, &staging) || convert_with_keytool(pem_path, &staging);
  if !converted {
    let _ = fs::remove_file(&staging);
    return None;
  }

  if let Err(err) = fs::rename(&staging, store_path) {
    log::debug!("could not move trust store into place: {}", err);
    let _ = fs::remove_file(&staging);
    // A concurrent request may have won the rename race
    return store_path.exists().then(|| store_path.to_path_buf());
  }

  Some(store_path.to_path_buf())
}

/// `openssl pkcs12 -export -nokeys` packages a cert-only bundle directly.
fn convert_with_openssl(pem_path: &Path, out: &Path) -> bool {
  run_converter(
    Command::new("openssl")
      .arg("pkcs12")
      .arg("-export")
      .arg("-nokeys")
      .arg("-in")
      .arg(pem_path)
      .arg("-out")
      .arg(out)
      .arg("-passout")
      .arg(format!("pass:{}", STORE_PASSWORD)),
    "openssl",
  ) && out.exists()
}

/// `keytool` ships with the same runtime family as the analysis binary, so
/// it is a plausible fallback where openssl is absent.
fn convert_with_keytool(pem_path: &Path, out: &Path) -> bool {
  run_converter(
    Command::new("keytool")
      .arg("-importcert")
      .arg("-noprompt")
      .arg("-file")
      .arg(pem_path)
      .arg("-keystore")
      .arg(out)
      .arg("-storetype")
      .arg("PKCS12")
      .arg("-storepass")
      .arg(STORE_PASSWORD)
      .arg("-alias")
      .arg("cq-bridge-ca"),
    "keytool",
  ) && out.exists()
}

fn run_converter(command: &mut Command, name: &str) -> bool {
  match command.output() {
    Ok(output) if output.status.success() => true,
    Ok(output) => {
      log::debug!(
        "{} conversion failed: {}",
        name,
        String::from_utf8_lossy(&output.stderr).trim()
      );
      false
    }
    Err(err) => {
      log::debug!("{} not available: {}", name, err);
      false
    }
  }
}
