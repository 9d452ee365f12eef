//! Pre-ingestion safety gate
//!
//! The gate inspects a file without parsing it: extension, size, a SHA-256
//! content hash, and a scan of the leading bytes for script or shell
//! signatures.
//!
//! The content scan is a best-effort heuristic. A clean report does not mean
//! the file is harmless, only that none of the known signatures appeared in
//! the scanned prefix.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::SafetyConfig;

/// Lowercase byte patterns that flag a file as suspicious, in match priority
pub const SUSPICIOUS_SIGNATURES: &[&str] = &[
    "<script",
    "javascript:",
    "vbscript:",
    "cmd.exe",
    "powershell",
    "/bin/sh",
    "wscript.shell",
    "shell.application",
    "activexobject",
    "createobject(",
];

const READ_CHUNK: usize = 64 * 1024;

/// Outcome of one safety check; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    is_safe: bool,
    issues: Vec<String>,
    content_hash: String,
    file_size_bytes: u64,
}

impl SafetyReport {
    fn new(issues: Vec<String>, content_hash: String, file_size_bytes: u64) -> Self {
        Self {
            is_safe: issues.is_empty(),
            issues,
            content_hash,
            file_size_bytes,
        }
    }

    /// True when no issue was found
    pub fn is_safe(&self) -> bool {
        self.is_safe
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Lowercase hex SHA-256 of the whole file, or `""` if it could not be read
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn file_size_bytes(&self) -> u64 {
        self.file_size_bytes
    }

    /// Consume the report, keeping only its issues
    pub fn into_issues(self) -> Vec<String> {
        self.issues
    }
}

/// Screens untrusted files before they are opened
#[derive(Debug, Clone, Default)]
pub struct SafetyGate {
    config: SafetyConfig,
}

impl SafetyGate {
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Inspect a file. Never fails; every problem becomes an issue.
    pub fn validate<P: AsRef<Path>>(&self, path: P) -> SafetyReport {
        let path = path.as_ref();

        let meta = match std::fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            _ => {
                return SafetyReport::new(
                    vec![format!("File not found: {}", path.display())],
                    String::new(),
                    0,
                )
            }
        };

        let mut issues = Vec::new();
        let size = meta.len();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !self.config.allows_extension(ext) {
            issues.push(format!("Unsupported file extension: .{}", ext.to_lowercase()));
        }

        if size > self.config.max_file_size_bytes {
            issues.push(format!(
                "File size {} bytes exceeds maximum of {} bytes",
                size, self.config.max_file_size_bytes
            ));
        }

        let content_hash = match self.hash_and_scan(path) {
            Ok((hash, head)) => {
                if let Some(sig) = find_signature(&head) {
                    issues.push(format!("Suspicious content detected: {}", sig));
                }
                hash
            }
            Err(e) => {
                issues.push(format!("Failed to read file: {}", e));
                String::new()
            }
        };

        if !issues.is_empty() {
            log::warn!("{} rejected by safety gate: {}", path.display(), issues.join("; "));
        }

        SafetyReport::new(issues, content_hash, size)
    }

    /// Stream the file through SHA-256, keeping the first `scan_bytes` bytes
    fn hash_and_scan(&self, path: &Path) -> io::Result<(String, Vec<u8>)> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut head = Vec::with_capacity(self.config.scan_bytes.min(READ_CHUNK));
        let mut buf = vec![0u8; READ_CHUNK];

        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);

            let wanted = self.config.scan_bytes.saturating_sub(head.len());
            head.extend_from_slice(&buf[..n.min(wanted)]);
        }

        Ok((format!("{:x}", hasher.finalize()), head))
    }
}

/// First signature, in priority order, present in the lossily decoded bytes
fn find_signature(head: &[u8]) -> Option<&'static str> {
    let text = String::from_utf8_lossy(head).to_lowercase();
    SUSPICIOUS_SIGNATURES
        .iter()
        .copied()
        .find(|sig| text.contains(sig))
}
