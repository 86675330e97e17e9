//! `BNWN1` envelope framing for packed lexicons.
//!
//! ## Layout
//!
//! ```text
//! offset  size  field
//! 0       5     magic "BNWN1"
//! 5       4     payload length L (u32, little-endian)
//! 9       L     UTF-8 JSON lexicon document
//! ```
//!
//! Buffers that do not start with the magic are read as a bare JSON
//! document. Packing ([`pack`]) canonicalizes the document first so the
//! same input always produces byte-identical output, which is what the
//! [`PackManifest`] digest relies on.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::snapshot::Lexicon;
use super::types::LexiconDocument;
use crate::error::{EnvelopeError, LexiconError, Result};

/// Envelope magic literal
pub const MAGIC: &[u8; 5] = b"BNWN1";

/// Magic plus the 4-byte length prefix
pub const HEADER_LEN: usize = MAGIC.len() + 4;

/// Digest algorithm recorded in manifests
pub const MANIFEST_ALGORITHM: &str = "sha256";

// =============================================================================
// Framing
// =============================================================================

/// Payload bytes located inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unframed<'a> {
    pub payload: &'a [u8],
    /// True when the buffer carried the `BNWN1` header
    pub framed: bool,
}

fn declared_len(bytes: &[u8]) -> std::result::Result<usize, EnvelopeError> {
    if bytes.len() < HEADER_LEN {
        return Err(EnvelopeError::Truncated {
            required: HEADER_LEN,
            found: bytes.len(),
        });
    }
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&bytes[MAGIC.len()..HEADER_LEN]);
    Ok(u32::from_le_bytes(prefix) as usize)
}

/// Locate the document payload in `bytes`.
///
/// Framed buffers must hold at least the header and the declared payload.
/// Trailing bytes past the payload are ignored.
pub fn unframe(bytes: &[u8]) -> std::result::Result<Unframed<'_>, EnvelopeError> {
    if !bytes.starts_with(MAGIC) {
        return Ok(Unframed {
            payload: bytes,
            framed: false,
        });
    }

    let declared = declared_len(bytes)?;
    let available = bytes.len() - HEADER_LEN;
    if declared > available {
        return Err(EnvelopeError::LengthOutOfRange {
            declared,
            available,
        });
    }

    Ok(Unframed {
        payload: &bytes[HEADER_LEN..HEADER_LEN + declared],
        framed: true,
    })
}

/// Wrap a payload in the `BNWN1` header.
pub fn frame(payload: &[u8]) -> std::result::Result<Vec<u8>, EnvelopeError> {
    let len = u32::try_from(payload.len()).map_err(|_| EnvelopeError::PayloadTooLarge {
        size: payload.len(),
    })?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Strict header check used for verification: the magic must be present
/// and the declared length must cover exactly the remaining bytes.
pub fn verify_header(bytes: &[u8]) -> std::result::Result<(), EnvelopeError> {
    if !bytes.starts_with(MAGIC) {
        let found = &bytes[..MAGIC.len().min(bytes.len())];
        return Err(EnvelopeError::MissingMagic {
            expected: String::from_utf8_lossy(MAGIC).into_owned(),
            found: String::from_utf8_lossy(found).into_owned(),
        });
    }
    let declared = declared_len(bytes)?;
    let actual = bytes.len() - HEADER_LEN;
    if declared != actual {
        return Err(EnvelopeError::LengthMismatch { declared, actual });
    }
    Ok(())
}

// =============================================================================
// Lexicon decode / encode
// =============================================================================

/// Decode a framed or bare lexicon buffer.
pub fn decode(bytes: &[u8]) -> Result<Lexicon> {
    let unframed = unframe(bytes)?;
    let text = std::str::from_utf8(unframed.payload)?;
    let document: LexiconDocument = serde_json::from_str(text)?;

    tracing::debug!(
        framed = unframed.framed,
        payload_bytes = unframed.payload.len(),
        synsets = document.synsets.len(),
        "decoded lexicon document"
    );

    Ok(Lexicon::from_document(document).with_digest(sha256_hex(unframed.payload)))
}

/// Frame a lexicon as-is: declaration order and raw relation lists are
/// preserved, so `decode(encode(x)) == x`.
pub fn encode(lexicon: &Lexicon) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(&lexicon.to_document())?;
    Ok(frame(&payload)?)
}

// =============================================================================
// Canonical packing
// =============================================================================

fn sorted_unique(values: &mut Vec<String>) {
    values.sort();
    values.dedup();
}

/// Sort and de-duplicate every list field, then sort synsets by id.
pub fn canonicalize(mut document: LexiconDocument) -> LexiconDocument {
    for synset in &mut document.synsets {
        sorted_unique(&mut synset.lemmas);
        sorted_unique(&mut synset.examples);
        sorted_unique(&mut synset.hypernyms);
        sorted_unique(&mut synset.hyponyms);
        sorted_unique(&mut synset.similar_to);
        sorted_unique(&mut synset.antonyms);
    }
    document.synsets.sort_by(|a, b| a.id.cmp(&b.id));
    document
}

/// Canonicalize and frame a document.
pub fn pack(document: LexiconDocument) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(&canonicalize(document))?;
    Ok(frame(&payload)?)
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Integrity record written next to a packed lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    pub algorithm: String,
    pub sha256: String,
    pub bytes: usize,
    pub synset_count: usize,
    pub source: String,
}

impl PackManifest {
    /// Describe already-packed bytes.
    pub fn for_packed(packed: &[u8], synset_count: usize, source: impl Into<String>) -> Self {
        Self {
            algorithm: MANIFEST_ALGORITHM.to_string(),
            sha256: sha256_hex(packed),
            bytes: packed.len(),
            synset_count,
            source: source.into(),
        }
    }
}

/// Check packed bytes against their manifest.
pub fn verify_pack(packed: &[u8], manifest: &PackManifest) -> Result<()> {
    verify_header(packed)?;

    if manifest.algorithm != MANIFEST_ALGORITHM {
        return Err(LexiconError::verification(format!(
            "unsupported manifest algorithm: {}",
            manifest.algorithm
        )));
    }
    let digest = sha256_hex(packed);
    if manifest.sha256 != digest {
        return Err(LexiconError::verification(format!(
            "sha256 mismatch: expected {}, got {}",
            manifest.sha256, digest
        )));
    }
    if manifest.bytes != packed.len() {
        return Err(LexiconError::verification(format!(
            "byte length mismatch: expected {}, got {}",
            manifest.bytes,
            packed.len()
        )));
    }
    Ok(())
}

/// Re-pack `source` and require byte equality with `packed`.
pub fn verify_repack(packed: &[u8], source: LexiconDocument) -> Result<()> {
    let repacked = pack(source)?;
    if repacked.len() != packed.len() {
        return Err(LexiconError::verification(format!(
            "determinism mismatch length: repacked={} packed={}",
            repacked.len(),
            packed.len()
        )));
    }
    if let Some(offset) = repacked.iter().zip(packed).position(|(a, b)| a != b) {
        return Err(LexiconError::verification(format!(
            "determinism mismatch at byte {}",
            offset
        )));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
