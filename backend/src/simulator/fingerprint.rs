//! Trajectory fingerprints
//!
//! A SHA-256 digest over a person's canonical JSON. Two runs from the same
//! seed must produce the same fingerprint; any divergence in a single draw
//! shows up as a different digest.

use sha2::{Digest, Sha256};

use crate::models::{Person, PersonSnapshot};
use crate::simulator::engine::SimulationError;

/// Hex-encoded SHA-256 of the person's serialized snapshot
pub fn fingerprint(person: &Person) -> Result<String, SimulationError> {
    let json = serde_json::to_string(&PersonSnapshot::from(person)).map_err(|e| {
        SimulationError::SerializationError(format!("Person serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
