use thiserror::Error;

use crate::circuit::{Circuit, NUM_QUBITS};

/// Why a circuit was refused before leaving the editor. Mirrors the
/// backend's admission checks so a bad board fails fast locally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("circuit has no qubit lines")]
    TooFewQubits,
    #[error("circuit has more than {NUM_QUBITS} qubit lines")]
    TooManyQubits,
    #[error("qubit lines have unequal lengths")]
    InvalidRowLength,
    #[error("unknown gate symbol `{0}`")]
    InvalidGate(String),
}

/// Rejects empty, oversized, ragged, or unknown-symbol circuits. The
/// renderer stays lenient toward sparse boards; this runs on the send
/// path only.
pub fn validate_grid(circuit: &Circuit) -> Result<(), CircuitError> {
    if circuit.lines.is_empty() {
        return Err(CircuitError::TooFewQubits);
    }
    if circuit.lines.len() > NUM_QUBITS {
        return Err(CircuitError::TooManyQubits);
    }

    let row_length = circuit.lines[0].len();
    for line in &circuit.lines {
        if line.len() != row_length {
            return Err(CircuitError::InvalidRowLength);
        }
    }

    for line in &circuit.lines {
        for gate in line {
            if !is_valid_gate(gate) {
                return Err(CircuitError::InvalidGate(gate.clone()));
            }
        }
    }

    Ok(())
}

pub fn is_valid_gate(gate: &str) -> bool {
    matches!(
        gate,
        "I" | "H" | "X" | "Y" | "Z" | "T" | "S" | "Swap" | "C_down"
    )
}
