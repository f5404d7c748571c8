/// Number of qubit lines on the board. The backend admits at most this
/// many, and the grid always renders exactly this many rows.
pub const NUM_QUBITS: usize = 6;

/// The symbol an emptied slot falls back to.
pub const IDENTITY: &str = "I";

/// Stored symbol for a control dot. Displayed as [`CONTROL_DISPLAY`].
pub const CONTROL: &str = "C_down";

/// Display name for a control dot.
pub const CONTROL_DISPLAY: &str = ".";

/// Stored and displayed symbol for a swap gate.
pub const SWAP: &str = "Swap";

/// A circuit is an ordered list of qubit lines, each an ordered list of
/// gate symbols; position along a line is the time step. Lines may be
/// short or missing entirely — readers treat those as empty, never as an
/// error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Circuit {
    pub lines: Vec<Vec<String>>,
}

impl Circuit {
    /// A board of `NUM_QUBITS` lines, each `steps` identity gates long.
    pub fn with_steps(steps: usize) -> Self {
        Circuit {
            lines: vec![vec![IDENTITY.to_string(); steps]; NUM_QUBITS],
        }
    }

    pub fn from_lines(lines: Vec<Vec<String>>) -> Self {
        Circuit { lines }
    }

    /// The line for `qubit`, or an empty slice when the circuit is
    /// shorter than the board.
    pub fn line(&self, qubit: usize) -> &[String] {
        self.lines.get(qubit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn gate_at(&self, qubit: usize, step: usize) -> Option<&str> {
        self.line(qubit).get(step).map(String::as_str)
    }

    /// Writes `symbol` at (qubit, step), growing the line (and the line
    /// list) with identity gates as needed.
    pub fn set_gate(&mut self, qubit: usize, step: usize, symbol: &str) {
        if self.lines.len() <= qubit {
            self.lines.resize_with(qubit + 1, Vec::new);
        }
        let line = &mut self.lines[qubit];
        if line.len() <= step {
            line.resize(step + 1, IDENTITY.to_string());
        }
        line[step] = symbol.to_string();
    }

    pub fn reset_gate(&mut self, qubit: usize, step: usize) {
        self.set_gate(qubit, step, IDENTITY);
    }

    /// Appends one identity step to every line.
    pub fn append_step(&mut self) {
        for line in &mut self.lines {
            line.push(IDENTITY.to_string());
        }
    }

    /// Length of the longest line.
    pub fn steps(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// What a stored symbol shows on its gate face. Controls are stored as
/// `C_down` but drawn as a dot.
pub fn display_name(symbol: &str) -> &str {
    if symbol == CONTROL { CONTROL_DISPLAY } else { symbol }
}
