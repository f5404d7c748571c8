use crate::gate::GateToken;

#[derive(Clone, Debug)]
pub struct PaletteItem {
    pub name: &'static str,
    /// Stored symbol — also the drag identity of the palette button.
    pub symbol: &'static str,
}

/// The gate set the simulation backend accepts.
pub static GATE_PALETTE: &[PaletteItem] = &[
    PaletteItem { name: "Identity",  symbol: "I" },
    PaletteItem { name: "Hadamard",  symbol: "H" },
    PaletteItem { name: "Pauli-X",   symbol: "X" },
    PaletteItem { name: "Pauli-Y",   symbol: "Y" },
    PaletteItem { name: "Pauli-Z",   symbol: "Z" },
    PaletteItem { name: "T Gate",    symbol: "T" },
    PaletteItem { name: "Phase (S)", symbol: "S" },
    PaletteItem { name: "Swap",      symbol: "Swap" },
    PaletteItem { name: "Control",   symbol: "C_down" },
];

pub fn by_id(id: &str) -> Option<&'static PaletteItem> {
    GATE_PALETTE.iter().find(|item| item.symbol == id)
}

impl PaletteItem {
    pub fn token(&self) -> GateToken {
        GateToken::for_symbol(self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit;
    use crate::gate::GateVariant;
    use crate::validate::is_valid_gate;

    #[test]
    fn every_palette_symbol_is_admissible() {
        for item in GATE_PALETTE {
            assert!(is_valid_gate(item.symbol), "palette carries {}", item.symbol);
        }
    }

    #[test]
    fn lookup_by_drag_identity() {
        assert_eq!(by_id("Swap").map(|i| i.name), Some("Swap"));
        assert_eq!(by_id("C_down").map(|i| i.name), Some("Control"));
        assert!(by_id("31").is_none());
    }

    #[test]
    fn control_button_wears_the_dot() {
        let token = by_id(circuit::CONTROL).map(|i| i.token());
        assert_eq!(token.map(|t| t.variant()), Some(GateVariant::ControlDot));
    }
}
