use crate::circuit::display_name;

// Every gate face is drawn into a fixed-size three-row cell sitting on a
// horizontal wire.
pub const CELL_W: usize = 8;
pub const GATE_NAME_W: usize = 4;

/// How a token is drawn. Selection order matters: a `.` name wins over a
/// `Swap` id, and everything else falls through to the labeled face —
/// the intended default, not an error path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVariant {
    ControlDot,
    SwapMarker,
    Label,
}

/// One draggable gate face: `id` is its identity in the drag session,
/// `name` what it shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateToken {
    pub id: String,
    pub name: String,
}

impl GateToken {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        GateToken { id: id.into(), name: name.into() }
    }

    /// Token for a stored circuit symbol: the symbol is both identity and
    /// (through its display name) the face.
    pub fn for_symbol(symbol: &str) -> Self {
        GateToken::new(symbol, display_name(symbol))
    }

    pub fn variant(&self) -> GateVariant {
        if self.name == "." {
            GateVariant::ControlDot
        } else if self.id == "Swap" {
            GateVariant::SwapMarker
        } else {
            GateVariant::Label
        }
    }

    /// The cell's three rows, each exactly `CELL_W` wide.
    pub fn glyphs(&self) -> [String; 3] {
        let blank = " ".repeat(CELL_W);
        let dash_l = (CELL_W - 1) / 2;
        let dash_r = CELL_W - dash_l - 1;

        match self.variant() {
            GateVariant::ControlDot => [
                blank.clone(),
                "─".repeat(dash_l) + "●" + &"─".repeat(dash_r),
                blank,
            ],
            GateVariant::SwapMarker => [
                blank,
                "─".repeat(dash_l) + "×" + &"─".repeat(dash_r),
                " ".repeat(dash_l) + "│" + &" ".repeat(dash_r),
            ],
            GateVariant::Label => {
                let margin = (CELL_W - GATE_NAME_W - 2) / 2;
                let rmargin = CELL_W - margin - GATE_NAME_W - 2;
                let name = pad_center(&self.name, GATE_NAME_W);
                [
                    " ".repeat(margin) + "┌" + &"─".repeat(GATE_NAME_W) + "┐" + &" ".repeat(rmargin),
                    "─".repeat(margin) + "┤" + &name + "├" + &"─".repeat(rmargin),
                    " ".repeat(margin) + "└" + &"─".repeat(GATE_NAME_W) + "┘" + &" ".repeat(rmargin),
                ]
            }
        }
    }
}

pub fn pad_center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let total = width - len;
    let left = total / 2;
    let right = total - left;
    " ".repeat(left) + s + &" ".repeat(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(row: &str) -> usize {
        row.chars().count()
    }

    #[test]
    fn dot_name_always_renders_control() {
        assert_eq!(GateToken::new("Swap", ".").variant(), GateVariant::ControlDot);
        assert_eq!(GateToken::new("42", ".").variant(), GateVariant::ControlDot);
        assert_eq!(GateToken::for_symbol("C_down").variant(), GateVariant::ControlDot);
    }

    #[test]
    fn swap_id_renders_swap_marker() {
        assert_eq!(GateToken::new("Swap", "Swap").variant(), GateVariant::SwapMarker);
        assert_eq!(GateToken::for_symbol("Swap").variant(), GateVariant::SwapMarker);
    }

    #[test]
    fn anything_else_is_a_label() {
        assert_eq!(GateToken::new("H", "H").variant(), GateVariant::Label);
        assert_eq!(GateToken::new("00", "X").variant(), GateVariant::Label);
        assert_eq!(GateToken::new("", "nonsense").variant(), GateVariant::Label);
    }

    #[test]
    fn glyph_rows_are_cell_sized() {
        for token in [
            GateToken::for_symbol("H"),
            GateToken::for_symbol("Swap"),
            GateToken::for_symbol("C_down"),
        ] {
            for row in token.glyphs() {
                assert_eq!(width(&row), CELL_W, "{row:?}");
            }
        }
    }

    #[test]
    fn faces_carry_their_marks() {
        let [_, dot_mid, _] = GateToken::for_symbol("C_down").glyphs();
        assert!(dot_mid.contains('●'));

        let [_, swap_mid, swap_bot] = GateToken::for_symbol("Swap").glyphs();
        assert!(swap_mid.contains('×'));
        assert!(swap_bot.contains('│'));

        let [_, label_mid, _] = GateToken::for_symbol("H").glyphs();
        assert!(label_mid.contains('H'));
    }

    #[test]
    fn long_names_are_clipped_to_the_face() {
        let token = GateToken::new("Rxyz", "Rxyzw");
        let [_, mid, _] = token.glyphs();
        assert_eq!(width(&mid), CELL_W);
        assert!(mid.contains("Rxyz"));
    }
}
