use tracing::{debug, info, warn};

use crate::circuit::{Circuit, IDENTITY};
use crate::drag::DragLayer;
use crate::grid::{parse_slot_id, CircuitGrid};
use crate::palette::{self, GATE_PALETTE};
use crate::send::{CircuitSender, SendError, SendOutcome};
use crate::validate::validate_grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Grid,
    Palette,
}

/// Owns the canonical circuit. Everything below it renders from a
/// snapshot; edits come back up through [`App::set_circuit`], which
/// replaces the whole value and bumps the revision the grid's derivation
/// is keyed on.
pub struct App {
    pub circuit: Circuit,
    pub revision: u64,
    pub grid: CircuitGrid,
    pub drag: DragLayer,
    pub sender: Box<dyn CircuitSender>,

    pub focus: Focus,
    pub cursor_qubit: usize,
    pub cursor_step: usize,
    pub palette_idx: usize,
    pub status_msg: String,
    pub width: u16,
    pub height: u16,
}

impl App {
    pub fn new(steps: usize, sender: Box<dyn CircuitSender>) -> Self {
        App {
            circuit: Circuit::with_steps(steps),
            revision: 0,
            grid: CircuitGrid::new(),
            drag: DragLayer::new(),
            sender,
            focus: Focus::Grid,
            cursor_qubit: 0,
            cursor_step: 0,
            palette_idx: 0,
            status_msg: String::new(),
            width: 80,
            height: 24,
        }
    }

    /// Replaces the circuit wholesale. Always bumps the revision, so a
    /// structurally equal replacement still reads as a new value.
    pub fn set_circuit(&mut self, circuit: Circuit) {
        self.circuit = circuit;
        self.revision += 1;
        debug!(revision = self.revision, "circuit replaced");
    }

    /// Validates, then hands the board to the injected sender. Failures
    /// land in the status line and the log, never a panic.
    pub fn send_circuit(&mut self) {
        match self.try_send() {
            Ok(outcome) => {
                info!(steps = outcome.steps, "circuit accepted by backend");
                self.status_msg = format!("Sent — {} simulation steps", outcome.steps);
            }
            Err(e) => {
                warn!(error = %e, "send failed");
                self.status_msg = format!("Send failed: {e}");
            }
        }
    }

    fn try_send(&self) -> Result<SendOutcome, SendError> {
        validate_grid(&self.circuit)?;
        self.sender.send(&self.circuit)
    }

    /// Writes one slot and ships the new board.
    pub fn place_at(&mut self, qubit: usize, step: usize, symbol: &str) {
        let mut next = self.circuit.clone();
        next.set_gate(qubit, step, symbol);
        self.set_circuit(next);
        self.send_circuit();
    }

    pub fn clear_at(&mut self, qubit: usize, step: usize) {
        self.place_at(qubit, step, IDENTITY);
    }

    pub fn append_step(&mut self) {
        let mut next = self.circuit.clone();
        next.append_step();
        self.set_circuit(next);
    }

    /// Resolves a finished drag. Palette sources place their gate;
    /// slot sources move theirs, leaving identity behind; a drop outside
    /// any slot cancels.
    pub fn handle_drop(&mut self, source: &str, target: Option<&str>) {
        let Some(target) = target else {
            debug!(source, "drag canceled off-target");
            return;
        };
        let Some((tq, ts)) = parse_slot_id(target) else {
            return;
        };

        if let Some((sq, ss)) = parse_slot_id(source) {
            let Some(symbol) = self.circuit.gate_at(sq, ss).map(str::to_string) else {
                return;
            };
            debug!(source, target, "moving placed gate");
            let mut next = self.circuit.clone();
            next.set_gate(sq, ss, IDENTITY);
            next.set_gate(tq, ts, &symbol);
            self.set_circuit(next);
            self.send_circuit();
        } else if let Some(item) = palette::by_id(source) {
            debug!(gate = item.symbol, target, "placing palette gate");
            self.place_at(tq, ts, item.symbol);
        }
    }

    pub fn selected_palette_symbol(&self) -> &'static str {
        GATE_PALETTE[self.palette_idx.min(GATE_PALETTE.len() - 1)].symbol
    }

    // ── Cursor movement, clamped to the board ─────────────────────────────

    pub fn cursor_up(&mut self) {
        self.cursor_qubit = self.cursor_qubit.saturating_sub(1);
        self.clamp_cursor_step();
    }

    pub fn cursor_down(&mut self) {
        if self.cursor_qubit + 1 < crate::circuit::NUM_QUBITS {
            self.cursor_qubit += 1;
        }
        self.clamp_cursor_step();
    }

    pub fn cursor_left(&mut self) {
        self.cursor_step = self.cursor_step.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.circuit.line(self.cursor_qubit).len();
        if self.cursor_step + 1 < len {
            self.cursor_step += 1;
        }
    }

    fn clamp_cursor_step(&mut self) {
        let len = self.circuit.line(self.cursor_qubit).len();
        self.cursor_step = self.cursor_step.min(len.saturating_sub(1));
    }

    pub fn palette_left(&mut self) {
        self.palette_idx = self.palette_idx.saturating_sub(1);
    }

    pub fn palette_right(&mut self) {
        if self.palette_idx + 1 < GATE_PALETTE.len() {
            self.palette_idx += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sender double: records every board it is handed.
    struct RecordingSender {
        sends: Rc<RefCell<Vec<Circuit>>>,
        id: u64,
    }

    fn app_with_recorder(steps: usize) -> (App, Rc<RefCell<Vec<Circuit>>>) {
        let sends = Rc::new(RefCell::new(Vec::new()));
        let sender = RecordingSender { sends: Rc::clone(&sends), id: 99 };
        (App::new(steps, Box::new(sender)), sends)
    }

    impl CircuitSender for RecordingSender {
        fn send(&self, circuit: &Circuit) -> Result<SendOutcome, SendError> {
            self.sends.borrow_mut().push(circuit.clone());
            Ok(SendOutcome { steps: circuit.steps() + 1 })
        }

        fn identity(&self) -> u64 {
            self.id
        }
    }

    #[test]
    fn set_circuit_bumps_revision_even_for_equal_values() {
        let (mut app, _) = app_with_recorder(2);
        let same = app.circuit.clone();
        let before = app.revision;
        app.set_circuit(same);
        assert_eq!(app.revision, before + 1);
    }

    #[test]
    fn place_rewrites_one_cell_and_sends_once() {
        let (mut app, sends) = app_with_recorder(3);
        app.place_at(2, 1, "H");

        assert_eq!(app.circuit.gate_at(2, 1), Some("H"));
        let untouched = app
            .circuit
            .lines
            .iter()
            .enumerate()
            .flat_map(|(q, line)| line.iter().enumerate().map(move |(s, g)| (q, s, g.as_str())))
            .filter(|&(q, s, g)| !(q == 2 && s == 1) && g != IDENTITY)
            .count();
        assert_eq!(untouched, 0);

        assert_eq!(sends.borrow().len(), 1);
        assert_eq!(app.status_msg, "Sent — 4 simulation steps");
    }

    #[test]
    fn palette_drop_places_the_dragged_gate() {
        let (mut app, sends) = app_with_recorder(2);
        app.handle_drop("Swap", Some("41"));
        assert_eq!(app.circuit.gate_at(4, 1), Some("Swap"));
        assert_eq!(sends.borrow().len(), 1);
    }

    #[test]
    fn slot_drop_moves_the_gate_and_leaves_identity() {
        let (mut app, sends) = app_with_recorder(2);
        app.place_at(0, 0, "X");
        sends.borrow_mut().clear();

        app.handle_drop("00", Some("31"));
        assert_eq!(app.circuit.gate_at(0, 0), Some(IDENTITY));
        assert_eq!(app.circuit.gate_at(3, 1), Some("X"));
        assert_eq!(sends.borrow().len(), 1);
    }

    #[test]
    fn off_target_drop_changes_nothing() {
        let (mut app, sends) = app_with_recorder(2);
        let before = app.circuit.clone();
        let revision = app.revision;

        app.handle_drop("H", None);
        app.handle_drop("H", Some("99"));
        app.handle_drop("not-a-gate", Some("00"));

        assert_eq!(app.circuit, before);
        assert_eq!(app.revision, revision);
        assert!(sends.borrow().is_empty());
    }

    #[test]
    fn invalid_board_is_refused_before_the_wire() {
        let (mut app, sends) = app_with_recorder(2);
        let mut bad = app.circuit.clone();
        bad.set_gate(0, 0, "Q");
        app.set_circuit(bad);
        app.send_circuit();

        assert!(sends.borrow().is_empty());
        assert!(app.status_msg.starts_with("Send failed:"), "{}", app.status_msg);
        assert!(app.status_msg.contains("unknown gate symbol"), "{}", app.status_msg);
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let (mut app, _) = app_with_recorder(2);
        app.cursor_up();
        app.cursor_left();
        assert_eq!((app.cursor_qubit, app.cursor_step), (0, 0));

        for _ in 0..10 {
            app.cursor_down();
            app.cursor_right();
        }
        assert_eq!(app.cursor_qubit, crate::circuit::NUM_QUBITS - 1);
        assert_eq!(app.cursor_step, 1);
    }

    #[test]
    fn cursor_clamps_onto_short_lines() {
        let (mut app, _) = app_with_recorder(0);
        app.set_circuit(Circuit::from_lines(vec![
            vec!["I".to_string(), "I".to_string(), "I".to_string()],
            vec!["I".to_string()],
        ]));
        app.cursor_right();
        app.cursor_right();
        assert_eq!(app.cursor_step, 2);
        app.cursor_down();
        assert_eq!((app.cursor_qubit, app.cursor_step), (1, 0));
        // row 2 is absent: empty, cursor pins to step 0
        app.cursor_down();
        assert_eq!((app.cursor_qubit, app.cursor_step), (2, 0));
    }
}
