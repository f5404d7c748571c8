use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Focus};
use crate::gate::{CELL_W, GateToken, GateVariant, pad_center};
use crate::grid::parse_slot_id;
use crate::palette::{self, GATE_PALETTE};

// ── Colors ─────────────────────────────────────────────────────────────────

const BLUE: Color = Color::Rgb(122, 162, 247);
const GREEN: Color = Color::Rgb(158, 206, 106);
const ORANGE: Color = Color::Rgb(255, 158, 100);
const CYAN: Color = Color::Rgb(115, 218, 202);
const YELLOW: Color = Color::Rgb(224, 175, 104);
const DIM: Color = Color::Rgb(86, 95, 137);
const DARK_BLUE: Color = Color::Rgb(192, 202, 245);

// ── Layout constants ────────────────────────────────────────────────────────

const LABEL_W: usize = 6; // "|0⟩ ──"
const PALETTE_H: u16 = 6;
const CTRL_H: u16 = 3;

// ── Main render entry point ─────────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();
    app.width = size.width;
    app.height = size.height;

    app.drag.begin_frame();

    let avail = size.height.saturating_sub(PALETTE_H + CTRL_H).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(avail),
            Constraint::Length(PALETTE_H),
            Constraint::Length(CTRL_H),
        ])
        .split(size);

    render_circuit_panel(f, app, chunks[0]);
    render_palette_panel(f, app, chunks[1]);
    render_controls_panel(f, app, chunks[2]);
    render_drag_overlay(f, app);
}

// ── Circuit Panel ─────────────────────────────────────────────────────────────

fn render_circuit_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let active = app.focus == Focus::Grid;
    let border_color = if active { ORANGE } else { BLUE };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            "Quantum Circuit",
            Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let max_steps = width.saturating_sub(LABEL_W) / CELL_W;
    let max_steps = max_steps.max(1);

    let start_step = if app.cursor_step >= max_steps {
        app.cursor_step - max_steps + 1
    } else {
        0
    };

    let mut lines_out: Vec<String> = Vec::new();

    // Step numbers header
    let mut step_hdr = " ".repeat(LABEL_W);
    for step in start_step..start_step + max_steps {
        step_hdr.push_str(&pad_center(&format!("{step}"), CELL_W));
    }
    lines_out.push(step_hdr);

    let qubit_lines = app.grid.lines(&app.circuit, app.revision, app.sender.identity());

    for line in qubit_lines {
        let row_y = inner.y + 1 + (line.qubit as u16) * 3;
        let mut top = " ".repeat(LABEL_W);
        let mut mid = format!("{:<4}──", "|0⟩");
        let mut bot = " ".repeat(LABEL_W);

        let mut drawn = 0usize;
        for slot in &line.slots {
            if slot.step < start_step || slot.step >= start_step + max_steps {
                continue;
            }
            let is_cursor = active
                && line.qubit == app.cursor_qubit
                && slot.step == app.cursor_step;

            let token = slot.token();
            let glyphs = if is_cursor { cursor_glyphs(&token) } else { token.glyphs() };
            top.push_str(&glyphs[0]);
            mid.push_str(&glyphs[1]);
            bot.push_str(&glyphs[2]);

            // placed gates are both drop targets and drag sources
            let cell_x = inner.x + (LABEL_W + (slot.step - start_step) * CELL_W) as u16;
            if row_y + 3 <= inner.y + inner.height && cell_x + CELL_W as u16 <= inner.x + inner.width {
                let cell = Rect::new(cell_x, row_y, CELL_W as u16, 3);
                app.drag.register_target(&slot.id, cell);
                app.drag.register_draggable(&slot.id, cell);
            }
            drawn += 1;
        }

        // trailing wire out to the panel edge
        let used = LABEL_W + drawn * CELL_W;
        if width > used {
            top.push_str(&" ".repeat(width - used));
            mid.push_str(&"─".repeat(width - used));
            bot.push_str(&" ".repeat(width - used));
        }

        lines_out.push(top);
        lines_out.push(mid);
        lines_out.push(bot);
    }

    // Status / position line
    let mut status = format!(
        "  Position: Qubit {}, Step {}",
        app.cursor_qubit, app.cursor_step
    );
    if !app.status_msg.is_empty() {
        status.push_str(&format!("  │  {}", app.status_msg));
    }
    lines_out.push(status);

    let text: Vec<Line> = lines_out.into_iter().map(Line::raw).collect();
    f.render_widget(Paragraph::new(Text::from(text)), inner);
}

fn cursor_glyphs(token: &GateToken) -> [String; 3] {
    let inner_w = CELL_W - 2;
    let dash_l = (inner_w - 1) / 2;
    let dash_r = inner_w - dash_l - 1;

    let mid = match token.variant() {
        GateVariant::ControlDot => "─".repeat(dash_l) + "●" + &"─".repeat(dash_r),
        GateVariant::SwapMarker => "─".repeat(dash_l) + "×" + &"─".repeat(dash_r),
        GateVariant::Label => pad_center(&token.name, inner_w),
    };

    [
        "╔".to_string() + &"═".repeat(inner_w) + "╗",
        "║".to_string() + &mid + "║",
        "╚".to_string() + &"═".repeat(inner_w) + "╝",
    ]
}

// ── Palette Panel ─────────────────────────────────────────────────────────────

fn render_palette_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let active = app.focus == Focus::Palette;
    let border_color = if active { ORANGE } else { GREEN };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            "Gate Palette",
            Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut rows: [Vec<Span>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for (i, item) in GATE_PALETTE.iter().enumerate() {
        let x = inner.x + (i * (CELL_W + 1)) as u16;
        if x + CELL_W as u16 > inner.x + inner.width {
            break;
        }
        let style = if active && i == app.palette_idx {
            Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DARK_BLUE)
        };

        let glyphs = item.token().glyphs();
        for (row, glyph) in rows.iter_mut().zip(glyphs) {
            row.push(Span::styled(glyph, style));
            row.push(Span::raw(" "));
        }

        app.drag.register_draggable(item.symbol, Rect::new(x, inner.y, CELL_W as u16, 3));
    }

    let selected = &GATE_PALETTE[app.palette_idx.min(GATE_PALETTE.len() - 1)];
    let caption = Line::styled(
        format!("▸ {} — drag onto the board, or Enter to place", selected.name),
        Style::default().fg(DIM),
    );

    let mut text: Vec<Line> = rows.into_iter().map(Line::from).collect();
    text.push(caption);
    f.render_widget(Paragraph::new(Text::from(text)), inner);
}

// ── Controls Panel ─────────────────────────────────────────────────────────────

fn render_controls_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let help = if app.drag.active_id().is_some() {
        "Dragging — release over a slot to drop, anywhere else to cancel".to_string()
    } else {
        match app.focus {
            Focus::Grid => {
                "Nav: ↑↓←→/hjkl  Enter Place  x Clear  a Add step  s Send  Tab Palette  q Quit"
                    .to_string()
            }
            Focus::Palette => {
                "Palette: ←→/hl Select  Enter Place at cursor  Tab/Esc Back  q Quit".to_string()
            }
        }
    };

    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(YELLOW))),
        inner,
    );
}

// ── Drag Overlay ──────────────────────────────────────────────────────────────

fn render_drag_overlay(f: &mut Frame, app: &App) {
    let Some(rect) = app.drag.overlay_rect() else {
        return;
    };
    let Some(id) = app.drag.active_id() else {
        return;
    };
    let Some(token) = dragged_token(app, id) else {
        return;
    };

    let rect = rect.intersection(f.area());
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let lines: Vec<Line> = token
        .glyphs()
        .into_iter()
        .map(|g| Line::styled(g, Style::default().fg(CYAN).add_modifier(Modifier::BOLD)))
        .collect();

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(Text::from(lines)), rect);
}

fn dragged_token(app: &App, id: &str) -> Option<GateToken> {
    if let Some((qubit, step)) = parse_slot_id(id) {
        return app.circuit.gate_at(qubit, step).map(GateToken::for_symbol);
    }
    palette::by_id(id).map(|item| item.token())
}
