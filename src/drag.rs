use std::collections::HashMap;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Live translation of a dragged token, in cells, relative to where it
/// was grabbed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragEvent {
    Started { source: String },
    /// `target` is the drop target under the pointer at release, if any.
    Dropped { source: String, target: Option<String> },
}

#[derive(Debug)]
struct ActiveDrag {
    id: String,
    origin: Rect,
    grab: (u16, u16),
    current: (u16, u16),
}

/// The ambient drag-and-drop session. Widgets register their on-screen
/// rects each render pass; mouse events drive the session; components
/// only ever ask for the live offset of their own id. Hit-testing and
/// pointer bookkeeping stay internal.
#[derive(Debug, Default)]
pub struct DragLayer {
    draggables: HashMap<String, Rect>,
    targets: HashMap<String, Rect>,
    active: Option<ActiveDrag>,
}

impl DragLayer {
    pub fn new() -> Self {
        DragLayer::default()
    }

    /// Clears last frame's registrations. Call at the top of each render
    /// pass, before widgets re-register.
    pub fn begin_frame(&mut self) {
        self.draggables.clear();
        self.targets.clear();
    }

    pub fn register_draggable(&mut self, id: &str, area: Rect) {
        self.draggables.insert(id.to_string(), area);
    }

    pub fn register_target(&mut self, id: &str, area: Rect) {
        self.targets.insert(id.to_string(), area);
    }

    /// `Some` only while `id` is the token being dragged; everything at
    /// rest has no offset.
    pub fn offset_of(&self, id: &str) -> Option<Offset> {
        let drag = self.active.as_ref().filter(|d| d.id == id)?;
        Some(Offset {
            dx: drag.current.0 as i32 - drag.grab.0 as i32,
            dy: drag.current.1 as i32 - drag.grab.1 as i32,
        })
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|d| d.id.as_str())
    }

    /// Where the active token should be painted right now: its grab-time
    /// rect translated by the live offset.
    pub fn overlay_rect(&self) -> Option<Rect> {
        let drag = self.active.as_ref()?;
        let offset = self.offset_of(&drag.id)?;
        Some(Rect {
            x: (drag.origin.x as i32 + offset.dx).max(0) as u16,
            y: (drag.origin.y as i32 + offset.dy).max(0) as u16,
            ..drag.origin
        })
    }

    pub fn on_mouse(&mut self, event: MouseEvent) -> Option<DragEvent> {
        let at = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (id, origin) = hit(&self.draggables, at)?;
                self.active = Some(ActiveDrag {
                    id: id.clone(),
                    origin,
                    grab: (event.column, event.row),
                    current: (event.column, event.row),
                });
                Some(DragEvent::Started { source: id })
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let drag = self.active.as_mut()?;
                drag.current = (event.column, event.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let drag = self.active.take()?;
                let target = hit(&self.targets, at).map(|(id, _)| id);
                Some(DragEvent::Dropped { source: drag.id, target })
            }
            _ => None,
        }
    }
}

fn hit(rects: &HashMap<String, Rect>, at: Position) -> Option<(String, Rect)> {
    rects
        .iter()
        .find(|(_, rect)| rect.contains(at))
        .map(|(id, rect)| (id.clone(), *rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::empty() }
    }

    fn layer() -> DragLayer {
        let mut layer = DragLayer::new();
        layer.register_draggable("H", Rect::new(2, 10, 8, 3));
        layer.register_target("00", Rect::new(2, 1, 8, 3));
        layer.register_target("01", Rect::new(10, 1, 8, 3));
        layer
    }

    #[test]
    fn press_drag_release_reports_offset_then_drop() {
        let mut layer = layer();

        let started = layer.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 11));
        assert_eq!(started, Some(DragEvent::Started { source: "H".into() }));
        assert_eq!(layer.offset_of("H"), Some(Offset { dx: 0, dy: 0 }));

        assert!(layer.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 2)).is_none());
        assert_eq!(layer.offset_of("H"), Some(Offset { dx: 8, dy: -9 }));
        assert_eq!(layer.active_id(), Some("H"));

        let dropped = layer.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 2));
        assert_eq!(
            dropped,
            Some(DragEvent::Dropped { source: "H".into(), target: Some("01".into()) })
        );
        assert!(layer.active_id().is_none());
    }

    #[test]
    fn tokens_at_rest_have_no_offset() {
        let mut layer = layer();
        assert!(layer.offset_of("H").is_none());
        layer.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 11));
        assert!(layer.offset_of("X").is_none());
    }

    #[test]
    fn press_outside_any_draggable_is_ignored() {
        let mut layer = layer();
        assert!(layer.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, 50)).is_none());
        assert!(layer.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2)).is_none());
    }

    #[test]
    fn release_off_target_drops_with_none() {
        let mut layer = layer();
        layer.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 11));
        let dropped = layer.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 60, 20));
        assert_eq!(dropped, Some(DragEvent::Dropped { source: "H".into(), target: None }));
    }

    #[test]
    fn overlay_follows_the_pointer() {
        let mut layer = layer();
        layer.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 11));
        layer.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 6, 3));
        let rect = layer.overlay_rect().unwrap();
        assert_eq!((rect.x, rect.y), (4, 2));
        assert_eq!((rect.width, rect.height), (8, 3));
    }
}
