//! Direct-manipulation state machine: select, drag, edit, delete.
//!
//! The controller owns no scene state. It turns discrete input events into
//! [`Scene`] operations, so the whole interaction can be driven and tested
//! without a rendering surface.

use crate::input::{MouseButton, PointerEvent};
use crate::scene::Scene;
use crate::shapes::{ItemId, ItemPatch};
use kurbo::{Point, Vec2};

/// An in-progress drag of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Item being dragged.
    pub item: ItemId,
    /// Item position when the press started.
    pub origin: Point,
    /// Pointer position at press.
    pub press: Point,
    /// Latest pointer position.
    pub current: Point,
}

impl DragState {
    /// Pointer travel since the press.
    pub fn delta(&self) -> Vec2 {
        self.current - self.press
    }

    /// Where the item would land if released now.
    pub fn position(&self) -> Point {
        self.origin + self.delta()
    }

    fn has_moved(&self) -> bool {
        self.current != self.press
    }
}

/// Interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragState),
}

/// Translates pointer and editing input into scene mutations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Uncommitted position of the item being dragged, for rendering.
    pub fn drag_preview(&self) -> Option<(&ItemId, Point)> {
        match &self.state {
            InteractionState::Dragging(drag) => Some((&drag.item, drag.position())),
            InteractionState::Idle => None,
        }
    }

    /// Process a pointer event. Only the primary button interacts.
    pub fn handle_pointer_event(&mut self, scene: &mut Scene, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(scene, position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(scene, position),
            _ => {}
        }
    }

    /// Press: select the topmost item under the pointer and start dragging it,
    /// or clear the selection when the press lands on empty canvas.
    pub fn pointer_down(&mut self, scene: &mut Scene, position: Point) {
        let hit = scene
            .item_at_point(position)
            .and_then(|id| scene.get(id))
            .map(|item| (item.id().clone(), item.position));

        match hit {
            Some((id, origin)) => {
                scene.select(Some(&id));
                log::debug!("drag start on {id}");
                self.state = InteractionState::Dragging(DragState {
                    item: id,
                    origin,
                    press: position,
                    current: position,
                });
            }
            None => {
                scene.clear_selection();
                self.state = InteractionState::Idle;
            }
        }
    }

    /// Move: track the pointer. The scene is not touched until release.
    pub fn pointer_move(&mut self, position: Point) {
        if let InteractionState::Dragging(drag) = &mut self.state {
            drag.current = position;
        }
    }

    /// Release: commit the final position and return to idle.
    pub fn pointer_up(&mut self, scene: &mut Scene, position: Point) {
        let InteractionState::Dragging(mut drag) = std::mem::take(&mut self.state) else {
            return;
        };
        drag.current = position;
        if !drag.has_moved() {
            return;
        }
        let target = drag.position();
        scene.update_item(&drag.item, ItemPatch::position(target));
        log::debug!("drag end on {} at ({}, {})", drag.item, target.x, target.y);
    }

    /// Abandon a drag without committing.
    pub fn cancel(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Write a new label into the selected item.
    pub fn set_label(&self, scene: &mut Scene, label: impl Into<String>) {
        if let Some(id) = scene.selection().cloned() {
            scene.update_item(&id, ItemPatch::label(label));
        }
    }

    /// Write a new fill color into the selected item.
    pub fn set_color(&self, scene: &mut Scene, color: impl Into<String>) {
        if let Some(id) = scene.selection().cloned() {
            scene.update_item(&id, ItemPatch::color(color));
        }
    }

    /// Remove the selected item, if any.
    pub fn delete_selected(&mut self, scene: &mut Scene) {
        let Some(id) = scene.selection().cloned() else {
            return;
        };
        if matches!(&self.state, InteractionState::Dragging(drag) if drag.item == id) {
            self.state = InteractionState::Idle;
        }
        scene.remove_item(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Item, ItemKind};

    fn scene_with_table(at: Point) -> (Scene, ItemId) {
        let mut scene = Scene::new();
        let id = ItemId::from("table");
        scene.replace_all(vec![Item::new(id.clone(), ItemKind::Table, at)]);
        (scene, id)
    }

    #[test]
    fn test_press_selects_and_starts_drag() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut scene, Point::new(20.0, 20.0));

        assert_eq!(scene.selection(), Some(&id));
        assert!(controller.is_dragging());
    }

    #[test]
    fn test_click_without_move_selects_only() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        let revision = scene.revision();

        controller.pointer_down(&mut scene, Point::new(20.0, 20.0));
        controller.pointer_up(&mut scene, Point::new(20.0, 20.0));

        assert_eq!(scene.selection(), Some(&id));
        assert_eq!(scene.get(&id).unwrap().position, Point::new(10.0, 10.0));
        assert_eq!(scene.revision(), revision);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_drag_commits_exact_release_position() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        let grab = Vec2::new(5.0, 7.0);

        controller.pointer_down(&mut scene, Point::new(10.0, 10.0) + grab);
        for p in [(300.0, -40.0), (12.5, 99.25), (-80.0, 3.0)] {
            controller.pointer_move(Point::new(p.0, p.1));
        }
        controller.pointer_up(&mut scene, Point::new(237.0, 141.0) + grab);

        assert_eq!(scene.get(&id).unwrap().position, Point::new(237.0, 141.0));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_moves_are_not_persisted_until_release() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        let revision = scene.revision();

        controller.pointer_down(&mut scene, Point::new(15.0, 15.0));
        controller.pointer_move(Point::new(65.0, 35.0));

        assert_eq!(scene.revision(), revision);
        assert_eq!(scene.get(&id).unwrap().position, Point::new(10.0, 10.0));
        let (preview_id, preview) = controller.drag_preview().unwrap();
        assert_eq!(preview_id, &id);
        assert_eq!(preview, Point::new(60.0, 30.0));
    }

    #[test]
    fn test_drag_outside_canvas_is_not_clamped() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();

        controller.handle_pointer_event(&mut scene, PointerEvent::down(Point::new(10.0, 10.0)));
        controller.handle_pointer_event(&mut scene, PointerEvent::moved(Point::new(-500.0, 900.0)));
        controller.handle_pointer_event(&mut scene, PointerEvent::up(Point::new(-500.0, 900.0)));

        assert_eq!(scene.get(&id).unwrap().position, Point::new(-500.0, 900.0));
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        scene.select(Some(&id));

        controller.pointer_down(&mut scene, Point::new(390.0, 290.0));

        assert!(scene.selection().is_none());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_press_picks_topmost_item() {
        let mut scene = Scene::new();
        scene.replace_all(vec![
            Item::new(ItemId::from("under"), ItemKind::Table, Point::new(0.0, 0.0)),
            Item::new(ItemId::from("over"), ItemKind::Chair, Point::new(10.0, 10.0)),
        ]);
        let mut controller = InteractionController::new();

        controller.pointer_down(&mut scene, Point::new(15.0, 15.0));

        assert_eq!(scene.selection().unwrap().as_str(), "over");
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let (mut scene, _) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();

        controller.handle_pointer_event(
            &mut scene,
            PointerEvent::Down {
                position: Point::new(20.0, 20.0),
                button: MouseButton::Right,
            },
        );

        assert!(scene.selection().is_none());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_release_while_idle_is_noop() {
        let (mut scene, id) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        controller.pointer_up(&mut scene, Point::new(200.0, 200.0));
        assert_eq!(scene.get(&id).unwrap().position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_edit_selected_label_and_color() {
        let mut scene = Scene::new();
        let controller = InteractionController::new();
        let id = scene.add_item(ItemKind::Table);

        controller.set_label(&mut scene, "Front\nDesk");
        controller.set_color(&mut scene, "#123456");

        let item = scene.get(&id).unwrap();
        assert_eq!(item.label, "Front\nDesk");
        assert_eq!(item.color, "#123456");
    }

    #[test]
    fn test_edit_without_selection_is_noop() {
        let (mut scene, id) = scene_with_table(Point::ZERO);
        let controller = InteractionController::new();
        controller.set_label(&mut scene, "ignored");
        assert_eq!(scene.get(&id).unwrap().label, "Table");
    }

    #[test]
    fn test_delete_selected() {
        let mut scene = Scene::new();
        let mut controller = InteractionController::new();
        let keep = scene.add_item(ItemKind::Chair);
        let gone = scene.add_item(ItemKind::Mic);

        controller.delete_selected(&mut scene);

        assert!(scene.get(&gone).is_none());
        assert!(scene.get(&keep).is_some());
        assert!(scene.selection().is_none());

        // Nothing selected: no-op
        controller.delete_selected(&mut scene);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_delete_during_drag_drops_the_drag() {
        let (mut scene, _) = scene_with_table(Point::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        controller.pointer_down(&mut scene, Point::new(20.0, 20.0));
        controller.delete_selected(&mut scene);
        assert!(!controller.is_dragging());
        assert!(scene.is_empty());
    }
}
