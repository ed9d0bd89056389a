//! Editor state: history, selection and the active gesture in one place.

use crate::board::{Board, BoardError, SettingsPatch};
use crate::camera::Camera;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::history::History;
use crate::input::{MouseButton, PointerEvent, WheelEvent, camera_after_wheel};
use crate::selection::Selection;
use crate::shapes::{BoardObject, ObjectId, ObjectPatch};
use crate::tools::{PanGesture, SelectTool, ToolKind};
use kurbo::Size;
use std::borrow::Cow;

/// Padding in screen pixels around content when fitting the view.
const FIT_PADDING: f64 = 50.0;

/// The editing session around one board.
#[derive(Debug, Clone)]
pub struct Editor {
    history: History,
    selection: Selection,
    config: EditorConfig,
    tool: ToolKind,
    select_tool: SelectTool,
    pan: Option<PanGesture>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Board::new(), EditorConfig::default())
    }
}

impl Editor {
    /// Start a session. The board camera is clamped into the configured zoom
    /// range.
    pub fn new(mut board: Board, config: EditorConfig) -> Self {
        board.camera = board.camera.clamped(&config.zoom_limits());
        Self {
            history: History::new(board).with_limit(config.history_limit),
            selection: Selection::new(),
            config,
            tool: ToolKind::default(),
            select_tool: SelectTool::new(),
            pan: None,
        }
    }

    /// The committed board.
    pub fn board(&self) -> &Board {
        self.history.present()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools, dropping any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.select_tool.cancel();
        self.pan = None;
        self.tool = tool;
    }

    pub fn is_dragging(&self) -> bool {
        self.select_tool.is_dragging() || self.pan.is_some()
    }

    pub fn execute(&mut self, cmd: Command) {
        self.history.execute(cmd);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last command. Selected objects that no longer exist are
    /// deselected.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.selection.retain_existing(self.history.present());
        }
        undone
    }

    /// Redo the last undone command.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            self.selection.retain_existing(self.history.present());
        }
        redone
    }

    /// Load a board, dropping history, selection and gestures.
    pub fn reset(&mut self, mut board: Board) {
        board.camera = board.camera.clamped(&self.config.zoom_limits());
        self.set_tool(self.tool);
        self.selection.clear();
        self.history.reset(board);
    }

    /// Add an object on top and return its id.
    pub fn add_object(&mut self, object: BoardObject) -> Result<ObjectId, BoardError> {
        let id = object.id().clone();
        let cmd = Command::add_object(self.board(), object)?;
        self.execute(cmd);
        Ok(id)
    }

    /// Patch an object. Returns `Ok(false)` without recording anything when
    /// the object does not exist.
    pub fn update_object(
        &mut self,
        id: &ObjectId,
        patch: &ObjectPatch,
    ) -> Result<bool, BoardError> {
        match Command::update_object(self.board(), id, patch) {
            Ok(cmd) => {
                self.execute(cmd);
                Ok(true)
            }
            Err(BoardError::ObjectNotFound(id)) => {
                log::debug!("update of missing object {id} ignored");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove an object. Returns false when it does not exist.
    pub fn remove_object(&mut self, id: &ObjectId) -> bool {
        match Command::remove_object(self.board(), id) {
            Ok(cmd) => {
                self.execute(cmd);
                self.selection.remove(id);
                true
            }
            Err(e) => {
                log::debug!("remove ignored: {e}");
                false
            }
        }
    }

    pub fn set_camera(&mut self, camera: Camera) {
        let cmd = Command::set_camera(self.board(), camera, &self.config.zoom_limits());
        self.execute(cmd);
    }

    pub fn set_settings(&mut self, patch: &SettingsPatch) {
        let cmd = Command::set_settings(self.board(), patch);
        self.execute(cmd);
    }

    /// Frame all content in a viewport. Does nothing on an empty board.
    pub fn fit_to_content(&mut self, viewport: Size) {
        let Some(bounds) = self.board().bounds() else {
            return;
        };
        let camera =
            Camera::fit_to_bounds(&bounds, viewport, FIT_PADDING, &self.config.zoom_limits());
        self.set_camera(camera);
    }

    /// Route a pointer event to the pan gesture or the select tool.
    ///
    /// Middle button, ctrl or the pan tool start a pan; a left press with the
    /// select tool starts a select/move.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down {
                screen,
                world,
                button,
                modifiers,
            } => {
                if button == MouseButton::Middle || modifiers.ctrl || self.tool == ToolKind::Pan {
                    self.select_tool.cancel();
                    self.pan = Some(PanGesture::begin(screen, self.board().camera));
                } else if button == MouseButton::Left && self.tool == ToolKind::Select {
                    let board = self.history.present();
                    self.select_tool.pointer_down(board, world, &mut self.selection);
                }
            }
            PointerEvent::Move { screen, world } => match &mut self.pan {
                Some(pan) => {
                    pan.update(screen);
                }
                None => self.select_tool.pointer_move(world),
            },
            PointerEvent::Up { .. } | PointerEvent::Leave => self.finish_gesture(),
        }
    }

    fn finish_gesture(&mut self) {
        let cmd = match self.pan.take() {
            Some(pan) => pan.finish(self.board(), &self.config.zoom_limits()),
            None => self.select_tool.pointer_up(),
        };
        if let Some(cmd) = cmd {
            self.execute(cmd);
        }
    }

    /// Zoom or pan the camera from a wheel event. Each event is one command.
    pub fn handle_wheel(&mut self, event: &WheelEvent) {
        let camera = camera_after_wheel(&self.board().camera, event, &self.config);
        if camera != self.board().camera {
            self.set_camera(camera);
        }
    }

    /// The board to draw: the committed board with any drag or pan preview
    /// applied.
    pub fn preview_board(&self) -> Cow<'_, Board> {
        let mut board = self.select_tool.preview_board(self.board());
        if let Some(pan) = &self.pan {
            board.to_mut().camera = pan.camera();
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::shapes::{Rectangle, RectanglePatch, ShapePatch, Text};
    use kurbo::{Point, Vec2};

    fn editor() -> Editor {
        let mut editor = Editor::default();
        editor
            .add_object(
                BoardObject::new(Point::new(0.0, 0.0), Rectangle::new(50.0, 50.0)).with_id("a"),
            )
            .unwrap();
        editor
            .add_object(
                BoardObject::new(Point::new(100.0, 0.0), Rectangle::new(50.0, 50.0)).with_id("b"),
            )
            .unwrap();
        editor
    }

    fn down(world: Point, button: MouseButton, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::Down {
            screen: world,
            world,
            button,
            modifiers,
        }
    }

    fn moved(p: Point) -> PointerEvent {
        PointerEvent::Move { screen: p, world: p }
    }

    #[test]
    fn test_loaded_camera_is_clamped() {
        let mut board = Board::new();
        board.camera = Camera::new(0.0, 0.0, 0.0);
        let editor = Editor::new(board.clone(), EditorConfig::default());
        assert!((editor.board().camera.zoom - 0.1).abs() < f64::EPSILON);
        let world = editor.board().camera.screen_to_world(Point::new(10.0, 10.0));
        assert!(world.x.is_finite() && world.y.is_finite());

        let mut editor = Editor::default();
        board.camera = Camera::new(0.0, 0.0, 50.0);
        editor.reset(board);
        assert!((editor.board().camera.zoom - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_zoom_config_does_not_panic() {
        let config = EditorConfig {
            min_zoom: 10.0,
            ..Default::default()
        };
        let mut editor = Editor::new(Board::new(), config);
        editor.handle_wheel(&WheelEvent {
            screen: Point::new(50.0, 50.0),
            delta: Vec2::new(0.0, -1.0),
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        });
        assert!((editor.board().camera.zoom - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut editor = editor();
        let past = editor.history().past().len();
        let updated = editor
            .update_object(&"ghost".into(), &ObjectPatch::position(1.0, 1.0))
            .unwrap();
        assert!(!updated);
        assert!(!editor.remove_object(&"ghost".into()));
        assert_eq!(editor.history().past().len(), past);
    }

    #[test]
    fn test_update_wrong_variant_errors() {
        let mut editor = editor();
        let patch = ObjectPatch::shape(ShapePatch::Text(Default::default()));
        assert!(editor.update_object(&"a".into(), &patch).is_err());
    }

    #[test]
    fn test_update_and_undo() {
        let mut editor = editor();
        let before = editor.board().clone();
        let patch = ObjectPatch::shape(ShapePatch::Rect(RectanglePatch {
            corner_radius: Some(8.0),
            ..Default::default()
        }));
        assert!(editor.update_object(&"a".into(), &patch).unwrap());
        assert!(editor.undo());
        assert_eq!(editor.board(), &before);
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut editor = editor();
        let id = editor
            .add_object(BoardObject::new(Point::ZERO, Text::new("t", 12.0, 10.0)))
            .unwrap();
        editor.selection_mut().add(id.clone());
        editor.selection_mut().add("a".into());
        editor.undo();
        assert!(!editor.selection().contains(&id));
        assert!(editor.selection().contains(&"a".into()));
    }

    #[test]
    fn test_drag_commits_on_leave() {
        let mut editor = editor();
        editor.handle_pointer(&down(
            Point::new(10.0, 10.0),
            MouseButton::Left,
            Modifiers::default(),
        ));
        editor.handle_pointer(&moved(Point::new(15.0, 10.0)));
        let preview = editor.preview_board();
        assert_eq!(preview.get(&"a".into()).unwrap().position(), Point::new(5.0, 0.0));
        drop(preview);

        let past = editor.history().past().len();
        editor.handle_pointer(&PointerEvent::Leave);
        assert_eq!(editor.history().past().len(), past + 1);
        assert_eq!(editor.board().get(&"a".into()).unwrap().position(), Point::new(5.0, 0.0));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_middle_drag_pans_once() {
        let mut editor = editor();
        let past = editor.history().past().len();
        editor.handle_pointer(&down(
            Point::new(10.0, 10.0),
            MouseButton::Middle,
            Modifiers::default(),
        ));
        editor.handle_pointer(&moved(Point::new(20.0, 10.0)));
        editor.handle_pointer(&moved(Point::new(30.0, 10.0)));
        assert!((editor.preview_board().camera.x + 20.0).abs() < f64::EPSILON);
        assert!(editor.board().camera.x.abs() < f64::EPSILON);
        editor.handle_pointer(&PointerEvent::Up {
            screen: Point::new(30.0, 10.0),
            world: Point::new(30.0, 10.0),
        });
        assert_eq!(editor.history().past().len(), past + 1);
        assert_eq!(editor.history().past().last().map(|c| c.name), Some("Set Camera"));
        assert!((editor.board().camera.x + 20.0).abs() < f64::EPSILON);
        // Object selection was not touched by the pan.
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_wheel_commits_camera() {
        let mut editor = editor();
        let past = editor.history().past().len();
        editor.handle_wheel(&WheelEvent {
            screen: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -1.0),
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        });
        assert_eq!(editor.history().past().len(), past + 1);
        assert!((editor.board().camera.zoom - 1.1).abs() < 1e-9);
        assert!(editor.undo());
        assert!((editor.board().camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut editor = editor();
        editor.selection_mut().add("a".into());
        editor.reset(Board::new());
        assert!(editor.board().is_empty());
        assert!(editor.selection().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_fit_to_content() {
        let mut editor = editor();
        editor.fit_to_content(Size::new(250.0, 150.0));
        let cam = editor.board().camera;
        assert!((cam.zoom - 1.0).abs() < 1e-9);
        let center = cam.world_to_screen(Point::new(75.0, 25.0));
        assert!((center.x - 125.0).abs() < 1e-9);
        assert!((center.y - 75.0).abs() < 1e-9);
    }
}
