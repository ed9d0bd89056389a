//! Camera pan drag.

use crate::board::Board;
use crate::camera::{Camera, ZoomLimits};
use crate::command::Command;
use kurbo::Point;

/// An in-progress pan. The camera is previewed while the pointer moves and
/// committed once on release.
#[derive(Debug, Clone, PartialEq)]
pub struct PanGesture {
    start_screen: Point,
    start_camera: Camera,
    current: Camera,
}

impl PanGesture {
    pub fn begin(screen: Point, camera: Camera) -> Self {
        Self {
            start_screen: screen,
            start_camera: camera,
            current: camera,
        }
    }

    /// Follow the pointer; content stays under it.
    pub fn update(&mut self, screen: Point) -> Camera {
        self.current = self.start_camera.panned_by_screen(screen - self.start_screen);
        self.current
    }

    /// Camera to draw with while the gesture lasts.
    pub fn camera(&self) -> Camera {
        self.current
    }

    /// Command for the finished pan, or `None` if the camera did not move.
    pub fn finish(self, board: &Board, limits: &ZoomLimits) -> Option<Command> {
        (self.current != board.camera).then(|| Command::set_camera(board, self.current, limits))
    }
}
