/// Floor-plan viewer state
///
/// A two-state machine (closed / open) holding the image source and the
/// pan/zoom transform. Pointer handling is an explicit gesture state so a
/// drag can only exist between `pointer_down` and `pointer_up`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::data::Unit;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;
/// Zoom added by a double tap
pub const TAP_ZOOM_STEP: f32 = 0.5;
/// At or above this zoom, a double tap resets to 1.0
pub const TAP_RESET_ZOOM: f32 = 2.0;
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Pan offset in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer position minus pan, captured at pointer-down
    Dragging { grab: Offset },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanViewer {
    open: bool,
    unit_id: String,
    src: PathBuf,
    zoom: f32,
    pan: Offset,
    gesture: Gesture,
    last_tap: Option<Instant>,
}

impl Default for PlanViewer {
    fn default() -> Self {
        Self {
            open: false,
            unit_id: String::new(),
            src: PathBuf::new(),
            zoom: 1.0,
            pan: Offset::ZERO,
            gesture: Gesture::Idle,
            last_tap: None,
        }
    }
}

impl PlanViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the viewer on a unit's plan with a fresh transform
    pub fn open(&mut self, unit: &Unit, asset_root: &Path) {
        self.src = plan_source(unit, asset_root);
        self.unit_id = unit.id.clone();
        self.zoom = 1.0;
        self.pan = Offset::ZERO;
        self.gesture = Gesture::Idle;
        self.open = true;
    }

    /// Dismiss. Image, zoom and pan are left untouched.
    pub fn close(&mut self) {
        self.open = false;
        self.gesture = Gesture::Idle;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pointer_down(&mut self, position: Offset) {
        self.gesture = Gesture::Dragging {
            grab: Offset::new(position.x - self.pan.x, position.y - self.pan.y),
        };
    }

    pub fn pointer_move(&mut self, position: Offset) {
        if let Gesture::Dragging { grab } = self.gesture {
            self.pan = Offset::new(position.x - grab.x, position.y - grab.y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// A primary activation on the image. Two within the double-tap
    /// window toggle the zoom and recenter.
    pub fn tap(&mut self, now: Instant) {
        let is_double = self
            .last_tap
            .is_some_and(|last| now.saturating_duration_since(last) < DOUBLE_TAP_WINDOW);

        if is_double {
            self.zoom = if self.zoom >= TAP_RESET_ZOOM {
                1.0
            } else {
                (self.zoom + TAP_ZOOM_STEP).min(MAX_ZOOM)
            };
            self.pan = Offset::ZERO;
        }

        self.last_tap = Some(now);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the viewer is open on exactly this image source
    pub fn is_showing(&self, src: &Path) -> bool {
        self.open && self.src == src
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    pub fn src(&self) -> &Path {
        &self.src
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Offset {
        self.pan
    }
}

/// Resolve the image for a unit: its explicit `plano`, or `planos/<id>.png`
pub fn plan_source(unit: &Unit, asset_root: &Path) -> PathBuf {
    match unit.plano.as_deref() {
        Some(plano) => asset_root.join(plano.trim_start_matches('/')),
        None => asset_root.join("planos").join(format!("{}.png", unit.id)),
    }
}
