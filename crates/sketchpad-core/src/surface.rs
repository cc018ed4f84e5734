//! The drawing surface: gesture state machine, raster, undo and export.

use crate::camera::Camera;
use crate::config::SurfaceSettings;
use crate::error::{SurfaceError, SurfaceResult};
use crate::history::UndoHistory;
use crate::input::PointerEvent;
use crate::raster::Raster;
use crate::shapes::DetectedShape;
use crate::timer::{Instant, LongPressTimer, TimerCommand, TimerId};
use crate::tools::ToolConfig;
use kurbo::Point;

/// Where the current gesture stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// Pointer is down and freehand strokes are being drawn.
    Drawing {
        /// Canvas point where the gesture started.
        start: Point,
        /// Most recent canvas point.
        last: Point,
    },
    /// The long-press timer elapsed; freehand drawing continues and a shape
    /// is drawn on release.
    AwaitingShapeDecision {
        start: Point,
        last: Point,
        /// Shape-start anchor, recorded when the timer fired.
        anchor: Point,
    },
}

impl GestureState {
    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }

    /// Most recent canvas point of the active gesture.
    pub fn last_point(&self) -> Option<Point> {
        match self {
            GestureState::Idle => None,
            GestureState::Drawing { last, .. } | GestureState::AwaitingShapeDecision { last, .. } => {
                Some(*last)
            }
        }
    }

    /// Shape-start anchor, if the long press has elapsed.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            GestureState::AwaitingShapeDecision { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    fn set_last(&mut self, point: Point) {
        match self {
            GestureState::Idle => {}
            GestureState::Drawing { last, .. } | GestureState::AwaitingShapeDecision { last, .. } => {
                *last = point;
            }
        }
    }
}

/// What the host has to do after an interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceResponse {
    /// Timer instructions, in order.
    pub timer: Vec<TimerCommand>,
    /// Shape drawn on release, if the gesture was a long press.
    pub shape: Option<DetectedShape>,
    /// The raster changed and should be presented again.
    pub redraw: bool,
    /// The view transform changed.
    pub transform_changed: bool,
}

impl SurfaceResponse {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Default::default()
        }
    }

    /// Whether the host has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.timer.is_empty() && self.shape.is_none() && !self.redraw && !self.transform_changed
    }
}

/// Raster and history exist only while the surface is mounted.
#[derive(Debug, Clone)]
struct Mounted {
    raster: Raster,
    history: UndoHistory,
}

/// Freehand drawing surface.
///
/// All interactions take the current [`ToolConfig`] by reference; the surface
/// never stores or mutates it. Before [`DrawingSurface::mount`] every raster
/// operation is a silent no-op.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    settings: SurfaceSettings,
    mounted: Option<Mounted>,
    camera: Camera,
    /// Screen position of the canvas element's top-left corner.
    origin: Point,
    gesture: GestureState,
    timer: LongPressTimer,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(SurfaceSettings::default())
    }
}

impl DrawingSurface {
    /// Create an unmounted surface.
    pub fn new(settings: SurfaceSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            camera: Camera::from_settings(&settings),
            timer: LongPressTimer::new(settings.long_press_delay()),
            settings,
            mounted: None,
            origin: Point::ZERO,
            gesture: GestureState::Idle,
        }
    }

    /// Allocate the raster, fill it with the background color and start the
    /// undo history from that state. Remounting discards the previous raster.
    pub fn mount(&mut self, width: u32, height: u32, config: &ToolConfig) -> SurfaceResult<SurfaceResponse> {
        let raster = Raster::new(width, height, config.background_color)?;
        let history = UndoHistory::new(raster.snapshot(), self.settings.history_limit);
        let mut response = self.abandon_gesture();
        self.mounted = Some(Mounted { raster, history });
        response.redraw = true;
        log::info!("Mounted drawing surface {}x{}", width, height);
        Ok(response)
    }

    /// Drop the raster and history.
    pub fn unmount(&mut self) -> SurfaceResponse {
        let response = self.abandon_gesture();
        self.mounted = None;
        log::info!("Unmounted drawing surface");
        response
    }

    /// Refill the raster with the configured background and restart history.
    pub fn reset_background(&mut self, config: &ToolConfig) -> SurfaceResponse {
        let mut response = self.abandon_gesture();
        let Some(mounted) = self.mounted.as_mut() else {
            log::debug!("Ignoring background reset: surface not mounted");
            return response;
        };
        mounted.raster.fill(config.background_color);
        mounted.history.reset(mounted.raster.snapshot());
        response.redraw = true;
        response
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.mounted.as_ref().map(|m| &m.raster)
    }

    /// Number of undo entries; zero while unmounted.
    pub fn history_len(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.history.len())
    }

    pub fn can_undo(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.history.can_undo())
    }

    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn screen_origin(&self) -> Point {
        self.origin
    }

    /// Update the screen position of the canvas element.
    pub fn set_screen_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Map a screen point into canvas space.
    pub fn to_canvas(&self, screen_point: Point) -> Point {
        self.camera.screen_to_canvas(screen_point, self.origin)
    }

    /// Dispatch a normalized input event.
    pub fn handle_event(&mut self, event: PointerEvent, config: &ToolConfig, now: Instant) -> SurfaceResponse {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, now),
            PointerEvent::Move { position } => self.pointer_move(position, config),
            PointerEvent::Up => self.pointer_up(config),
            PointerEvent::Leave => self.pointer_leave(config),
            PointerEvent::Wheel { delta_y } => {
                self.wheel(delta_y);
                SurfaceResponse {
                    transform_changed: true,
                    ..Default::default()
                }
            }
        }
    }

    /// Start a gesture: snapshot for undo and arm the long-press timer.
    ///
    /// A gesture that is still active is abandoned first, without a shape.
    pub fn pointer_down(&mut self, screen_point: Point, now: Instant) -> SurfaceResponse {
        if self.mounted.is_none() {
            log::debug!("Ignoring pointer down: surface not mounted");
            return SurfaceResponse::default();
        }

        let mut response = self.abandon_gesture();
        let point = self.to_canvas(screen_point);

        if let Some(mounted) = self.mounted.as_mut() {
            mounted.history.push(mounted.raster.snapshot());
        }
        self.gesture = GestureState::Drawing {
            start: point,
            last: point,
        };
        response.timer.extend(self.timer.arm(now));
        response
    }

    /// Continue the freehand stroke to the new point.
    pub fn pointer_move(&mut self, screen_point: Point, config: &ToolConfig) -> SurfaceResponse {
        let Some(last) = self.gesture.last_point() else {
            return SurfaceResponse::default();
        };
        let point = self.to_canvas(screen_point);
        let Some(mounted) = self.mounted.as_mut() else {
            log::debug!("Ignoring pointer move: surface not mounted");
            return SurfaceResponse::default();
        };

        mounted.raster.stroke_segment(
            last,
            point,
            config.freehand_color(),
            config.effective_stroke_width(),
        );
        self.gesture.set_last(point);
        SurfaceResponse::redraw()
    }

    /// Finish the gesture, drawing the detected shape after a long press.
    pub fn pointer_up(&mut self, config: &ToolConfig) -> SurfaceResponse {
        self.end_gesture(config)
    }

    /// The pointer left the canvas; behaves like a release.
    pub fn pointer_leave(&mut self, config: &ToolConfig) -> SurfaceResponse {
        self.end_gesture(config)
    }

    /// Host callback for a scheduled long-press timer.
    pub fn on_timer(&mut self, id: TimerId) -> SurfaceResponse {
        if !self.timer.fire(id) {
            log::debug!("Ignoring stale long-press timer {:?}", id);
            return SurfaceResponse::default();
        }
        self.enter_shape_decision();
        SurfaceResponse::default()
    }

    /// Fire the long-press timer if its deadline has passed, for hosts that
    /// poll instead of scheduling callbacks.
    pub fn poll_timers(&mut self, now: Instant) -> SurfaceResponse {
        if self.timer.poll(now).is_some() {
            self.enter_shape_decision();
        }
        SurfaceResponse::default()
    }

    /// Apply one wheel step to the view transform. Returns the new zoom.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.camera.wheel(delta_y)
    }

    /// Restore the previous snapshot. Returns false at the history floor or
    /// when unmounted.
    pub fn undo(&mut self) -> bool {
        let Some(mounted) = self.mounted.as_mut() else {
            log::debug!("Ignoring undo: surface not mounted");
            return false;
        };
        match mounted.history.undo() {
            Some(snapshot) => mounted.raster.restore(&snapshot),
            None => false,
        }
    }

    /// Fill the raster with the background color and record it for undo.
    pub fn clear(&mut self, config: &ToolConfig) -> bool {
        let Some(mounted) = self.mounted.as_mut() else {
            log::debug!("Ignoring clear: surface not mounted");
            return false;
        };
        mounted.raster.fill(config.background_color);
        mounted.history.push(mounted.raster.snapshot());
        log::info!("Cleared drawing surface");
        true
    }

    /// Encode the current raster as PNG.
    pub fn export_png(&self) -> SurfaceResult<Vec<u8>> {
        let mounted = self.mounted.as_ref().ok_or(SurfaceError::NotMounted)?;
        let png_data = mounted.raster.encode_png()?;
        log::info!("Exported {} bytes of PNG", png_data.len());
        Ok(png_data)
    }

    /// Download name for exported images.
    pub fn export_file_name(&self) -> &str {
        &self.settings.export_file_name
    }

    fn enter_shape_decision(&mut self) {
        if let GestureState::Drawing { start, last } = self.gesture {
            self.gesture = GestureState::AwaitingShapeDecision {
                start,
                last,
                anchor: start,
            };
        }
    }

    fn end_gesture(&mut self, config: &ToolConfig) -> SurfaceResponse {
        let gesture = std::mem::take(&mut self.gesture);
        let mut response = SurfaceResponse::default();

        if let (Some(anchor), Some(last)) = (gesture.anchor(), gesture.last_point()) {
            if let Some(mounted) = self.mounted.as_mut() {
                let shape = DetectedShape::detect(anchor, last);
                mounted.raster.stroke_path(
                    &shape.to_path(),
                    config.stroke_color,
                    config.effective_stroke_width(),
                );
                log::debug!("Detected {} gesture", shape.kind.name());
                response.shape = Some(shape);
                response.redraw = true;
            }
        }

        // Runs on every terminal transition, including releases while idle.
        response.timer.extend(self.timer.disarm());
        response
    }

    fn abandon_gesture(&mut self) -> SurfaceResponse {
        self.gesture = GestureState::Idle;
        SurfaceResponse {
            timer: self.timer.disarm().into_iter().collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::shapes::ShapeKind;
    use crate::tools::ToolKind;
    use std::time::Duration;

    const RED: SerializableColor = SerializableColor::rgb(255, 0, 0);
    const LONG_PRESS: Duration = Duration::from_millis(1000);

    fn pen() -> ToolConfig {
        ToolConfig::new().with_stroke_color(RED).with_stroke_width(6.0)
    }

    fn mounted_surface() -> DrawingSurface {
        let mut surface = DrawingSurface::default();
        surface.mount(100, 100, &pen()).unwrap();
        surface
    }

    fn scheduled_id(response: &SurfaceResponse) -> TimerId {
        response
            .timer
            .iter()
            .find_map(|c| match c {
                TimerCommand::Schedule { id, .. } => Some(*id),
                TimerCommand::Cancel(_) => None,
            })
            .expect("timer scheduled")
    }

    fn stroke(surface: &mut DrawingSurface, from: Point, to: Point, config: &ToolConfig) {
        surface.pointer_down(from, Instant::now());
        surface.pointer_move(to, config);
        surface.pointer_up(config);
    }

    #[test]
    fn test_unmounted_is_noop() {
        let mut surface = DrawingSurface::default();
        let config = pen();

        assert!(surface.pointer_down(Point::new(1.0, 1.0), Instant::now()).is_empty());
        assert!(surface.pointer_move(Point::new(5.0, 5.0), &config).is_empty());
        assert!(surface.pointer_up(&config).is_empty());
        assert!(!surface.undo());
        assert!(!surface.clear(&config));
        assert!(matches!(surface.export_png(), Err(SurfaceError::NotMounted)));
        assert_eq!(surface.history_len(), 0);
        assert!(!surface.gesture().is_active());
    }

    #[test]
    fn test_mount_initial_state() {
        let surface = mounted_surface();
        assert_eq!(surface.history_len(), 1);
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::white()));
    }

    #[test]
    fn test_mount_invalid_size() {
        let mut surface = DrawingSurface::default();
        assert!(surface.mount(0, 0, &pen()).is_err());
        assert!(!surface.is_mounted());
    }

    #[test]
    fn test_pointer_down_snapshots_and_schedules() {
        let mut surface = mounted_surface();
        let response = surface.pointer_down(Point::new(10.0, 10.0), Instant::now());

        assert_eq!(surface.history_len(), 2);
        assert!(matches!(
            response.timer.as_slice(),
            [TimerCommand::Schedule { delay, .. }] if *delay == LONG_PRESS
        ));
        assert_eq!(
            *surface.gesture(),
            GestureState::Drawing {
                start: Point::new(10.0, 10.0),
                last: Point::new(10.0, 10.0)
            }
        );
    }

    #[test]
    fn test_pen_stroke_uses_stroke_color() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        assert_eq!(surface.raster().unwrap().pixel(50, 50), Some(RED));
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        let eraser = pen().with_tool(ToolKind::Eraser).with_stroke_width(20.0);
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &eraser);
        assert_eq!(surface.raster().unwrap().pixel(50, 50), Some(SerializableColor::white()));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut surface = mounted_surface();
        let response = surface.pointer_move(Point::new(50.0, 50.0), &pen());
        assert!(response.is_empty());
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::white()));
    }

    #[test]
    fn test_quick_tap_draws_no_shape() {
        let mut surface = mounted_surface();
        let down = surface.pointer_down(Point::new(30.0, 30.0), Instant::now());
        let id = scheduled_id(&down);
        let up = surface.pointer_up(&pen());

        assert!(up.shape.is_none());
        assert_eq!(up.timer, vec![TimerCommand::Cancel(id)]);
        assert!(!surface.gesture().is_active());
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::white()));
    }

    #[test]
    fn test_long_press_draws_circle() {
        let mut surface = mounted_surface();
        let config = pen();
        let start = Instant::now();

        surface.pointer_down(Point::new(20.0, 20.0), start);
        surface.poll_timers(start + LONG_PRESS);
        assert_eq!(surface.gesture().anchor(), Some(Point::new(20.0, 20.0)));

        surface.pointer_move(Point::new(60.0, 60.0), &config);
        let response = surface.pointer_up(&config);

        let shape = response.shape.expect("shape drawn");
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert!(response.redraw);
        // Rightmost point of the circle centered at (40, 40), radius ~28.3.
        assert_eq!(surface.raster().unwrap().pixel(68, 40), Some(RED));
    }

    #[test]
    fn test_timer_callback_enters_shape_decision() {
        let mut surface = mounted_surface();
        let id = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        surface.pointer_move(Point::new(70.0, 40.0), &pen());

        surface.on_timer(id);
        assert!(matches!(surface.gesture(), GestureState::AwaitingShapeDecision { .. }));

        // Freehand drawing continues after the timer fired.
        let response = surface.pointer_move(Point::new(70.0, 45.0), &pen());
        assert!(response.redraw);

        let response = surface.pointer_up(&pen());
        assert_eq!(response.shape.map(|s| s.kind), Some(ShapeKind::Rectangle));
        // Timer already fired, nothing left to cancel.
        assert!(response.timer.is_empty());
    }

    #[test]
    fn test_stale_timer_after_release_is_ignored() {
        let mut surface = mounted_surface();
        let id = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        surface.pointer_up(&pen());

        assert!(surface.on_timer(id).is_empty());
        assert_eq!(*surface.gesture(), GestureState::Idle);

        // The next gesture is not affected by the stale firing.
        surface.pointer_down(Point::new(10.0, 10.0), Instant::now());
        assert!(surface.on_timer(id).is_empty());
        assert!(matches!(surface.gesture(), GestureState::Drawing { .. }));
    }

    #[test]
    fn test_long_press_without_movement_is_line() {
        let mut surface = mounted_surface();
        let id = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        surface.on_timer(id);
        let response = surface.pointer_leave(&pen());
        assert_eq!(response.shape.map(|s| s.kind), Some(ShapeKind::Line));
    }

    #[test]
    fn test_shape_uses_stroke_color_with_eraser() {
        let mut surface = mounted_surface();
        let eraser = pen().with_tool(ToolKind::Eraser);
        let start = Instant::now();
        surface.pointer_down(Point::new(10.0, 50.0), start);
        surface.poll_timers(start + LONG_PRESS);
        surface.pointer_move(Point::new(90.0, 52.0), &eraser);
        let response = surface.pointer_up(&eraser);

        assert_eq!(response.shape.map(|s| s.kind), Some(ShapeKind::Line));
        assert_eq!(surface.raster().unwrap().pixel(50, 51), Some(RED));
    }

    #[test]
    fn test_second_down_abandons_gesture() {
        let mut surface = mounted_surface();
        let first = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        surface.on_timer(first);

        let response = surface.pointer_down(Point::new(50.0, 50.0), Instant::now());
        assert!(response.shape.is_none());
        assert_eq!(
            *surface.gesture(),
            GestureState::Drawing {
                start: Point::new(50.0, 50.0),
                last: Point::new(50.0, 50.0)
            }
        );
        assert_eq!(surface.history_len(), 3);
    }

    #[test]
    fn test_rearm_cancels_pending_timer() {
        let mut surface = mounted_surface();
        let first = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        let response = surface.pointer_down(Point::new(20.0, 20.0), Instant::now());
        assert_eq!(response.timer[0], TimerCommand::Cancel(first));
        assert_ne!(scheduled_id(&response), first);
    }

    #[test]
    fn test_points_mapped_through_camera() {
        let mut surface = mounted_surface();
        surface.set_screen_origin(Point::new(100.0, 50.0));
        surface.camera_mut().zoom = 2.0;

        surface.pointer_down(Point::new(140.0, 90.0), Instant::now());
        assert_eq!(surface.gesture().last_point(), Some(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_clear_fills_background_and_snapshots() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        let before = surface.history_len();

        let config = pen().with_background_color(SerializableColor::rgb(0, 128, 0));
        assert!(surface.clear(&config));
        assert_eq!(surface.history_len(), before + 1);
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::rgb(0, 128, 0)));
    }

    #[test]
    fn test_undo_single_stroke() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        assert_eq!(surface.history_len(), 2);

        assert!(surface.undo());
        assert_eq!(surface.history_len(), 1);
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::white()));
    }

    #[test]
    fn test_undo_restores_one_before_top() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 30.0), Point::new(90.0, 30.0), &pen());
        stroke(&mut surface, Point::new(10.0, 70.0), Point::new(90.0, 70.0), &pen());
        assert_eq!(surface.history_len(), 3);

        // One undo removes one entry but restores the state before both strokes.
        assert!(surface.undo());
        assert_eq!(surface.history_len(), 2);
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::white()));
    }

    #[test]
    fn test_undo_floor() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        for _ in 0..10 {
            surface.undo();
            assert!(surface.history_len() >= 1);
        }
        assert_eq!(surface.history_len(), 1);
        assert!(!surface.undo());
    }

    #[test]
    fn test_history_limit() {
        let settings = SurfaceSettings {
            history_limit: 4,
            ..Default::default()
        };
        let mut surface = DrawingSurface::new(settings);
        surface.mount(20, 20, &pen()).unwrap();
        for _ in 0..10 {
            surface.clear(&pen());
        }
        assert_eq!(surface.history_len(), 4);
    }

    #[test]
    fn test_wheel_clamps_zoom() {
        let mut surface = DrawingSurface::default();
        let config = pen();
        for i in 0..200 {
            let delta = if i % 3 == 0 { -1.0 } else { 1.0 };
            let response = surface.handle_event(PointerEvent::wheel(delta), &config, Instant::now());
            assert!(response.transform_changed);
            let zoom = surface.camera().zoom;
            assert!((0.1..=5.0).contains(&zoom));
        }
        for _ in 0..100 {
            surface.wheel(-1.0);
        }
        assert!((surface.camera().zoom - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_repairs_inverted_zoom_limits() {
        let settings: SurfaceSettings = serde_json::from_str(r#"{"min_zoom": 6.0}"#).unwrap();
        let mut surface = DrawingSurface::new(settings);
        assert!(surface.settings().max_zoom >= surface.settings().min_zoom);
        assert!((surface.wheel(1.0) - 6.0).abs() < f64::EPSILON);

        let literal = SurfaceSettings {
            min_zoom: 2.0,
            max_zoom: 1.0,
            history_limit: 0,
            ..Default::default()
        };
        let mut surface = DrawingSurface::new(literal);
        assert_eq!(surface.settings().history_limit, 1);
        assert!((surface.wheel(-1.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_background() {
        let mut surface = mounted_surface();
        stroke(&mut surface, Point::new(10.0, 50.0), Point::new(90.0, 50.0), &pen());
        let config = pen().with_background_color(SerializableColor::rgb(0, 0, 255));

        let response = surface.reset_background(&config);
        assert!(response.redraw);
        assert_eq!(surface.history_len(), 1);
        assert!(surface.raster().unwrap().is_uniform(SerializableColor::rgb(0, 0, 255)));
    }

    #[test]
    fn test_export_png() {
        let surface = mounted_surface();
        let png_data = surface.export_png().unwrap();
        assert_eq!(&png_data[1..4], b"PNG");
        assert_eq!(surface.export_file_name(), "drawing.png");
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut surface = mounted_surface();
        let config = pen();
        let now = Instant::now();

        let down = surface.handle_event(PointerEvent::Down { position: Point::new(10.0, 50.0) }, &config, now);
        assert_eq!(down.timer.len(), 1);
        let moved = surface.handle_event(PointerEvent::Move { position: Point::new(90.0, 50.0) }, &config, now);
        assert!(moved.redraw);
        let up = surface.handle_event(PointerEvent::Up, &config, now);
        assert!(matches!(up.timer.as_slice(), [TimerCommand::Cancel(_)]));
        assert!(!surface.gesture().is_active());
    }

    #[test]
    fn test_unmount_cancels_timer() {
        let mut surface = mounted_surface();
        let id = scheduled_id(&surface.pointer_down(Point::new(10.0, 10.0), Instant::now()));
        let response = surface.unmount();
        assert_eq!(response.timer, vec![TimerCommand::Cancel(id)]);
        assert!(!surface.is_mounted());
    }
}
