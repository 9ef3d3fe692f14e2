//! Hand gestures to planting
//!
//! A recognizer reports index and thumb tip positions for each visible hand
//! in normalized video coordinates. The bridge mirrors them onto the
//! surface, detects pinches and rate-limits planting per hand.

use std::collections::HashMap;
use std::fmt;

use crate::config::Gesture;
use crate::math::Vec2;
use crate::render::Surface;

/// Floats per hand in a packed recognizer frame
pub const HAND_STRIDE: usize = 5;

const CURSOR_RADIUS: f64 = 10.0;
const RING_RADIUS: f64 = 15.0;
const RING_PULSE: f64 = 3.0;
const RING_SPEED: f64 = 0.01;
const PINCH_GLOW: f64 = 15.0;
const CURSOR_COLOR: &str = "#FFFFFF";
const GLOW_COLOR: &str = "rgba(255,255,255,0.8)";
const RING_COLOR: &str = "rgba(255,255,255,0.6)";

/// Stable identity of a tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandId(pub u32);

/// One hand in one recognizer frame, coordinates in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandObservation {
    pub id: HandId,
    pub index_tip: Vec2,
    pub thumb_tip: Vec2,
}

impl HandObservation {
    pub fn is_pinching(&self, threshold: f64) -> bool {
        self.index_tip.distance(&self.thumb_tip) < threshold
    }

    /// Unpack `[id, index_x, index_y, thumb_x, thumb_y]` records.
    /// A negative or non-finite id falls back to the record's slot.
    pub fn from_packed(data: &[f32]) -> Result<Vec<Self>, GestureError> {
        if data.len() % HAND_STRIDE != 0 {
            return Err(GestureError::MalformedFrame { len: data.len() });
        }

        Ok(data
            .chunks_exact(HAND_STRIDE)
            .enumerate()
            .map(|(slot, hand)| {
                let raw_id = hand[0];
                let id = if raw_id.is_finite() && raw_id >= 0.0 {
                    raw_id as u32
                } else {
                    slot as u32
                };
                Self {
                    id: HandId(id),
                    index_tip: Vec2::new(hand[1] as f64, hand[2] as f64),
                    thumb_tip: Vec2::new(hand[3] as f64, hand[4] as f64),
                }
            })
            .collect())
    }
}

/// Where a hand points on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandCursor {
    pub id: HandId,
    pub position: Vec2,
    pub pinching: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    /// The recognizer itself failed
    Recognizer(String),
    /// Packed frame length is not a multiple of the record size
    MalformedFrame { len: usize },
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::Recognizer(msg) => write!(f, "gesture recognizer failed: {}", msg),
            GestureError::MalformedFrame { len } => {
                write!(f, "gesture frame of {} floats is not a multiple of {}", len, HAND_STRIDE)
            }
        }
    }
}

impl std::error::Error for GestureError {}

/// Anything that can look at the current video frame and find hands
pub trait GestureSource {
    fn recognize(&mut self, now: f64) -> Result<Vec<HandObservation>, GestureError>;
}

/// Gesture state carried between recognizer frames
#[derive(Debug, Default)]
pub struct GestureBridge {
    last_plant: HashMap<HandId, f64>,
    cursors: Vec<HandCursor>,
    last_frame_time: Option<f64>,
}

impl GestureBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursors(&self) -> &[HandCursor] {
        &self.cursors
    }

    /// True when `frame_time` is a video frame not seen yet. Records it.
    pub fn accept_frame(&mut self, frame_time: f64) -> bool {
        if self.last_frame_time == Some(frame_time) {
            return false;
        }
        self.last_frame_time = Some(frame_time);
        true
    }

    /// Map hands onto a `width` x `height` surface and return the points
    /// where a pinch should plant. The video is mirrored horizontally.
    pub fn interpret(
        &mut self,
        hands: &[HandObservation],
        width: f64,
        height: f64,
        now: f64,
        rules: &Gesture,
    ) -> Vec<Vec2> {
        self.cursors.clear();
        let mut plants = Vec::new();

        for hand in hands {
            let position = Vec2::new((1.0 - hand.index_tip.x) * width, hand.index_tip.y * height);
            let pinching = hand.is_pinching(rules.pinch_threshold);
            self.cursors.push(HandCursor {
                id: hand.id,
                position,
                pinching,
            });

            if !pinching {
                continue;
            }
            let ready = self
                .last_plant
                .get(&hand.id)
                .map_or(true, |last| now - last > rules.cooldown);
            if ready {
                self.last_plant.insert(hand.id, now);
                plants.push(position);
            }
        }

        plants
    }

    /// Drop cursors after a failed frame
    pub fn lose_hands(&mut self) {
        self.cursors.clear();
    }

    pub fn reset(&mut self) {
        self.last_plant.clear();
        self.cursors.clear();
        self.last_frame_time = None;
    }

    /// Dot per hand; pinching hands glow and get a pulsing ring
    pub fn draw_cursors(&self, surface: &mut dyn Surface, now: f64) {
        for cursor in &self.cursors {
            let Vec2 { x, y } = cursor.position;

            surface.save();
            surface.begin_path();
            surface.arc(x, y, CURSOR_RADIUS, 0.0, std::f64::consts::TAU);
            surface.set_fill_color(CURSOR_COLOR);
            if cursor.pinching {
                surface.set_global_alpha(0.95);
                surface.set_shadow(PINCH_GLOW, GLOW_COLOR);
            } else {
                surface.set_global_alpha(0.4);
            }
            surface.fill();

            if cursor.pinching {
                surface.set_shadow(0.0, GLOW_COLOR);
                surface.begin_path();
                let radius = RING_RADIUS + RING_PULSE * (now * RING_SPEED).sin();
                surface.arc(x, y, radius, 0.0, std::f64::consts::TAU);
                surface.set_stroke_color(RING_COLOR);
                surface.set_line_width(2.0);
                surface.stroke();
            }
            surface.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn hand(id: u32, index: (f64, f64), thumb: (f64, f64)) -> HandObservation {
        HandObservation {
            id: HandId(id),
            index_tip: Vec2::new(index.0, index.1),
            thumb_tip: Vec2::new(thumb.0, thumb.1),
        }
    }

    fn pinch(id: u32) -> HandObservation {
        hand(id, (0.25, 0.5), (0.26, 0.5))
    }

    #[test]
    fn test_cursor_is_mirrored() {
        let mut bridge = GestureBridge::new();
        let open = hand(0, (0.25, 0.5), (0.5, 0.5));
        let plants = bridge.interpret(&[open], 800.0, 600.0, 0.0, &Gesture::default());
        assert!(plants.is_empty());
        assert_eq!(bridge.cursors()[0].position, Vec2::new(600.0, 300.0));
        assert!(!bridge.cursors()[0].pinching);
    }

    #[test]
    fn test_pinch_threshold() {
        assert!(hand(0, (0.5, 0.5), (0.53, 0.5)).is_pinching(0.05));
        assert!(!hand(0, (0.5, 0.5), (0.56, 0.5)).is_pinching(0.05));
    }

    #[test]
    fn test_first_pinch_plants() {
        let mut bridge = GestureBridge::new();
        // A missing entry counts as never planted, even at time zero
        let plants = bridge.interpret(&[pinch(3)], 800.0, 600.0, 0.0, &Gesture::default());
        assert_eq!(plants, vec![Vec2::new(600.0, 300.0)]);
    }

    #[test]
    fn test_cooldown_per_hand() {
        let rules = Gesture::default();
        let mut bridge = GestureBridge::new();
        assert_eq!(bridge.interpret(&[pinch(1)], 800.0, 600.0, 1000.0, &rules).len(), 1);
        assert_eq!(bridge.interpret(&[pinch(1)], 800.0, 600.0, 1150.0, &rules).len(), 0);
        // Exactly at the cooldown is still too early
        assert_eq!(bridge.interpret(&[pinch(1)], 800.0, 600.0, 1200.0, &rules).len(), 0);
        assert_eq!(bridge.interpret(&[pinch(1)], 800.0, 600.0, 1201.0, &rules).len(), 1);

        // Another hand has its own timer
        let plants = bridge.interpret(&[pinch(1), pinch(2)], 800.0, 600.0, 1250.0, &rules);
        assert_eq!(plants.len(), 1);
    }

    #[test]
    fn test_frame_skip() {
        let mut bridge = GestureBridge::new();
        assert!(bridge.accept_frame(33.0));
        assert!(!bridge.accept_frame(33.0));
        assert!(bridge.accept_frame(66.0));
    }

    #[test]
    fn test_reset_forgets_everything() {
        let rules = Gesture::default();
        let mut bridge = GestureBridge::new();
        bridge.accept_frame(10.0);
        bridge.interpret(&[pinch(1)], 800.0, 600.0, 1000.0, &rules);
        bridge.reset();

        assert!(bridge.cursors().is_empty());
        assert!(bridge.accept_frame(10.0));
        assert_eq!(bridge.interpret(&[pinch(1)], 800.0, 600.0, 1001.0, &rules).len(), 1);
    }

    #[test]
    fn test_unpack_frame() {
        let data: [f32; 10] = [7.0, 0.1, 0.2, 0.3, 0.4, -1.0, 0.5, 0.6, 0.7, 0.8];
        let hands = HandObservation::from_packed(&data).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].id, HandId(7));
        assert_eq!(hands[1].id, HandId(1));
        assert!((hands[1].thumb_tip.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_unpack_malformed() {
        let err = HandObservation::from_packed(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, GestureError::MalformedFrame { len: 3 });
        assert!(err.to_string().contains("multiple of 5"));
        assert!(HandObservation::from_packed(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_draw_cursors() {
        let rules = Gesture::default();
        let mut bridge = GestureBridge::new();
        let open = hand(2, (0.7, 0.7), (0.9, 0.9));
        bridge.interpret(&[pinch(1), open], 800.0, 600.0, 0.0, &rules);

        let mut surface = RecordingSurface::new();
        bridge.draw_cursors(&mut surface, 500.0);
        assert_eq!(surface.fills().len(), 2);
        assert_eq!(surface.fills()[0].alpha, 0.95);
        assert_eq!(surface.fills()[1].alpha, 0.4);
        // Only the pinching hand gets a ring
        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.strokes()[0].color, RING_COLOR);
        assert!(surface.is_balanced());
    }
}
