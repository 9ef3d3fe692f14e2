use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

pub mod animation;
pub mod config;
pub mod flower;
pub mod garden;
pub mod math;
pub mod particles;
pub mod render;

use config::GardenConfig;
use garden::{Garden, GestureError, GestureSource, HandObservation};
use render::CanvasSurface;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init finds a logger already installed; keep it
    console_log::init_with_level(log::Level::Info).ok();
}

/// Hand recognizer living on the JavaScript side.
///
/// Called with the frame timestamp, it returns a `Float32Array` of
/// `[id, index_x, index_y, thumb_x, thumb_y]` per hand, or nothing.
struct JsRecognizer {
    func: js_sys::Function,
}

impl GestureSource for JsRecognizer {
    fn recognize(&mut self, now: f64) -> Result<Vec<HandObservation>, GestureError> {
        let value = self
            .func
            .call1(&JsValue::NULL, &JsValue::from_f64(now))
            .map_err(|e| GestureError::Recognizer(describe(&e)))?;

        if value.is_undefined() || value.is_null() {
            return Ok(Vec::new());
        }

        let frame = value
            .dyn_into::<js_sys::Float32Array>()
            .map_err(|v| GestureError::Recognizer(format!("expected Float32Array, got {}", describe(&v))))?;
        HandObservation::from_packed(&frame.to_vec())
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Garden engine exposed to JavaScript.
///
/// Timestamps are wall-clock milliseconds (`Date.now()`), the same clock
/// `plant` reads.
#[wasm_bindgen]
pub struct DaisyGarden {
    garden: Garden,
    surface: CanvasSurface,
    recognizer: Option<JsRecognizer>,
}

impl DaisyGarden {
    fn build(canvas: HtmlCanvasElement, config: GardenConfig) -> Result<DaisyGarden, JsValue> {
        let surface = CanvasSurface::from_canvas(&canvas).map_err(|e| JsValue::from_str(&e))?;
        let seed = config
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
        let garden = Garden::new(config, canvas.width() as f64, canvas.height() as f64, seed);

        Ok(Self {
            garden,
            surface,
            recognizer: None,
        })
    }
}

#[wasm_bindgen]
impl DaisyGarden {
    /// Create a garden with the stock configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<DaisyGarden, JsValue> {
        Self::build(canvas, GardenConfig::default())
    }

    /// Create a garden from a YAML configuration document
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<DaisyGarden, JsValue> {
        let config = GardenConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e))?;
        log::info!("Loaded garden config");
        Self::build(canvas, config)
    }

    /// Plant at surface-local pixel coordinates. Returns how many flowers
    /// were planted.
    #[wasm_bindgen]
    pub fn plant(&mut self, x: f64, y: f64) -> usize {
        self.garden.add_flower(x, y, js_sys::Date::now())
    }

    /// Draw one frame. Returns the current score.
    #[wasm_bindgen]
    pub fn tick(&mut self, now: f64) -> u32 {
        self.garden.tick(&mut self.surface, now).score
    }

    /// Resize the canvas and the garden bounds
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(canvas) = self.surface.ctx.canvas() {
            canvas.set_width(width);
            canvas.set_height(height);
        }
        self.garden.resize(width as f64, height as f64);
    }

    /// Spray a celebration burst by hand
    #[wasm_bindgen]
    pub fn trigger_confetti(&mut self, multiplier: usize) {
        self.garden.trigger_confetti(multiplier);
    }

    /// `callback(score)` runs after every frame that collected flowers
    #[wasm_bindgen]
    pub fn set_score_callback(&mut self, callback: js_sys::Function) {
        self.garden.set_score_listener(move |score| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(score)) {
                log::warn!("Score callback threw: {}", describe(&e));
            }
        });
    }

    #[wasm_bindgen]
    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        self.garden.set_gestures_enabled(enabled);
    }

    #[wasm_bindgen]
    pub fn gestures_enabled(&self) -> bool {
        self.garden.gestures_enabled()
    }

    /// Install the hand recognizer polled by `poll_gestures`
    #[wasm_bindgen]
    pub fn set_gesture_recognizer(&mut self, recognizer: js_sys::Function) {
        self.recognizer = Some(JsRecognizer { func: recognizer });
    }

    #[wasm_bindgen]
    pub fn clear_gesture_recognizer(&mut self) {
        self.recognizer = None;
    }

    /// Recognize hands in the video frame at `video_time`. Frames already
    /// seen are skipped. Returns how many flowers were planted.
    #[wasm_bindgen]
    pub fn poll_gestures(&mut self, video_time: f64, now: f64) -> usize {
        match self.recognizer.as_mut() {
            Some(recognizer) => self.garden.poll_gestures(recognizer, video_time, now),
            None => 0,
        }
    }

    #[wasm_bindgen]
    pub fn score(&self) -> u32 {
        self.garden.score()
    }

    #[wasm_bindgen]
    pub fn flower_count(&self) -> usize {
        self.garden.flowers().len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.garden.confetti().count()
    }
}
