//! Headless surface that records every call
//!
//! Used to verify drawing structure (balanced save/restore, which shapes
//! were filled, in what color) without a browser.

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { angle: f64 },
    Scale { x: f64, y: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cpx: f64, cpy: f64, x: f64, y: f64 },
    BezierCurveTo { cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64 },
    Ellipse { x: f64, y: f64, radius_x: f64, radius_y: f64 },
    ClosePath,
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    GlobalAlpha(f64),
    Shadow { blur: f64, color: String },
    Fill,
    Stroke,
}

/// A fill or stroke, with the style active when it happened
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: String,
    pub alpha: f64,
    /// Number of path commands since the last `BeginPath`
    pub path_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Style {
    fill: String,
    stroke: String,
    alpha: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    style: Style,
    saved: Vec<Style>,
    path_len: usize,
    max_depth: usize,
    fills: Vec<Paint>,
    strokes: Vec<Paint>,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn fills(&self) -> &[Paint] {
        &self.fills
    }

    pub fn strokes(&self) -> &[Paint] {
        &self.strokes
    }

    /// Fills painted with the given color
    pub fn fills_with(&self, color: &str) -> usize {
        self.fills.iter().filter(|p| p.color == color).count()
    }

    /// Every `save` has a matching `restore`
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty() && self.unbalanced_restores == 0
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// All numeric arguments recorded so far are finite
    pub fn all_finite(&self) -> bool {
        use DrawCommand::*;
        self.commands.iter().all(|c| {
            let values: Vec<f64> = match c {
                ClearRect { x, y, width, height } => vec![*x, *y, *width, *height],
                Translate { x, y } | Scale { x, y } | MoveTo { x, y } | LineTo { x, y } => vec![*x, *y],
                Rotate { angle } => vec![*angle],
                QuadraticCurveTo { cpx, cpy, x, y } => vec![*cpx, *cpy, *x, *y],
                BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y } => {
                    vec![*cp1x, *cp1y, *cp2x, *cp2y, *x, *y]
                }
                Arc { x, y, radius } => vec![*x, *y, *radius],
                Ellipse { x, y, radius_x, radius_y } => vec![*x, *y, *radius_x, *radius_y],
                LineWidth(v) | GlobalAlpha(v) => vec![*v],
                Shadow { blur, .. } => vec![*blur],
                _ => Vec::new(),
            };
            values.iter().all(|v| v.is_finite())
        })
    }

    fn push_path(&mut self, command: DrawCommand) {
        self.path_len += 1;
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.saved.push(self.style.clone());
        self.max_depth = self.max_depth.max(self.saved.len());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(style) => self.style = style,
            None => self.unbalanced_restores += 1,
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate { angle });
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn begin_path(&mut self) {
        self.path_len = 0;
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push_path(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_path(DrawCommand::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.push_path(DrawCommand::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.push_path(DrawCommand::BezierCurveTo { cp1x, cp1y, cp2x, cp2y, x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start_angle: f64, _end_angle: f64) {
        self.push_path(DrawCommand::Arc { x, y, radius });
    }

    fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, _rotation: f64) {
        self.push_path(DrawCommand::Ellipse { x, y, radius_x, radius_y });
    }

    fn close_path(&mut self) {
        self.push_path(DrawCommand::ClosePath);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.style.fill = color.to_string();
        self.commands.push(DrawCommand::FillColor(color.to_string()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.style.stroke = color.to_string();
        self.commands.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.style.alpha = alpha;
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.commands.push(DrawCommand::Shadow { blur, color: color.to_string() });
    }

    fn fill(&mut self) {
        self.fills.push(Paint {
            color: self.style.fill.clone(),
            alpha: self.style.alpha,
            path_len: self.path_len,
        });
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.strokes.push(Paint {
            color: self.style.stroke.clone(),
            alpha: self.style.alpha,
            path_len: self.path_len,
        });
        self.commands.push(DrawCommand::Stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_restored() {
        let mut s = RecordingSurface::new();
        s.set_fill_color("#111111");
        s.save();
        s.set_fill_color("#222222");
        s.set_global_alpha(0.5);
        s.fill();
        s.restore();
        s.fill();

        assert_eq!(s.fills()[0].color, "#222222");
        assert_eq!(s.fills()[0].alpha, 0.5);
        assert_eq!(s.fills()[1].color, "#111111");
        assert_eq!(s.fills()[1].alpha, 1.0);
        assert!(s.is_balanced());
    }

    #[test]
    fn test_unbalanced_restore_detected() {
        let mut s = RecordingSurface::new();
        s.restore();
        assert!(!s.is_balanced());
    }

    #[test]
    fn test_path_len_counts_since_begin() {
        let mut s = RecordingSurface::new();
        s.begin_path();
        s.move_to(0.0, 0.0);
        s.line_to(1.0, 0.0);
        s.line_to(1.0, 1.0);
        s.close_path();
        s.fill();
        assert_eq!(s.fills()[0].path_len, 4);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut s = RecordingSurface::new();
        s.move_to(0.0, 0.0);
        assert!(s.all_finite());
        s.line_to(f64::NAN, 1.0);
        assert!(!s.all_finite());
    }
}
