/// A 2D immediate-mode drawing context.
///
/// Mirrors the subset of the HTML canvas API the garden draws with:
/// path construction, solid fills and strokes, an affine transform stack,
/// global alpha and shadow blur. Angles are radians.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, x: f64, y: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64);
    fn close_path(&mut self);

    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow(&mut self, blur: f64, color: &str);

    fn fill(&mut self);
    fn stroke(&mut self);
}
