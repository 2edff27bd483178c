// Renderer that draws particles and layered bolts onto anything implementing
// `Surface`. The browser canvas is one such surface; tests record calls.

use crate::config::{ParticleConfig, StrokePreset};
use crate::lightning::{Bolt, Point};
use crate::particle::ParticleField;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub style: String,
    pub width: f64,
    pub blur: f64,
    pub shadow: String,
}

/// The handful of 2D drawing primitives the effects need.
///
/// Every primitive returns a `Result` so a canvas that rejects a call (a
/// negative arc radius, say) is reported through the render path.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue>;
    fn fill_disc(&mut self, center: Point, radius: f64, fill: &str) -> Result<(), JsValue>;
    // Straight segment, no shadow
    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        style: &str,
        width: f64,
    ) -> Result<(), JsValue>;
    fn stroke_path(&mut self, points: &[Point], stroke: &Stroke) -> Result<(), JsValue>;
    fn reset_shadow(&mut self) -> Result<(), JsValue>;
}

pub struct Renderer<S: Surface> {
    pub surface: S,
    pub strokes: StrokePreset,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S, strokes: StrokePreset) -> Self {
        Renderer { surface, strokes }
    }

    pub fn clear_screen(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.surface.clear(width, height)
    }

    pub fn render_particles(
        &mut self,
        field: &ParticleField,
        config: &ParticleConfig,
    ) -> Result<(), JsValue> {
        let fill = config.color.to_hex();
        for p in field.particles() {
            self.surface.fill_disc(p.pos, p.radius, &fill)?;
        }
        for link in field.links(config.link_distance) {
            let alpha = link_alpha(link.distance, config);
            self.surface.stroke_line(
                link.from,
                link.to,
                &config.color.to_rgba(alpha),
                config.link_width,
            )?;
        }
        Ok(())
    }

    /// Draws a bolt once per layer, outermost first. Each layer's alpha is
    /// multiplied by the bolt's current opacity.
    pub fn render_bolt(&mut self, bolt: &Bolt) -> Result<(), JsValue> {
        let opacity = bolt.opacity();
        for layer in &self.strokes.layers {
            let stroke = Stroke {
                style: layer.color.to_rgba(layer.alpha * opacity),
                width: layer.width,
                blur: layer.blur,
                shadow: layer.shadow.to_hex(),
            };
            self.surface.stroke_path(&bolt.points, &stroke)?;
        }
        self.surface.reset_shadow()
    }

    pub fn render_bolts(&mut self, bolts: &[Bolt]) -> Result<(), JsValue> {
        for bolt in bolts {
            self.render_bolt(bolt)?;
        }
        Ok(())
    }
}

// Fades linearly from `link_alpha` at distance 0 to nothing at `link_distance`
pub fn link_alpha(distance: f64, config: &ParticleConfig) -> f64 {
    if config.link_distance <= 0.0 {
        return 0.0;
    }
    (config.link_alpha * (1.0 - distance / config.link_distance)).max(0.0)
}


#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;
    use crate::particle::Particle;

    #[test]
    fn bolt_layers_scale_with_opacity() {
        let mut renderer = Renderer::new(RecordingSurface::default(), StrokePreset::wide());
        let bolt = Bolt::new(vec![[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]], 0.5, 0.03);
        renderer.render_bolt(&bolt).unwrap();

        let calls = &renderer.surface.calls;
        assert_eq!(calls.len(), 4);
        let strokes: Vec<&Stroke> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Path(3, s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(strokes[0].style, "rgba(252, 218, 0, 0.3)");
        assert_eq!(strokes[1].style, "rgba(252, 218, 0, 0.5)");
        assert_eq!(strokes[2].style, "rgba(255, 255, 255, 0.45)");
        assert_eq!(strokes[0].width, 4.0);
        assert_eq!(strokes[1].blur, 7.5);
        assert_eq!(strokes[2].shadow, "#ffffff");
        assert_eq!(calls[3], Call::ResetShadow);
    }

    #[test]
    fn border_preset_draws_two_layers() {
        let mut renderer = Renderer::new(RecordingSurface::default(), StrokePreset::border());
        renderer.render_bolts(&[
            Bolt::new(vec![[0.0, 0.0], [1.0, 0.0]], 1.0, 0.0),
            Bolt::new(vec![[0.0, 0.0], [1.0, 0.0]], 1.0, 0.0),
        ])
        .unwrap();
        let paths = renderer
            .surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Path(..)))
            .count();
        assert_eq!(paths, 4);
    }

    #[test]
    fn particles_get_discs_and_faded_links() {
        let config = ParticleConfig::default();
        let mut field = ParticleField::new(500.0, 500.0);
        field.push(Particle::new(0.0, 0.0, 0.0, 0.0, 2.0));
        field.push(Particle::new(75.0, 0.0, 0.0, 0.0, 1.5));
        let mut renderer = Renderer::new(RecordingSurface::default(), StrokePreset::wide());
        renderer.render_particles(&field, &config).unwrap();

        let calls = &renderer.surface.calls;
        assert_eq!(calls[0], Call::Disc([0.0, 0.0], 2.0, "#fcda00".to_owned()));
        assert_eq!(calls[1], Call::Disc([75.0, 0.0], 1.5, "#fcda00".to_owned()));
        assert_eq!(
            calls[2],
            Call::Line(
                [0.0, 0.0],
                [75.0, 0.0],
                "rgba(252, 218, 0, 0.1)".to_owned(),
                0.5
            )
        );
    }

    #[test]
    fn link_alpha_hits_zero_at_threshold() {
        let config = ParticleConfig::default();
        assert_eq!(link_alpha(0.0, &config), 0.2);
        assert_eq!(link_alpha(150.0, &config), 0.0);
        assert_eq!(link_alpha(200.0, &config), 0.0);
    }

    // Rejects every path stroke, the way a canvas rejects bad arguments
    #[derive(Default)]
    struct RejectingSurface {
        strokes: usize,
    }

    impl Surface for RejectingSurface {
        fn clear(&mut self, _width: f64, _height: f64) -> Result<(), JsValue> {
            Ok(())
        }

        fn fill_disc(&mut self, _center: Point, _radius: f64, _fill: &str) -> Result<(), JsValue> {
            Ok(())
        }

        fn stroke_line(
            &mut self,
            _from: Point,
            _to: Point,
            _style: &str,
            _width: f64,
        ) -> Result<(), JsValue> {
            Ok(())
        }

        fn stroke_path(&mut self, _points: &[Point], _stroke: &Stroke) -> Result<(), JsValue> {
            self.strokes += 1;
            Err(JsValue::NULL)
        }

        fn reset_shadow(&mut self) -> Result<(), JsValue> {
            Ok(())
        }
    }

    #[test]
    fn stroke_errors_stop_the_bolt_pass() {
        let mut renderer = Renderer::new(RejectingSurface::default(), StrokePreset::wide());
        let bolt = Bolt::new(vec![[0.0, 0.0], [10.0, 10.0]], 1.0, 0.03);
        assert!(renderer.render_bolts(&[bolt.clone(), bolt]).is_err());
        assert_eq!(renderer.surface.strokes, 1);
    }
}
