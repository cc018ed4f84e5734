//! CPU raster backing the drawing surface.

use crate::color::SerializableColor;
use crate::error::{SurfaceError, SurfaceResult};
use kurbo::{BezPath, PathEl, Point};
use std::sync::Arc;
use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Full-canvas RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

/// Immutable copy of a raster at one instant. Cloning shares the pixels.
#[derive(Debug, Clone)]
pub struct RasterSnapshot(Arc<Pixmap>);

impl RasterSnapshot {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Whether two snapshots hold identical pixels.
    pub fn same_pixels(&self, other: &RasterSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.data() == other.0.data()
    }
}

impl Raster {
    /// Allocate a raster filled with `background`.
    pub fn new(width: u32, height: u32, background: SerializableColor) -> SurfaceResult<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        pixmap.fill(background.to_skia());
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: SerializableColor) {
        self.pixmap.fill(color.to_skia());
    }

    /// Stroke a single segment with round caps and joins.
    pub fn stroke_segment(&mut self, from: Point, to: Point, color: SerializableColor, width: f64) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, width);
        }
    }

    /// Stroke an arbitrary outline with round caps and joins.
    pub fn stroke_path(&mut self, path: &BezPath, color: SerializableColor, width: f64) {
        if let Some(path) = to_skia_path(path) {
            self.stroke(&path, color, width);
        }
    }

    fn stroke(&mut self, path: &Path, color: SerializableColor, width: f64) {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }

    /// Capture the current pixels.
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot(Arc::new(self.pixmap.clone()))
    }

    /// Replace the pixels with a previously captured snapshot.
    ///
    /// Returns false when the snapshot was taken at a different size.
    pub fn restore(&mut self, snapshot: &RasterSnapshot) -> bool {
        if snapshot.width() != self.width() || snapshot.height() != self.height() {
            log::warn!(
                "Snapshot size {}x{} does not match raster {}x{}",
                snapshot.width(),
                snapshot.height(),
                self.width(),
                self.height()
            );
            return false;
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.0.data());
        true
    }

    /// Color of a single pixel (straight alpha).
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            SerializableColor::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Whether every pixel equals `color`.
    pub fn is_uniform(&self, color: SerializableColor) -> bool {
        let expected = color.to_skia().premultiply().to_color_u8();
        self.pixmap.pixels().iter().all(|p| *p == expected)
    }

    /// Straight-alpha RGBA bytes, row-major, as expected by canvas `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }

    /// Encode the raster as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> SurfaceResult<Vec<u8>> {
        let rgba = self.to_rgba();
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
            writer.finish()?;
        }
        Ok(png_data)
    }
}

/// Convert a kurbo path into a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
