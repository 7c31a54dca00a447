use serde::{Deserialize, Serialize};

use drawkit_core::units::LengthUnit;

use super::{Font, Graphical, Point, Style};
use crate::bbox::BBox;

/// Measured size of a text in document units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    /// Distance from the baseline to the top.
    pub ascent: f64,
    /// Distance from the baseline to the bottom.
    pub descent: f64,
}

/// Text metric queries answered by the rendering surface.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &Font) -> TextExtent;
}

/// Fixed-ratio estimate used when no rendering surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn measure(&self, text: &str, font: &Font) -> TextExtent {
        let size = LengthUnit::Point.to_storage(font.size);
        let advance = if font.bold { 0.65 } else { 0.6 };
        let lines: Vec<&str> = text.split('\n').collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        TextExtent {
            width: longest as f64 * size * advance,
            ascent: size * 0.8,
            descent: size * 0.2 + (lines.len() - 1) as f64 * size * 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    /// Left end of the first baseline.
    pub anchor: Point,
    pub content: String,
    pub font: Font,
    pub style: Style,
    pub extent: TextExtent,
}

impl TextShape {
    pub fn new(
        anchor: Point,
        content: impl Into<String>,
        font: Font,
        style: Style,
        measure: &dyn TextMeasure,
    ) -> Self {
        let content = content.into();
        let extent = measure.measure(&content, &font);
        Self {
            anchor,
            content,
            font,
            style,
            extent,
        }
    }

    pub fn with_content(&self, content: impl Into<String>, measure: &dyn TextMeasure) -> Self {
        let mut out = self.clone();
        out.content = content.into();
        out.extent = measure.measure(&out.content, &out.font);
        out
    }

    pub fn with_font(&self, font: Font, measure: &dyn TextMeasure) -> Self {
        let mut out = self.clone();
        out.extent = measure.measure(&out.content, &font);
        out.font = font;
        out
    }
}

impl Graphical for TextShape {
    /// Layout is external; the frame of the measured extent stands in for glyphs.
    fn render(&self) -> lyon::path::Path {
        let b = self.bounds();
        let mut builder = lyon::path::Path::builder();
        builder.begin(b.min.to_render());
        builder.line_to(Point::new(b.max.x, b.min.y).to_render());
        builder.line_to(b.max.to_render());
        builder.line_to(Point::new(b.min.x, b.max.y).to_render());
        builder.end(true);
        builder.build()
    }

    fn bounds(&self) -> BBox {
        BBox::new(
            self.anchor.x,
            self.anchor.y - self.extent.descent,
            self.anchor.x + self.extent.width,
            self.anchor.y + self.extent.ascent,
        )
    }

    fn map_points(&mut self, f: &mut dyn FnMut(Point) -> Point) {
        self.anchor = f(self.anchor);
    }
}
