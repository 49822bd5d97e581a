//! Backend-agnostic draw commands.
//!
//! A `DisplayList` is replayed in order by whatever owns the pixels. Transforms
//! nest: every `PushTransform` is matched by a `PopTransform`, and shapes drawn
//! in between use the transformed frame.

use serde::Serialize;

use firewatch_core::types::{Point, Rect};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    /// Translate, then rotate by `rotate_deg` (clockwise, y down).
    PushTransform {
        translate: Point,
        rotate_deg: f64,
    },
    PopTransform,
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
    },
    Polyline {
        points: Vec<Point>,
        color: Color,
        width: f64,
    },
    /// Filled circle, optionally with a soft glow of the given blur radius.
    Circle {
        center: Point,
        radius: f64,
        color: Color,
        glow: Option<(Color, f64)>,
    },
    /// Pie slice from `start_deg` to `end_deg` around `center`.
    Wedge {
        center: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        fill: Color,
        stroke: Color,
    },
    /// Text centred on `position`.
    Text {
        position: Point,
        text: String,
        color: Color,
        size: f64,
    },
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Run `draw` inside a translate/rotate frame.
    pub fn with_transform(
        &mut self,
        translate: Point,
        rotate_deg: f64,
        draw: impl FnOnce(&mut DisplayList),
    ) {
        self.push(DrawCommand::PushTransform {
            translate,
            rotate_deg,
        });
        draw(self);
        self.push(DrawCommand::PopTransform);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.push(DrawCommand::StrokeRect { rect, color, width });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.push(DrawCommand::Polyline {
            points: vec![from, to],
            color,
            width,
        });
    }

    pub fn text(&mut self, position: Point, text: impl Into<String>, color: Color, size: f64) {
        self.push(DrawCommand::Text {
            position,
            text: text.into(),
            color,
            size,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current transform nesting after replaying every command. Zero for a
    /// well-formed list.
    pub fn transform_depth(&self) -> i64 {
        self.commands.iter().fold(0, |depth, c| match c {
            DrawCommand::PushTransform { .. } => depth + 1,
            DrawCommand::PopTransform => depth - 1,
            _ => depth,
        })
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
