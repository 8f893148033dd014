//! User-supplied numeric inputs.
//!
//! Form fields arrive as text. [`LineInput`] and [`RotationInput`] hold that
//! text and are passed into session operations explicitly; parsing turns
//! them into the typed [`LineSpec`] and [`RotationSpec`].

use thiserror::Error;

/// Largest accepted line thickness in pixels.
pub const MAX_LINE_THICKNESS: i32 = 32767;

/// Errors from parsing or validating user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The field does not contain a number.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// The field is a number but outside the accepted range.
    #[error("{field} is out of range ({value}): {reason}")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// An integer pixel coordinate. May lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A validated line request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    pub start: Point,
    pub end: Point,
    /// Line thickness in pixels, in `1..=MAX_LINE_THICKNESS`.
    pub thickness: i32,
}

impl LineSpec {
    /// Create a line, rejecting non-positive or oversized thickness.
    pub fn new(start: Point, end: Point, thickness: i32) -> Result<Self, InputError> {
        if thickness <= 0 {
            return Err(InputError::OutOfRange {
                field: "thickness",
                value: thickness.to_string(),
                reason: "must be positive",
            });
        }
        if thickness > MAX_LINE_THICKNESS {
            return Err(InputError::OutOfRange {
                field: "thickness",
                value: thickness.to_string(),
                reason: "exceeds the maximum line thickness",
            });
        }
        Ok(Self {
            start,
            end,
            thickness,
        })
    }
}

/// Raw text of the line form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    pub start_x: String,
    pub start_y: String,
    pub end_x: String,
    pub end_y: String,
    pub thickness: String,
}

impl LineInput {
    pub fn new(
        start_x: impl Into<String>,
        start_y: impl Into<String>,
        end_x: impl Into<String>,
        end_y: impl Into<String>,
        thickness: impl Into<String>,
    ) -> Self {
        Self {
            start_x: start_x.into(),
            start_y: start_y.into(),
            end_x: end_x.into(),
            end_y: end_y.into(),
            thickness: thickness.into(),
        }
    }

    /// Parse every field; the first invalid one is reported.
    pub fn parse(&self) -> Result<LineSpec, InputError> {
        let start = Point::new(
            parse_int("start x", &self.start_x)?,
            parse_int("start y", &self.start_y)?,
        );
        let end = Point::new(
            parse_int("end x", &self.end_x)?,
            parse_int("end y", &self.end_y)?,
        );
        let thickness = parse_int("thickness", &self.thickness)?;
        LineSpec::new(start, end, thickness)
    }
}

/// A validated rotation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSpec {
    /// Angle in degrees, positive = counter-clockwise. Always finite.
    pub angle_degrees: f64,
}

impl RotationSpec {
    pub fn new(angle_degrees: f64) -> Result<Self, InputError> {
        if !angle_degrees.is_finite() {
            return Err(InputError::OutOfRange {
                field: "angle",
                value: angle_degrees.to_string(),
                reason: "must be finite",
            });
        }
        Ok(Self { angle_degrees })
    }
}

/// Raw text of the rotation angle field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationInput {
    pub angle: String,
}

impl RotationInput {
    pub fn new(angle: impl Into<String>) -> Self {
        Self {
            angle: angle.into(),
        }
    }

    pub fn parse(&self) -> Result<RotationSpec, InputError> {
        let text = self.angle.trim();
        let angle = text.parse::<f64>().map_err(|_| InputError::NotANumber {
            field: "angle",
            value: self.angle.clone(),
        })?;
        RotationSpec::new(angle)
    }

    pub fn clear(&mut self) {
        self.angle.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.angle.is_empty()
    }
}

fn parse_int(field: &'static str, text: &str) -> Result<i32, InputError> {
    let trimmed = text.trim();
    trimmed.parse::<i32>().map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
            InputError::OutOfRange {
                field,
                value: trimmed.to_string(),
                reason: "does not fit in a 32-bit integer",
            }
        }
        _ => InputError::NotANumber {
            field,
            value: text.to_string(),
        },
    })
}
