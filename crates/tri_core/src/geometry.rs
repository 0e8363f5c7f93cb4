//! Vertex / triangle / quad records and their text format.
//!
//! The text format is whitespace-separated ASCII floats, six per vertex in the
//! order `x y z r g b`. Records are read back to back from one stream, so a
//! file holding two triangles is simply 36 numbers.

use std::str::FromStr;

pub const FIELDS_PER_VERTEX: usize = 6;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    pub fn read(reader: &mut FieldReader<'_>) -> Result<Self, GeometryError> {
        let mut fields = [0.0f32; FIELDS_PER_VERTEX];
        for field in &mut fields {
            *field = reader.next_field()?;
        }
        Ok(Self {
            position: [fields[0], fields[1], fields[2]],
            color: [fields[3], fields[4], fields[5]],
        })
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

impl Triangle {
    pub fn read(reader: &mut FieldReader<'_>) -> Result<Self, GeometryError> {
        Ok(Self {
            v: [
                Vertex::read(reader)?,
                Vertex::read(reader)?,
                Vertex::read(reader)?,
            ],
        })
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quad {
    pub v: [Vertex; 4],
}

impl Quad {
    pub fn read(reader: &mut FieldReader<'_>) -> Result<Self, GeometryError> {
        Ok(Self {
            v: [
                Vertex::read(reader)?,
                Vertex::read(reader)?,
                Vertex::read(reader)?,
                Vertex::read(reader)?,
            ],
        })
    }

    /// Splits along the 0-2 diagonal, keeping the winding of the quad.
    pub fn to_triangles(&self) -> [Triangle; 2] {
        let [a, b, c, d] = self.v;
        [Triangle { v: [a, b, c] }, Triangle { v: [a, c, d] }]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The stream ran out before the record was complete.
    UnexpectedEnd { field: usize },
    InvalidNumber { field: usize, token: String },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEnd { field } => {
                write!(f, "unexpected end of input at field {field}")
            }
            Self::InvalidNumber { field, token } => {
                write!(f, "field {field}: '{token}' is not a number")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Sequential cursor over whitespace-separated numeric fields.
pub struct FieldReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
            consumed: 0,
        }
    }

    /// Number of fields read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn next_field(&mut self) -> Result<f32, GeometryError> {
        let field = self.consumed;
        let token = self
            .tokens
            .next()
            .ok_or(GeometryError::UnexpectedEnd { field })?;
        // `nan`, `inf` and out-of-range literals parse as f32 but are not usable coordinates.
        let value = token
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeometryError::InvalidNumber {
                field,
                token: token.to_string(),
            })?;
        self.consumed += 1;
        Ok(value)
    }
}

impl FromStr for Vertex {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vertex::read(&mut FieldReader::new(s))
    }
}

impl FromStr for Triangle {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Triangle::read(&mut FieldReader::new(s))
    }
}

impl FromStr for Quad {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quad::read(&mut FieldReader::new(s))
    }
}

/// Reads `count` consecutive triangles from the start of `text`.
pub fn parse_triangles(text: &str, count: usize) -> Result<Vec<Triangle>, GeometryError> {
    let mut reader = FieldReader::new(text);
    (0..count).map(|_| Triangle::read(&mut reader)).collect()
}
