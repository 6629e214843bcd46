//! Numeric array boundary type.
//!
//! [`Array`] is how raw numeric data enters vismesh: a shape plus a typed,
//! row-major element buffer. Setters validate the shape and element type once
//! and convert into their canonical storage (`Vec<Vec3>`, index buffers, ...);
//! arrays are never kept around internally.
//!
//! Native Rust containers convert for free:
//! - `Vec<Vec3>` / `Vec<[f32; 3]>` become `(N, 3)` arrays
//! - `Vec<Vec2>` becomes an `(N, 2)` array
//! - `Vec<T>` of any supported scalar becomes a 1D array
//! - `Vec<[T; K]>` becomes an `(N, K)` array

use glam::{UVec3, Vec2, Vec3};

use crate::error::{Result, VisError};

/// Element type of an [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ElementType {
    /// Returns true for the integer element types.
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::F32 | Self::F64)
    }
}

/// Typed, flat element storage for an [`Array`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! each_variant {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ArrayData::U8($values) => $body,
            ArrayData::U16($values) => $body,
            ArrayData::U32($values) => $body,
            ArrayData::U64($values) => $body,
            ArrayData::I8($values) => $body,
            ArrayData::I16($values) => $body,
            ArrayData::I32($values) => $body,
            ArrayData::I64($values) => $body,
            ArrayData::F32($values) => $body,
            ArrayData::F64($values) => $body,
        }
    };
}

impl ArrayData {
    /// Number of elements.
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::U8(_) => ElementType::U8,
            Self::U16(_) => ElementType::U16,
            Self::U32(_) => ElementType::U32,
            Self::U64(_) => ElementType::U64,
            Self::I8(_) => ElementType::I8,
            Self::I16(_) => ElementType::I16,
            Self::I32(_) => ElementType::I32,
            Self::I64(_) => ElementType::I64,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
        }
    }

    /// Converts every element to `f32`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn to_f32_vec(&self) -> Vec<f32> {
        match self {
            Self::F32(v) => v.clone(),
            Self::F64(v) => v.iter().map(|&x| x as f32).collect(),
            Self::U8(v) => v.iter().map(|&x| f32::from(x)).collect(),
            Self::U16(v) => v.iter().map(|&x| f32::from(x)).collect(),
            Self::U32(v) => v.iter().map(|&x| x as f32).collect(),
            Self::U64(v) => v.iter().map(|&x| x as f32).collect(),
            Self::I8(v) => v.iter().map(|&x| f32::from(x)).collect(),
            Self::I16(v) => v.iter().map(|&x| f32::from(x)).collect(),
            Self::I32(v) => v.iter().map(|&x| x as f32).collect(),
            Self::I64(v) => v.iter().map(|&x| x as f32).collect(),
        }
    }

    /// Widens every element to `i128`, or returns `None` for float data.
    pub fn to_i128_vec(&self) -> Option<Vec<i128>> {
        match self {
            Self::F32(_) | Self::F64(_) => None,
            Self::U8(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::U16(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::U32(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::U64(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::I8(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::I16(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::I32(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
            Self::I64(v) => Some(v.iter().map(|&x| i128::from(x)).collect()),
        }
    }
}

/// A shaped, typed numeric array.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    data: ArrayData,
}

impl Array {
    /// Creates an array, checking that the shape covers exactly the data.
    pub fn new(shape: impl Into<Vec<usize>>, data: ArrayData) -> Result<Self> {
        let shape = shape.into();
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(VisError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a 1D array.
    pub fn flat(data: ArrayData) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// The array shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Length of the first axis.
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Returns true if the first axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The element storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Consumes the array, returning its element storage.
    pub fn into_data(self) -> ArrayData {
        self.data
    }

    /// The element type.
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Returns true if this is an `(N, width)` array.
    pub fn is_rows_of(&self, width: usize) -> bool {
        self.ndim() == 2 && self.shape[1] == width
    }

    /// Converts an `(N, 3)` array to points.
    pub fn to_vec3s(&self) -> Result<Vec<Vec3>> {
        if !self.is_rows_of(3) {
            return Err(VisError::shape(format!(
                "expected an (N, 3) array, got shape {:?}",
                self.shape
            )));
        }
        Ok(self
            .data
            .to_f32_vec()
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .collect())
    }

    /// Converts an `(N, 2)` array to 2D points.
    pub fn to_vec2s(&self) -> Result<Vec<Vec2>> {
        if !self.is_rows_of(2) {
            return Err(VisError::shape(format!(
                "expected an (N, 2) array, got shape {:?}",
                self.shape
            )));
        }
        Ok(self
            .data
            .to_f32_vec()
            .chunks_exact(2)
            .map(Vec2::from_slice)
            .collect())
    }
}

macro_rules! impl_from_scalars {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl From<Vec<$t>> for Array {
            fn from(values: Vec<$t>) -> Self {
                Self::flat(ArrayData::$variant(values))
            }
        }

        impl From<&[$t]> for Array {
            fn from(values: &[$t]) -> Self {
                Self::flat(ArrayData::$variant(values.to_vec()))
            }
        }

        impl<const N: usize> From<Vec<[$t; N]>> for Array {
            fn from(rows: Vec<[$t; N]>) -> Self {
                Self {
                    shape: vec![rows.len(), N],
                    data: ArrayData::$variant(rows.into_iter().flatten().collect()),
                }
            }
        }
    )*};
}

impl_from_scalars!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

impl From<Vec<Vec3>> for Array {
    fn from(points: Vec<Vec3>) -> Self {
        Self::from(points.as_slice())
    }
}

impl From<&[Vec3]> for Array {
    fn from(points: &[Vec3]) -> Self {
        Self {
            shape: vec![points.len(), 3],
            data: ArrayData::F32(points.iter().flat_map(|p| p.to_array()).collect()),
        }
    }
}

impl From<Vec<Vec2>> for Array {
    fn from(points: Vec<Vec2>) -> Self {
        Self {
            shape: vec![points.len(), 2],
            data: ArrayData::F32(points.iter().flat_map(|p| p.to_array()).collect()),
        }
    }
}

impl From<Vec<UVec3>> for Array {
    fn from(faces: Vec<UVec3>) -> Self {
        Self {
            shape: vec![faces.len(), 3],
            data: ArrayData::U32(faces.iter().flat_map(|f| f.to_array()).collect()),
        }
    }
}
