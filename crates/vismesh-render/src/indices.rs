//! Face index buffers.

use vismesh_core::{ArrayData, Result, VisError};

/// Element width of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Size of one index in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// A flat face index buffer stored at its source width.
///
/// 8-, 16- and 32-bit unsigned sources keep their width; any other integer
/// source is promoted to 32 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Validates integer index data and stores it at the smallest sufficient width.
    ///
    /// Float data is a dtype error, negative indices are a value error.
    pub fn from_data(data: ArrayData) -> Result<Self> {
        match data {
            ArrayData::U8(v) => Ok(Self::U8(v)),
            ArrayData::U16(v) => Ok(Self::U16(v)),
            ArrayData::U32(v) => Ok(Self::U32(v)),
            ArrayData::F32(_) | ArrayData::F64(_) => Err(VisError::Dtype(
                "face data should be integer indices".to_string(),
            )),
            other => {
                let wide = other.to_i128_vec().unwrap_or_default();
                let mut promoted = Vec::with_capacity(wide.len());
                for value in wide {
                    if value < 0 {
                        return Err(VisError::value(
                            "face data should be non-negative integers",
                        ));
                    }
                    let index = u32::try_from(value).map_err(|_| {
                        VisError::value(format!("face index {value} does not fit in 32 bits"))
                    })?;
                    promoted.push(index);
                }
                Ok(Self::U32(promoted))
            }
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    /// Returns true if there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage width of the indices.
    pub fn index_type(&self) -> IndexType {
        match self {
            Self::U8(_) => IndexType::U8,
            Self::U16(_) => IndexType::U16,
            Self::U32(_) => IndexType::U32,
        }
    }

    /// Returns the index at position `i`.
    pub fn get(&self, i: usize) -> Option<usize> {
        match self {
            Self::U8(v) => v.get(i).map(|&x| usize::from(x)),
            Self::U16(v) => v.get(i).map(|&x| usize::from(x)),
            Self::U32(v) => v.get(i).map(|&x| x as usize),
        }
    }

    /// Iterates over the indices.
    pub fn iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            Self::U8(v) => Box::new(v.iter().map(|&x| usize::from(x))),
            Self::U16(v) => Box::new(v.iter().map(|&x| usize::from(x))),
            Self::U32(v) => Box::new(v.iter().map(|&x| x as usize)),
        }
    }

    /// Largest index, if any.
    pub fn max(&self) -> Option<usize> {
        self.iter().max()
    }

    /// Indices widened to 32 bits.
    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Self::U8(v) => v.iter().map(|&x| u32::from(x)).collect(),
            Self::U16(v) => v.iter().map(|&x| u32::from(x)).collect(),
            Self::U32(v) => v.clone(),
        }
    }

    /// Raw index bytes in native byte order, as uploaded to the device.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U8(v) => v,
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }
}
