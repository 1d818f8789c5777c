//! The native array value: a dtype, a shape, and a contiguous row-major
//! byte buffer.
//!
//! This is what sources hand to adapters and what clients hand back to
//! callers. The dtype here is the *open* [`Dtype`] — an `Array` can hold
//! data the catalog refuses to serve (datetime64, unicode), which is exactly
//! what lets adapter construction reject it instead of the data silently
//! never existing.

use num_complex::{Complex32, Complex64};

use crate::{Error, Result};
use super::{ArrayStructure, ByteOrder, Dtype, SourceKind};

// ============================================================================
// Element — typed construction and extraction
// ============================================================================

/// A Rust element type with a fixed dtype and a defined buffer encoding.
///
/// Implemented for the primitive numeric types plus [`Complex32`] and
/// [`Complex64`]. All implementations write native byte order.
pub trait Element: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    const DTYPE: Dtype;

    fn write_to(&self, out: &mut Vec<u8>);

    /// Decode one element from exactly `DTYPE.size` bytes in native order.
    fn read_from(bytes: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($($t:ty => $kind:expr),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: Dtype = Dtype {
                    kind: $kind,
                    size: std::mem::size_of::<$t>(),
                    order: ByteOrder::NATIVE,
                };

                fn write_to(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }

                fn read_from(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(&bytes[..std::mem::size_of::<$t>()]);
                    <$t>::from_ne_bytes(buf)
                }
            }
        )*
    };
}

impl_element! {
    i8 => SourceKind::Int,
    i16 => SourceKind::Int,
    i32 => SourceKind::Int,
    i64 => SourceKind::Int,
    u8 => SourceKind::UInt,
    u16 => SourceKind::UInt,
    u32 => SourceKind::UInt,
    u64 => SourceKind::UInt,
    f32 => SourceKind::Float,
    f64 => SourceKind::Float,
}

impl Element for bool {
    const DTYPE: Dtype = Dtype {
        kind: SourceKind::Bool,
        size: 1,
        order: ByteOrder::NATIVE,
    };

    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(*self as u8);
    }

    fn read_from(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl Element for Complex32 {
    const DTYPE: Dtype = Dtype {
        kind: SourceKind::Complex,
        size: 8,
        order: ByteOrder::NATIVE,
    };

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.re.to_ne_bytes());
        out.extend_from_slice(&self.im.to_ne_bytes());
    }

    fn read_from(bytes: &[u8]) -> Self {
        let mut re = [0u8; 4];
        let mut im = [0u8; 4];
        re.copy_from_slice(&bytes[..4]);
        im.copy_from_slice(&bytes[4..8]);
        Complex32::new(f32::from_ne_bytes(re), f32::from_ne_bytes(im))
    }
}

impl Element for Complex64 {
    const DTYPE: Dtype = Dtype {
        kind: SourceKind::Complex,
        size: 16,
        order: ByteOrder::NATIVE,
    };

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.re.to_ne_bytes());
        out.extend_from_slice(&self.im.to_ne_bytes());
    }

    fn read_from(bytes: &[u8]) -> Self {
        let mut re = [0u8; 8];
        let mut im = [0u8; 8];
        re.copy_from_slice(&bytes[..8]);
        im.copy_from_slice(&bytes[8..16]);
        Complex64::new(f64::from_ne_bytes(re), f64::from_ne_bytes(im))
    }
}

// ============================================================================
// Array
// ============================================================================

/// An in-memory array: dtype + shape + contiguous row-major bytes.
///
/// The byte-length invariant `data.len() == dtype.size × product(shape)`
/// holds for every constructed `Array` (the product of an empty shape is 1,
/// so a scalar holds exactly one element).
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dtype: Dtype,
    shape: Vec<usize>,
    data: Vec<u8>,
}

impl Array {
    /// Build a 1-d array from typed values.
    pub fn from_vec<T: Element>(values: Vec<T>) -> Array {
        let mut data = Vec::with_capacity(values.len() * T::DTYPE.size);
        for v in &values {
            v.write_to(&mut data);
        }
        Array {
            dtype: T::DTYPE,
            shape: vec![values.len()],
            data,
        }
    }

    /// Build an n-d array from typed values in row-major order.
    pub fn from_shape_vec<T: Element>(shape: Vec<usize>, values: Vec<T>) -> Result<Array> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(Error::StructureMismatch {
                expected: expected * T::DTYPE.size,
                actual: values.len() * T::DTYPE.size,
            });
        }
        let mut array = Array::from_vec(values);
        array.shape = shape;
        Ok(array)
    }

    /// Build a zero-dimensional array holding a single value.
    pub fn scalar<T: Element>(value: T) -> Array {
        let mut data = Vec::with_capacity(T::DTYPE.size);
        value.write_to(&mut data);
        Array {
            dtype: T::DTYPE,
            shape: Vec::new(),
            data,
        }
    }

    /// Build a 1-d array of fixed-width byte strings.
    ///
    /// Items shorter than `width` are padded with NUL bytes; items longer
    /// than `width` are an error — truncation would silently lose data.
    pub fn fixed_bytes<I, B>(width: usize, items: I) -> Result<Array>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        if width == 0 {
            return Err(Error::InvalidStructure(
                "fixed-width byte strings need a positive width".into(),
            ));
        }
        let mut data = Vec::new();
        let mut count = 0usize;
        for (i, item) in items.into_iter().enumerate() {
            let item = item.as_ref();
            if item.len() > width {
                return Err(Error::InvalidStructure(format!(
                    "item {i} is {} bytes, wider than the declared width {width}",
                    item.len()
                )));
            }
            data.extend_from_slice(item);
            data.resize((i + 1) * width, 0);
            count += 1;
        }
        Ok(Array {
            dtype: Dtype::bytes(width),
            shape: vec![count],
            data,
        })
    }

    /// Build an array from raw parts, validating the byte-length invariant.
    ///
    /// This is the entry point for data arriving from an external source —
    /// including dtypes the catalog will refuse to serve.
    pub fn from_raw_parts(dtype: Dtype, shape: Vec<usize>, data: Vec<u8>) -> Result<Array> {
        let expected = dtype.size * shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(Error::StructureMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Array { dtype, shape, data })
    }

    /// Reconstruct an array from a structure descriptor and a wire buffer.
    pub fn from_wire(structure: &ArrayStructure, data: Vec<u8>) -> Result<Array> {
        let expected = structure.nbytes();
        if data.len() != expected {
            return Err(Error::StructureMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Array {
            dtype: structure.dtype(),
            shape: structure.shape.to_vec(),
            data,
        })
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn nbytes(&self) -> usize {
        self.data.len()
    }

    /// The structure descriptor of this array, or `UnsupportedKind` if the
    /// dtype is outside the supported set.
    pub fn structure(&self) -> Result<ArrayStructure> {
        ArrayStructure::from_dtype(&self.dtype, &self.shape)
    }

    /// Decode the elements as `T`, in row-major order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.check_element_type::<T>()?;
        Ok(self
            .data
            .chunks_exact(self.dtype.size)
            .map(T::read_from)
            .collect())
    }

    /// Decode a zero-dimensional array into its single element.
    pub fn to_scalar<T: Element>(&self) -> Result<T> {
        if !self.is_scalar() {
            return Err(Error::TypeError {
                expected: "0-d scalar".into(),
                got: format!("{}-d array", self.ndim()),
            });
        }
        self.check_element_type::<T>()?;
        Ok(T::read_from(&self.data))
    }

    /// The raw bytes of one fixed-width string element.
    pub fn bytes_at(&self, index: usize) -> Result<&[u8]> {
        if self.dtype.kind != SourceKind::Bytes {
            return Err(Error::TypeError {
                expected: "fixed-width bytes".into(),
                got: self.dtype.to_string(),
            });
        }
        let count = self.element_count();
        if index >= count {
            return Err(Error::OutOfRange {
                axis: 0,
                selector: index.to_string(),
                extent: count,
            });
        }
        let width = self.dtype.size;
        Ok(&self.data[index * width..(index + 1) * width])
    }

    fn check_element_type<T: Element>(&self) -> Result<()> {
        if self.dtype.kind != T::DTYPE.kind || self.dtype.size != T::DTYPE.size {
            return Err(Error::TypeError {
                expected: T::DTYPE.to_string(),
                got: self.dtype.to_string(),
            });
        }
        if self.dtype.order != ByteOrder::NATIVE {
            return Err(Error::TypeError {
                expected: "native byte order".into(),
                got: self.dtype.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_vec_round_trip() {
        let values: Vec<i32> = (-10..10).collect();
        let array = Array::from_vec(values.clone());
        assert_eq!(array.shape(), &[20]);
        assert_eq!(array.dtype(), Dtype::int(4));
        assert_eq!(array.nbytes(), 80);
        assert_eq!(array.to_vec::<i32>().unwrap(), values);
    }

    #[test]
    fn test_bool_round_trip() {
        let values = vec![false, true, false, true];
        let array = Array::from_vec(values.clone());
        assert_eq!(array.dtype(), Dtype::bool());
        assert_eq!(array.to_vec::<bool>().unwrap(), values);
    }

    #[test]
    fn test_complex_round_trip() {
        let values: Vec<Complex32> =
            (0..4).map(|i| Complex32::new(0.0, i as f32)).collect();
        let array = Array::from_vec(values.clone());
        assert_eq!(array.dtype(), Dtype::complex(8));
        assert_eq!(array.to_vec::<Complex32>().unwrap(), values);
    }

    #[test]
    fn test_scalar_shape_is_empty() {
        let array = Array::scalar(42u64);
        assert!(array.is_scalar());
        assert_eq!(array.shape(), &[] as &[usize]);
        assert_eq!(array.element_count(), 1);
        assert_eq!(array.to_scalar::<u64>().unwrap(), 42);
    }

    #[test]
    fn test_to_scalar_rejects_arrays() {
        let array = Array::from_vec(vec![1u8]);
        assert!(matches!(
            array.to_scalar::<u8>(),
            Err(Error::TypeError { .. })
        ));
    }

    #[test]
    fn test_fixed_bytes_width_is_exact() {
        let array = Array::fixed_bytes(3, [b"aaa".as_slice(), b"bb", b""]).unwrap();
        assert_eq!(array.dtype(), Dtype::bytes(3));
        assert_eq!(array.nbytes(), 9);
        assert_eq!(array.bytes_at(0).unwrap(), b"aaa");
        // short items are NUL-padded, never reinterpreted
        assert_eq!(array.bytes_at(1).unwrap(), b"bb\0");
        assert_eq!(array.bytes_at(2).unwrap(), b"\0\0\0");
    }

    #[test]
    fn test_fixed_bytes_rejects_oversized_items() {
        assert!(matches!(
            Array::fixed_bytes(3, [b"toolong".as_slice()]),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_from_raw_parts_validates_length() {
        let err = Array::from_raw_parts(Dtype::int(4), vec![3], vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::StructureMismatch {
                expected: 12,
                actual: 11,
            }
        ));
    }

    #[test]
    fn test_from_shape_vec() {
        let array = Array::from_shape_vec(vec![2, 3], (0u16..6).collect()).unwrap();
        assert_eq!(array.shape(), &[2, 3]);
        assert!(Array::from_shape_vec(vec![2, 3], vec![0u16; 5]).is_err());
    }

    #[test]
    fn test_to_vec_enforces_dtype() {
        let array = Array::from_vec(vec![1u16, 2, 3]);
        // same width, different kind
        assert!(matches!(array.to_vec::<i16>(), Err(Error::TypeError { .. })));
        // same kind, different width
        assert!(matches!(array.to_vec::<u32>(), Err(Error::TypeError { .. })));
    }
}
