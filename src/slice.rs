//! Slice selectors and the row-major strided gather.
//!
//! A [`Slice`] is a per-dimension tuple of [`DimRange`] selectors. Omitted
//! trailing dimensions default to the full range, and the empty slice applied
//! to a zero-dimensional entry is a no-op that selects the single scalar.
//!
//! Selectors that exceed an extent are an error — never clamped, never
//! wrapped. An empty selection (`stop <= start`) is legal.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

// ============================================================================
// DimRange
// ============================================================================

/// A forward range selector on one axis: start, optional stop, step.
///
/// `stop = None` means "to the end of the axis". Step must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimRange {
    pub start: usize,
    pub stop: Option<usize>,
    pub step: usize,
}

impl DimRange {
    /// The whole axis.
    pub const FULL: DimRange = DimRange {
        start: 0,
        stop: None,
        step: 1,
    };

    pub const fn new(start: usize, stop: Option<usize>, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// Pin this selector against a concrete extent.
    fn resolve(&self, extent: usize, axis: usize) -> Result<ResolvedDim> {
        if self.step == 0 {
            return Err(Error::InvalidSlice(format!(
                "step must be at least 1 on axis {axis}"
            )));
        }
        let stop = self.stop.unwrap_or(extent);
        if self.start > extent || stop > extent {
            return Err(Error::OutOfRange {
                axis,
                selector: self.to_string(),
                extent,
            });
        }
        let count = if stop > self.start {
            (stop - self.start).div_ceil(self.step)
        } else {
            0
        };
        Ok(ResolvedDim {
            start: self.start,
            step: self.step,
            count,
        })
    }
}

impl Default for DimRange {
    fn default() -> Self {
        DimRange::FULL
    }
}

impl fmt::Display for DimRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stop {
            Some(stop) => write!(f, "{}:{}:{}", self.start, stop, self.step),
            None => write!(f, "{}::{}", self.start, self.step),
        }
    }
}

impl From<std::ops::Range<usize>> for DimRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, Some(r.end), 1)
    }
}

impl From<std::ops::RangeInclusive<usize>> for DimRange {
    fn from(r: std::ops::RangeInclusive<usize>) -> Self {
        Self::new(*r.start(), Some(*r.end() + 1), 1)
    }
}

impl From<std::ops::RangeFrom<usize>> for DimRange {
    fn from(r: std::ops::RangeFrom<usize>) -> Self {
        Self::new(r.start, None, 1)
    }
}

impl From<std::ops::RangeTo<usize>> for DimRange {
    fn from(r: std::ops::RangeTo<usize>) -> Self {
        Self::new(0, Some(r.end), 1)
    }
}

impl From<std::ops::RangeFull> for DimRange {
    fn from(_: std::ops::RangeFull) -> Self {
        DimRange::FULL
    }
}

// ============================================================================
// Slice
// ============================================================================

/// A per-dimension selector tuple.
///
/// Fewer selectors than axes leaves the remaining axes at the full range, so
/// `Slice::all()` selects everything — including the single element of a
/// zero-dimensional entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slice(SmallVec<[DimRange; 4]>);

impl Slice {
    /// Everything, on every axis.
    pub fn all() -> Slice {
        Slice(SmallVec::new())
    }

    pub fn of(dims: impl IntoIterator<Item = DimRange>) -> Slice {
        Slice(dims.into_iter().collect())
    }

    pub fn dims(&self) -> &[DimRange] {
        &self.0
    }

    /// Pin every selector against a concrete shape.
    ///
    /// More selectors than axes is an error; in particular any selector at
    /// all on a zero-dimensional shape (selecting "everything" of a scalar
    /// is expressed by the empty slice and is a no-op).
    pub fn resolve(&self, shape: &[usize]) -> Result<ResolvedSlice> {
        if self.0.len() > shape.len() {
            return Err(Error::InvalidSlice(format!(
                "{} selectors for {}-dimensional data",
                self.0.len(),
                shape.len()
            )));
        }
        let mut dims = Vec::with_capacity(shape.len());
        for (axis, &extent) in shape.iter().enumerate() {
            let selector = self.0.get(axis).copied().unwrap_or(DimRange::FULL);
            dims.push(selector.resolve(extent, axis)?);
        }
        Ok(ResolvedSlice { dims })
    }
}

impl From<DimRange> for Slice {
    fn from(dim: DimRange) -> Slice {
        Slice::of([dim])
    }
}

impl From<std::ops::Range<usize>> for Slice {
    fn from(r: std::ops::Range<usize>) -> Slice {
        Slice::of([r.into()])
    }
}

impl From<std::ops::RangeFrom<usize>> for Slice {
    fn from(r: std::ops::RangeFrom<usize>) -> Slice {
        Slice::of([r.into()])
    }
}

impl From<std::ops::RangeTo<usize>> for Slice {
    fn from(r: std::ops::RangeTo<usize>) -> Slice {
        Slice::of([r.into()])
    }
}

impl From<std::ops::RangeFull> for Slice {
    fn from(_: std::ops::RangeFull) -> Slice {
        Slice::all()
    }
}

impl<const N: usize> From<[DimRange; N]> for Slice {
    fn from(dims: [DimRange; N]) -> Slice {
        Slice::of(dims)
    }
}

// ============================================================================
// Resolved selectors
// ============================================================================

/// A selector pinned to an axis: concrete start, step, and element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDim {
    pub start: usize,
    pub step: usize,
    pub count: usize,
}

/// A slice pinned to a shape; one [`ResolvedDim`] per source axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub dims: Vec<ResolvedDim>,
}

impl ResolvedSlice {
    /// Shape of the selected region.
    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.count).collect()
    }

    pub fn element_count(&self) -> usize {
        self.dims.iter().map(|d| d.count).product()
    }
}

// ============================================================================
// Gather
// ============================================================================

/// Copy the selected region of a contiguous row-major buffer into a fresh
/// contiguous row-major buffer.
///
/// `shape` and `resolved.dims` must have the same rank and `data` must hold
/// exactly `item_width × product(shape)` bytes — both guaranteed by the
/// adapter that owns the buffer.
pub(crate) fn gather(
    data: &[u8],
    shape: &[usize],
    item_width: usize,
    resolved: &ResolvedSlice,
) -> Vec<u8> {
    let total = resolved.element_count();
    let mut out = Vec::with_capacity(total * item_width);
    if total == 0 {
        return out;
    }
    if shape.is_empty() {
        // 0-d: the empty selection of a scalar is the scalar itself
        out.extend_from_slice(data);
        return out;
    }

    // element strides of the source buffer, row-major
    let mut strides = vec![1usize; shape.len()];
    for d in (0..shape.len() - 1).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }

    let last = shape.len() - 1;
    let inner = resolved.dims[last];
    // when the innermost axis is unit-step its run is contiguous in the
    // source and can be copied in one shot
    let contiguous_run = inner.step == 1;

    let mut idx = vec![0usize; last];
    loop {
        let mut base = 0usize;
        for d in 0..last {
            base += (resolved.dims[d].start + idx[d] * resolved.dims[d].step) * strides[d];
        }
        if contiguous_run {
            let offset = (base + inner.start) * item_width;
            out.extend_from_slice(&data[offset..offset + inner.count * item_width]);
        } else {
            for i in 0..inner.count {
                let offset = (base + inner.start + i * inner.step) * item_width;
                out.extend_from_slice(&data[offset..offset + item_width]);
            }
        }

        // odometer over the outer axes
        let mut d = last;
        loop {
            if d == 0 {
                return out;
            }
            d -= 1;
            idx[d] += 1;
            if idx[d] < resolved.dims[d].count {
                break;
            }
            idx[d] = 0;
        }
    }
}
