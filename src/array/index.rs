//! Indexing: per-axis integer or slice keys, selection and assignment

use super::{NdArray, Shape, Storage};
use crate::dtype::{Complex128, Scalar};
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// Slice over one axis: `start`, optional `stop`, `step`
///
/// `stop = None` runs to the end of the axis. Negative `start`/`stop` count
/// from the end of the axis. `step` must be at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SliceKey {
    /// First selected position
    pub start: isize,
    /// One past the last selected position, `None` for the axis end
    pub stop: Option<isize>,
    /// Stride between selected positions
    pub step: usize,
}

impl SliceKey {
    /// Create a slice key
    pub const fn new(start: isize, stop: Option<isize>, step: usize) -> Self {
        Self { start, stop, step }
    }

    /// Whole axis
    pub const fn all() -> Self {
        Self::new(0, None, 1)
    }

    /// `start..stop` with unit step
    pub const fn range(start: isize, stop: isize) -> Self {
        Self::new(start, Some(stop), 1)
    }

    /// Same bounds with a different step
    pub const fn with_step(self, step: usize) -> Self {
        Self { step, ..self }
    }
}

impl From<Range<isize>> for SliceKey {
    fn from(r: Range<isize>) -> Self {
        Self::range(r.start, r.end)
    }
}

impl From<RangeFrom<isize>> for SliceKey {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::new(r.start, None, 1)
    }
}

impl From<RangeTo<isize>> for SliceKey {
    fn from(r: RangeTo<isize>) -> Self {
        Self::new(0, Some(r.end), 1)
    }
}

impl From<RangeFull> for SliceKey {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}

/// Key for one axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisIndex {
    /// Single position; collapses the axis
    At(isize),
    /// Run of positions; keeps the axis
    Slice(SliceKey),
}

impl AxisIndex {
    /// Single position
    pub const fn at(index: isize) -> Self {
        Self::At(index)
    }

    /// Whole axis
    pub const fn all() -> Self {
        Self::Slice(SliceKey::all())
    }

    /// `start..stop` with unit step
    pub const fn range(start: isize, stop: isize) -> Self {
        Self::Slice(SliceKey::range(start, stop))
    }
}

impl From<isize> for AxisIndex {
    fn from(index: isize) -> Self {
        Self::At(index)
    }
}

impl From<SliceKey> for AxisIndex {
    fn from(key: SliceKey) -> Self {
        Self::Slice(key)
    }
}

impl From<Range<isize>> for AxisIndex {
    fn from(r: Range<isize>) -> Self {
        Self::Slice(r.into())
    }
}

impl From<RangeFull> for AxisIndex {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}

/// Result of [`NdArray::get`]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// Every axis was collapsed by an integer key
    Scalar(Scalar),
    /// At least one axis was sliced; the selected elements as a new array
    Array(NdArray),
}

impl Selection {
    /// The scalar, if this selection is one
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    /// The array, if this selection is one
    pub fn into_array(self) -> Option<NdArray> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(a) => Some(a),
        }
    }
}

/// Right-hand side of [`NdArray::set`]
#[derive(Clone, Copy, Debug)]
pub enum Assignment<'a> {
    /// Broadcast over the selected region
    Scalar(Scalar),
    /// Copied element-wise; its shape must equal the selection's shape
    Array(&'a NdArray),
}

impl From<Scalar> for Assignment<'_> {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<f64> for Assignment<'_> {
    fn from(v: f64) -> Self {
        Self::Scalar(Scalar::Real(v))
    }
}

impl From<i32> for Assignment<'_> {
    fn from(v: i32) -> Self {
        Self::Scalar(Scalar::from(v))
    }
}

impl From<Complex128> for Assignment<'_> {
    fn from(z: Complex128) -> Self {
        Self::Scalar(Scalar::Complex(z))
    }
}

impl<'a> From<&'a NdArray> for Assignment<'a> {
    fn from(a: &'a NdArray) -> Self {
        Self::Array(a)
    }
}

/// Resolved positions along one axis
#[derive(Copy, Clone, Debug)]
struct AxisRun {
    start: usize,
    step: usize,
    count: usize,
    collapsed: bool,
}

impl AxisRun {
    #[inline]
    fn position(&self, k: usize) -> usize {
        self.start + k * self.step
    }
}

/// Normalize a possibly negative position against an axis length
#[inline]
fn normalize(index: isize, len: usize) -> Option<usize> {
    let idx = if index < 0 {
        len as isize + index
    } else {
        index
    };
    (idx >= 0).then_some(idx as usize)
}

fn resolve_axis(key: AxisIndex, len: usize) -> Result<AxisRun> {
    match key {
        AxisIndex::At(index) => {
            let pos = normalize(index, len)
                .filter(|&p| p < len)
                .ok_or(Error::IndexOutOfBounds { index, size: len })?;
            Ok(AxisRun {
                start: pos,
                step: 1,
                count: 1,
                collapsed: true,
            })
        }
        AxisIndex::Slice(SliceKey { start, stop, step }) => {
            if step == 0 {
                return Err(Error::invalid_argument("step", "must be at least 1"));
            }
            let first = normalize(start, len)
                .filter(|&p| p <= len)
                .ok_or(Error::IndexOutOfBounds {
                    index: start,
                    size: len,
                })?;
            let end = match stop {
                None => len,
                Some(stop) => normalize(stop, len).filter(|&p| p <= len).ok_or(
                    Error::IndexOutOfBounds {
                        index: stop,
                        size: len,
                    },
                )?,
            };
            let count = if end > first {
                (end - first).div_ceil(step)
            } else {
                0
            };
            if count == 0 {
                return Err(Error::invalid_argument(
                    "key",
                    format!("slice {start}..{end} selects no elements"),
                ));
            }
            Ok(AxisRun {
                start: first,
                step,
                count,
                collapsed: false,
            })
        }
    }
}

/// Rectangular region addressed by a key
#[derive(Debug)]
struct Region {
    rows: AxisRun,
    cols: AxisRun,
}

impl Region {
    /// Shape of the selection; empty when every axis collapsed
    fn out_shape(&self) -> SmallVec<[usize; 2]> {
        [self.rows, self.cols]
            .iter()
            .filter(|run| !run.collapsed)
            .map(|run| run.count)
            .collect()
    }

    /// Flat offsets of the selected elements in row-major selection order
    fn offsets(&self, ncols: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows.count).flat_map(move |r| {
            let row = self.rows.position(r);
            (0..self.cols.count).map(move |c| row * ncols + self.cols.position(c))
        })
    }
}

impl NdArray {
    fn resolve(&self, key: &[AxisIndex]) -> Result<Region> {
        if key.len() != self.ndim() {
            return Err(Error::invalid_argument(
                "key",
                format!(
                    "expected {} indices for a {}-D array, got {}",
                    self.ndim(),
                    self.ndim(),
                    key.len()
                ),
            ));
        }

        let (rows, cols) = match key {
            [col] => (
                AxisRun {
                    start: 0,
                    step: 1,
                    count: 1,
                    collapsed: true,
                },
                resolve_axis(*col, self.ncols())?,
            ),
            [row, col] => (
                resolve_axis(*row, self.nrows())?,
                resolve_axis(*col, self.ncols())?,
            ),
            _ => unreachable!("shape rank is validated to 1 or 2"),
        };
        Ok(Region { rows, cols })
    }

    /// Read the elements addressed by `key`
    ///
    /// `key` has one entry per axis. Integer entries collapse their axis,
    /// slice entries keep it; collapsing every axis yields a scalar, otherwise
    /// the selected elements are copied into a new array of the same dtype.
    pub fn get(&self, key: &[AxisIndex]) -> Result<Selection> {
        let region = self.resolve(key)?;
        let out_shape = region.out_shape();
        let storage = self.storage();

        if out_shape.is_empty() {
            let offset = self.offset(region.rows.start, region.cols.start);
            return Ok(Selection::Scalar(storage.load(offset)));
        }

        let mut out = Storage::zeros(out_shape.iter().product(), self.dtype());
        for (dst, src) in region.offsets(self.ncols()).enumerate() {
            out.store(dst, storage.load(src));
        }
        Ok(Selection::Array(NdArray::from_storage(
            Shape::from_validated(&out_shape),
            out,
        )))
    }

    /// Write into the elements addressed by `key`
    ///
    /// A scalar value is broadcast over the selection. An array value must
    /// have exactly the selection's shape. Real destinations keep only the
    /// real part of complex values; a real value written into a complex
    /// array sets the imaginary part to zero.
    pub fn set<'a>(&mut self, key: &[AxisIndex], value: impl Into<Assignment<'a>>) -> Result<()> {
        let region = self.resolve(key)?;
        let ncols = self.ncols();

        match value.into() {
            Assignment::Scalar(s) => {
                let storage = self.storage_mut();
                for dst in region.offsets(ncols) {
                    storage.store(dst, s);
                }
            }
            Assignment::Array(src) => {
                let out_shape = region.out_shape();
                if src.shape() != out_shape.as_slice() {
                    return Err(Error::shape_mismatch(&out_shape, src.shape()));
                }
                let source = src.storage();
                let storage = self.storage_mut();
                for (k, dst) in region.offsets(ncols).enumerate() {
                    storage.store(dst, source.load(k));
                }
            }
        }
        Ok(())
    }

    /// Read one element by integer position per axis
    pub fn item(&self, index: &[isize]) -> Result<Scalar> {
        let key: SmallVec<[AxisIndex; 2]> = index.iter().map(|&i| AxisIndex::At(i)).collect();
        match self.get(&key)? {
            Selection::Scalar(s) => Ok(s),
            Selection::Array(_) => unreachable!("integer keys collapse every axis"),
        }
    }

    /// Write one element by integer position per axis
    pub fn set_item(&mut self, index: &[isize], value: impl Into<Scalar>) -> Result<()> {
        let key: SmallVec<[AxisIndex; 2]> = index.iter().map(|&i| AxisIndex::At(i)).collect();
        self.set(&key, Assignment::Scalar(value.into()))
    }

    /// Copy of row `i` as a 1-D array
    pub fn row(&self, i: isize) -> Result<NdArray> {
        self.require_matrix("row")?;
        match self.get(&[AxisIndex::At(i), AxisIndex::all()])? {
            Selection::Array(a) => Ok(a),
            Selection::Scalar(_) => unreachable!("a sliced axis keeps the selection an array"),
        }
    }

    /// Copy of column `j` as a 1-D array
    pub fn col(&self, j: isize) -> Result<NdArray> {
        self.require_matrix("col")?;
        match self.get(&[AxisIndex::all(), AxisIndex::At(j)])? {
            Selection::Array(a) => Ok(a),
            Selection::Scalar(_) => unreachable!("a sliced axis keeps the selection an array"),
        }
    }

    fn require_matrix(&self, arg: &'static str) -> Result<()> {
        if self.ndim() != 2 {
            return Err(Error::invalid_argument(
                arg,
                format!("requires a 2-D array, got shape {:?}", self.shape()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    fn grid() -> NdArray {
        NdArray::from_rows(
            &[
                [0.0, 1.0, 2.0, 3.0],
                [4.0, 5.0, 6.0, 7.0],
                [8.0, 9.0, 10.0, 11.0],
            ],
            DType::F64,
        )
        .unwrap()
    }

    #[test]
    fn test_vector_get() {
        let v = NdArray::from_slice(&[10i32, 11, 12, 13, 14], &[5]).unwrap();
        assert_eq!(v.item(&[-1]).unwrap(), Scalar::Real(14.0));

        let sel = v.get(&[SliceKey::new(1, None, 2).into()]).unwrap();
        let arr = sel.into_array().unwrap();
        assert_eq!(arr.to_vec::<i32>(), vec![11, 13]);

        let sel = v.get(&[SliceKey::new(0, Some(-1), 3).into()]).unwrap();
        assert_eq!(sel.into_array().unwrap().to_vec::<i32>(), vec![10, 13]);
    }

    #[test]
    fn test_matrix_get() {
        let a = grid();
        assert_eq!(a.item(&[1, 2]).unwrap(), Scalar::Real(6.0));

        let sub = a
            .get(&[AxisIndex::range(1, 3), SliceKey::range(0, 4).with_step(2).into()])
            .unwrap()
            .into_array()
            .unwrap();
        assert_eq!(sub.shape(), &[2, 2]);
        assert_eq!(sub.to_vec::<f64>(), vec![4.0, 6.0, 8.0, 10.0]);

        let row = a.row(-1).unwrap();
        assert_eq!(row.shape(), &[4]);
        assert_eq!(row.to_vec::<f64>(), vec![8.0, 9.0, 10.0, 11.0]);

        let col = a.col(1).unwrap();
        assert_eq!(col.to_vec::<f64>(), vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_index_errors() {
        let a = grid();
        assert_eq!(
            a.item(&[3, 0]),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(
            a.item(&[0, -5]),
            Err(Error::IndexOutOfBounds { index: -5, size: 4 })
        );
        assert!(matches!(
            a.get(&[AxisIndex::at(0)]),
            Err(Error::InvalidArgument { arg: "key", .. })
        ));
        assert!(matches!(
            a.get(&[AxisIndex::all(), SliceKey::new(0, None, 0).into()]),
            Err(Error::InvalidArgument { arg: "step", .. })
        ));
        assert!(matches!(
            a.get(&[AxisIndex::range(2, 2), AxisIndex::all()]),
            Err(Error::InvalidArgument { arg: "key", .. })
        ));
        assert!(matches!(
            a.get(&[AxisIndex::range(0, 9), AxisIndex::all()]),
            Err(Error::IndexOutOfBounds { index: 9, size: 3 })
        ));
    }

    #[test]
    fn test_set_scalar_broadcast() {
        let mut a = grid();
        a.set(&[AxisIndex::all(), AxisIndex::at(0)], -1.0).unwrap();
        assert_eq!(a.col(0).unwrap().to_vec::<f64>(), vec![-1.0; 3]);

        a.set_item(&[2, 3], 42i32).unwrap();
        assert_eq!(a.item(&[2, 3]).unwrap(), Scalar::Real(42.0));
    }

    #[test]
    fn test_set_array_region() {
        let mut a = grid();
        let patch = NdArray::from_rows(&[[100.0, 101.0], [102.0, 103.0]], DType::F64).unwrap();
        a.set(&[AxisIndex::range(0, 2), AxisIndex::range(2, 4)], &patch)
            .unwrap();
        assert_eq!(a.row(0).unwrap().to_vec::<f64>(), vec![0.0, 1.0, 100.0, 101.0]);
        assert_eq!(a.row(1).unwrap().to_vec::<f64>(), vec![4.0, 5.0, 102.0, 103.0]);

        let wrong = NdArray::zeros(&[3], DType::F64).unwrap();
        assert!(matches!(
            a.set(&[AxisIndex::at(0), AxisIndex::range(0, 2)], &wrong),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_complex_rules() {
        let mut c = NdArray::full(&[2], DType::Complex128, Complex128::new(1.0, 1.0)).unwrap();
        c.set_item(&[0], 5.0).unwrap();
        assert_eq!(c.item(&[0]).unwrap(), Scalar::Complex(Complex128::new(5.0, 0.0)));

        let mut r = NdArray::zeros(&[2], DType::F32).unwrap();
        r.set(&[AxisIndex::all()], Complex128::new(2.5, 9.0)).unwrap();
        assert_eq!(r.to_vec::<f32>(), vec![2.5, 2.5]);
        assert!(r.imag().is_none());
    }
}
