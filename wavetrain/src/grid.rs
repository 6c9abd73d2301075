use ndarray::{Array1, Array2, ArrayD, CowArray, IxDyn, Zip};
use num_traits::Float;

use crate::utils::error::EnsembleError;

/// A query coordinate: either a single value or an n-dimensional grid of
/// values. A pair of fields is broadcast to a common shape before the
/// wavefunction is evaluated elementwise over it.
#[derive(Debug, Clone)]
pub enum CoordinateField<T> {
    Scalar(T),
    Grid(ArrayD<T>),
}

impl<T: Float> CoordinateField<T> {
    /// Shape of this field. Scalars are zero-dimensional.
    pub fn shape(&self) -> &[usize] {
        match self {
            CoordinateField::Scalar(_) => &[],
            CoordinateField::Grid(grid) => grid.shape(),
        }
    }

    /// View this field as a grid (scalars become zero-dimensional arrays,
    /// which broadcast against anything).
    fn as_grid(&self) -> CowArray<'_, T, IxDyn> {
        match self {
            CoordinateField::Scalar(value) => {
                CowArray::from(ArrayD::from_elem(IxDyn(&[]), *value))
            }
            CoordinateField::Grid(grid) => CowArray::from(grid.view()),
        }
    }
}

impl<T> From<Array1<T>> for CoordinateField<T> {
    fn from(grid: Array1<T>) -> Self {
        CoordinateField::Grid(grid.into_dyn())
    }
}

impl<T> From<Array2<T>> for CoordinateField<T> {
    fn from(grid: Array2<T>) -> Self {
        CoordinateField::Grid(grid.into_dyn())
    }
}

impl<T> From<ArrayD<T>> for CoordinateField<T> {
    fn from(grid: ArrayD<T>) -> Self {
        CoordinateField::Grid(grid)
    }
}

/// This function computes the common broadcast shape of two fields.
/// Shapes are aligned on their trailing axes; each aligned pair of axis
/// lengths must be equal, or one of them must be 1.
pub fn broadcast_shape(t_shape: &[usize], x_shape: &[usize]) -> Result<Vec<usize>, EnsembleError> {
    let ndim = t_shape.len().max(x_shape.len());
    let mut shape = vec![1usize; ndim];
    for axis in 0..ndim {
        let t_dim = axis_dim(t_shape, axis, ndim);
        let x_dim = axis_dim(x_shape, axis, ndim);
        shape[axis] = if t_dim == x_dim || x_dim == 1 {
            t_dim
        } else if t_dim == 1 {
            x_dim
        } else {
            return Err(EnsembleError::ShapeMismatch {
                t_shape: t_shape.to_vec(),
                x_shape: x_shape.to_vec(),
            });
        };
    }
    Ok(shape)
}

/// Axis length of `shape` once right-aligned inside `ndim` axes. Missing
/// leading axes count as length 1.
fn axis_dim(shape: &[usize], axis: usize, ndim: usize) -> usize {
    let offset = ndim - shape.len();
    if axis < offset {
        1
    } else {
        shape[axis - offset]
    }
}

/// This function broadcasts two fields to their common shape and evaluates
/// `f` elementwise over the pair. The result carries the common shape.
pub fn broadcast_zip<T, U, F>(
    t: &CoordinateField<T>,
    x: &CoordinateField<T>,
    f: F,
) -> Result<ArrayD<U>, EnsembleError>
where
    T: Float,
    F: Fn(T, T) -> U,
{
    let shape = broadcast_shape(t.shape(), x.shape())?;

    let t_grid = t.as_grid();
    let x_grid = x.as_grid();
    let t_view = t_grid
        .broadcast(IxDyn(&shape))
        .ok_or_else(|| shape_mismatch(t, x))?;
    let x_view = x_grid
        .broadcast(IxDyn(&shape))
        .ok_or_else(|| shape_mismatch(t, x))?;

    Ok(Zip::from(&t_view)
        .and(&x_view)
        .map_collect(|&t_val, &x_val| f(t_val, x_val)))
}

fn shape_mismatch<T: Float>(t: &CoordinateField<T>, x: &CoordinateField<T>) -> EnsembleError {
    EnsembleError::ShapeMismatch {
        t_shape: t.shape().to_vec(),
        x_shape: x.shape().to_vec(),
    }
}

#[test]
fn test_broadcast_shape_scalar_and_vector() {
    assert_eq!(broadcast_shape(&[], &[5]), Ok(vec![5]));
    assert_eq!(broadcast_shape(&[5], &[]), Ok(vec![5]));
    assert_eq!(broadcast_shape(&[], &[]), Ok(vec![]));
}

#[test]
fn test_broadcast_shape_outer_product() {
    // A time row against a position column spans the full grid
    assert_eq!(broadcast_shape(&[1, 4], &[5, 1]), Ok(vec![5, 4]));
    assert_eq!(broadcast_shape(&[3], &[2, 3]), Ok(vec![2, 3]));
}

#[test]
fn test_broadcast_shape_mismatch() {
    let result = broadcast_shape(&[3], &[4]);
    assert_eq!(
        result,
        Err(EnsembleError::ShapeMismatch {
            t_shape: vec![3],
            x_shape: vec![4],
        })
    );
}

#[test]
fn test_broadcast_zip_scalar_pair() {
    type T = f64;

    let t = CoordinateField::Scalar(2.0 as T);
    let x = CoordinateField::Scalar(3.0 as T);
    let result = broadcast_zip(&t, &x, |t_val, x_val| t_val * x_val).unwrap();

    assert_eq!(result.ndim(), 0);
    assert_eq!(result.sum(), 6.0);
}

#[test]
fn test_broadcast_zip_grid_against_scalar() {
    use ndarray::arr1;

    let t = CoordinateField::from(arr1(&[0.0, 1.0, 2.0]));
    let x = CoordinateField::Scalar(10.0);
    let result = broadcast_zip(&t, &x, |t_val, x_val| t_val + x_val).unwrap();

    assert_eq!(result.shape(), &[3]);
    assert_eq!(result.into_raw_vec(), vec![10.0, 11.0, 12.0]);
}
