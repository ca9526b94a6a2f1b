use std::{
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use ndarray::{Array2, Axis, Zip};

use super::{BlendField, Location, ScalarField, check_len};

/// A three-component vector per cell or per face.
///
/// Values are stored as an `n × 3` array, one row per location.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField<L> {
    values: Array2<f64>,
    location: PhantomData<L>,
}

impl<L: Location> VectorField<L> {
    /// Creates a zero-valued field.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::from_array(Array2::zeros((len, 3)))
    }

    /// Creates a field with the same vector everywhere.
    #[must_use]
    pub fn uniform(len: usize, value: [f64; 3]) -> Self {
        Self::from_array(Array2::from_shape_fn((len, 3), |(_, j)| value[j]))
    }

    /// Creates a field from one `[x, y, z]` row per location.
    #[must_use]
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self::from_array(Array2::from_shape_fn((rows.len(), 3), |(i, j)| rows[i][j]))
    }

    /// Wraps an existing `n × 3` array.
    ///
    /// # Panics
    ///
    /// Panics if the array does not have exactly three columns.
    #[must_use]
    pub fn from_array(values: Array2<f64>) -> Self {
        assert_eq!(values.ncols(), 3, "vector fields need three components");
        Self {
            values,
            location: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Returns the underlying `n × 3` array.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the vector at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> [f64; 3] {
        let row = self.values.row(index);
        [row[0], row[1], row[2]]
    }

    /// Returns the magnitude of each vector.
    #[must_use]
    pub fn mag(&self) -> ScalarField<L> {
        self.mag_sqr().map(f64::sqrt)
    }

    /// Returns the squared magnitude of each vector.
    #[must_use]
    pub fn mag_sqr(&self) -> ScalarField<L> {
        ScalarField::from_array(self.values.map_axis(Axis(1), |row| row.dot(&row)))
    }

    /// Returns the dot product with `other` at each location.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different lengths.
    #[must_use]
    pub fn dot(&self, other: &Self) -> ScalarField<L> {
        check_len(L::NAME, self.len(), other.len());
        let values = Zip::from(self.values.rows())
            .and(other.values.rows())
            .map_collect(|a, b| a.dot(&b));
        ScalarField::from_array(values)
    }

    /// Returns the cross product `self × other` at each location.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different lengths.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        check_len(L::NAME, self.len(), other.len());
        let a = &self.values;
        let b = &other.values;
        Self::from_array(Array2::from_shape_fn((self.len(), 3), |(i, j)| {
            let (p, q) = ((j + 1) % 3, (j + 2) % 3);
            a[[i, p]] * b[[i, q]] - a[[i, q]] * b[[i, p]]
        }))
    }

    /// Multiplies each vector by the scalar at the same location.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different lengths.
    #[must_use]
    pub fn scaled(&self, factor: &ScalarField<L>) -> Self {
        check_len(L::NAME, self.len(), factor.len());
        Self::from_array(&self.values * &factor.values().view().insert_axis(Axis(1)))
    }

    /// Returns the largest vector magnitude, or zero for an empty field.
    #[must_use]
    pub fn max_mag(&self) -> f64 {
        self.mag().max_abs()
    }
}

impl<L: Location> BlendField<L> for VectorField<L> {
    fn zeros(len: usize) -> Self {
        Self::from_array(Array2::zeros((len, 3)))
    }

    fn add_weighted(&mut self, other: &Self, weight: &ScalarField<L>) {
        check_len(L::NAME, self.len(), other.len());
        *self += &other.scaled(weight);
    }
}

impl<L: Location> Add<&VectorField<L>> for &VectorField<L> {
    type Output = VectorField<L>;

    fn add(self, rhs: &VectorField<L>) -> VectorField<L> {
        check_len(L::NAME, self.len(), rhs.len());
        VectorField::from_array(&self.values + &rhs.values)
    }
}

impl<L: Location> Sub<&VectorField<L>> for &VectorField<L> {
    type Output = VectorField<L>;

    fn sub(self, rhs: &VectorField<L>) -> VectorField<L> {
        check_len(L::NAME, self.len(), rhs.len());
        VectorField::from_array(&self.values - &rhs.values)
    }
}

impl<L: Location> Add for VectorField<L> {
    type Output = VectorField<L>;

    fn add(self, rhs: VectorField<L>) -> VectorField<L> {
        &self + &rhs
    }
}

impl<L: Location> Sub for VectorField<L> {
    type Output = VectorField<L>;

    fn sub(self, rhs: VectorField<L>) -> VectorField<L> {
        &self - &rhs
    }
}

impl<L: Location> Mul<f64> for &VectorField<L> {
    type Output = VectorField<L>;

    fn mul(self, rhs: f64) -> VectorField<L> {
        VectorField::from_array(&self.values * rhs)
    }
}

impl<L: Location> Mul<f64> for VectorField<L> {
    type Output = VectorField<L>;

    fn mul(self, rhs: f64) -> VectorField<L> {
        VectorField::from_array(self.values * rhs)
    }
}

impl<L: Location> Mul<&ScalarField<L>> for &VectorField<L> {
    type Output = VectorField<L>;

    fn mul(self, rhs: &ScalarField<L>) -> VectorField<L> {
        self.scaled(rhs)
    }
}

impl<L: Location> AddAssign<&VectorField<L>> for VectorField<L> {
    fn add_assign(&mut self, rhs: &VectorField<L>) {
        check_len(L::NAME, self.len(), rhs.len());
        self.values += &rhs.values;
    }
}

impl<L: Location> SubAssign<&VectorField<L>> for VectorField<L> {
    fn sub_assign(&mut self, rhs: &VectorField<L>) {
        check_len(L::NAME, self.len(), rhs.len());
        self.values -= &rhs.values;
    }
}

impl<L: Location> Neg for &VectorField<L> {
    type Output = VectorField<L>;

    fn neg(self) -> VectorField<L> {
        VectorField::from_array(-&self.values)
    }
}

impl<L: Location> Neg for VectorField<L> {
    type Output = VectorField<L>;

    fn neg(self) -> VectorField<L> {
        VectorField::from_array(-self.values)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::field::{VolScalarField, VolVectorField};

    #[test]
    fn magnitude_and_dot() {
        let u = VolVectorField::from_rows(&[[3.0, 4.0, 0.0], [0.0, 0.0, 2.0]]);

        assert_eq!(u.mag().values().to_vec(), vec![5.0, 2.0]);
        assert_eq!(u.dot(&u).values().to_vec(), vec![25.0, 4.0]);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = VolVectorField::uniform(1, [1.0, 0.0, 0.0]);
        let y = VolVectorField::uniform(1, [0.0, 1.0, 0.0]);

        assert_eq!(x.cross(&y).row(0), [0.0, 0.0, 1.0]);
        assert_eq!(y.cross(&x).row(0), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn scales_rows_by_scalar_field() {
        let u = VolVectorField::uniform(2, [1.0, 2.0, 3.0]);
        let s = VolScalarField::from_vec(vec![2.0, -1.0]);
        let scaled = &u * &s;

        assert_eq!(scaled.row(0), [2.0, 4.0, 6.0]);
        assert_eq!(scaled.row(1), [-1.0, -2.0, -3.0]);
    }

    #[test]
    fn subtracts_and_negates() {
        let mut u = VolVectorField::from_rows(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, -2.0, 0.5]]);
        u -= &VolVectorField::uniform(3, [0.0, 0.0, 0.5]);

        assert_eq!(u.row(2), [1.0, -2.0, 0.0]);
        assert_eq!((-&u).row(0), [-1.0, 0.0, 0.5]);
    }
}
