use std::{
    marker::PhantomData,
    ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub, SubAssign},
};

use ndarray::{Array1, Zip};

use super::{BlendField, Location, check_len};

/// A scalar value per cell or per face.
///
/// The location parameter `L` is either [`Cell`](super::Cell) or
/// [`Face`](super::Face); see the [module documentation](super) for details.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField<L> {
    values: Array1<f64>,
    location: PhantomData<L>,
}

impl<L: Location> ScalarField<L> {
    /// Creates a zero-valued field.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::from_array(Array1::zeros(len))
    }

    /// Creates a field with the same value everywhere.
    #[must_use]
    pub fn uniform(len: usize, value: f64) -> Self {
        Self::from_array(Array1::from_elem(len, value))
    }

    /// Creates a field from owned values.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::from_array(Array1::from_vec(values))
    }

    /// Wraps an existing array.
    #[must_use]
    pub fn from_array(values: Array1<f64>) -> Self {
        Self {
            values,
            location: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the underlying array.
    #[must_use]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Returns the underlying array mutably.
    pub fn values_mut(&mut self) -> &mut Array1<f64> {
        &mut self.values
    }

    /// Consumes the field and returns the underlying array.
    #[must_use]
    pub fn into_values(self) -> Array1<f64> {
        self.values
    }

    /// Iterates over the values in storage order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Returns the value at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Applies `f` to every value.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.values.mapv(f))
    }

    /// Combines two fields value by value.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different lengths.
    #[must_use]
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        check_len(L::NAME, self.len(), other.len());
        let values = Zip::from(&self.values)
            .and(&other.values)
            .map_collect(|&a, &b| f(a, b));
        Self::from_array(values)
    }

    /// Returns `max(self, floor)` value by value.
    #[must_use]
    pub fn max_with(&self, floor: f64) -> Self {
        self.map(|v| v.max(floor))
    }

    /// Raises every value to a floating-point power.
    #[must_use]
    pub fn powf(&self, exponent: f64) -> Self {
        self.map(|v| v.powf(exponent))
    }

    /// Returns the largest absolute value, or zero for an empty field.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |max, v| max.max(v.abs()))
    }
}

impl<L: Location> BlendField<L> for ScalarField<L> {
    fn zeros(len: usize) -> Self {
        Self::from_array(Array1::zeros(len))
    }

    fn add_weighted(&mut self, other: &Self, weight: &ScalarField<L>) {
        check_len(L::NAME, self.len(), other.len());
        check_len(L::NAME, self.len(), weight.len());
        Zip::from(&mut self.values)
            .and(&other.values)
            .and(&weight.values)
            .for_each(|acc, &value, &w| *acc += w * value);
    }
}

impl<L> Index<usize> for ScalarField<L> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

macro_rules! scalar_binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<L: Location> $trait<&ScalarField<L>> for &ScalarField<L> {
            type Output = ScalarField<L>;

            fn $method(self, rhs: &ScalarField<L>) -> ScalarField<L> {
                check_len(L::NAME, self.len(), rhs.len());
                ScalarField::from_array(&self.values $op &rhs.values)
            }
        }

        impl<L: Location> $trait<&ScalarField<L>> for ScalarField<L> {
            type Output = ScalarField<L>;

            fn $method(self, rhs: &ScalarField<L>) -> ScalarField<L> {
                $trait::$method(&self, rhs)
            }
        }

        impl<L: Location> $trait for ScalarField<L> {
            type Output = ScalarField<L>;

            fn $method(self, rhs: ScalarField<L>) -> ScalarField<L> {
                $trait::$method(&self, &rhs)
            }
        }

        impl<L: Location> $trait<f64> for &ScalarField<L> {
            type Output = ScalarField<L>;

            fn $method(self, rhs: f64) -> ScalarField<L> {
                ScalarField::from_array(&self.values $op rhs)
            }
        }

        impl<L: Location> $trait<f64> for ScalarField<L> {
            type Output = ScalarField<L>;

            fn $method(self, rhs: f64) -> ScalarField<L> {
                $trait::$method(&self, rhs)
            }
        }
    };
}

scalar_binary_op!(Add, add, +);
scalar_binary_op!(Sub, sub, -);
scalar_binary_op!(Mul, mul, *);
scalar_binary_op!(Div, div, /);

impl<L: Location> AddAssign<&ScalarField<L>> for ScalarField<L> {
    fn add_assign(&mut self, rhs: &ScalarField<L>) {
        check_len(L::NAME, self.len(), rhs.len());
        self.values += &rhs.values;
    }
}

impl<L: Location> SubAssign<&ScalarField<L>> for ScalarField<L> {
    fn sub_assign(&mut self, rhs: &ScalarField<L>) {
        check_len(L::NAME, self.len(), rhs.len());
        self.values -= &rhs.values;
    }
}

impl<L: Location> MulAssign<&ScalarField<L>> for ScalarField<L> {
    fn mul_assign(&mut self, rhs: &ScalarField<L>) {
        check_len(L::NAME, self.len(), rhs.len());
        self.values *= &rhs.values;
    }
}

impl<L: Location> MulAssign<f64> for ScalarField<L> {
    fn mul_assign(&mut self, rhs: f64) {
        self.values *= rhs;
    }
}

impl<L: Location> Neg for &ScalarField<L> {
    type Output = ScalarField<L>;

    fn neg(self) -> ScalarField<L> {
        ScalarField::from_array(-&self.values)
    }
}

impl<L: Location> Neg for ScalarField<L> {
    type Output = ScalarField<L>;

    fn neg(self) -> ScalarField<L> {
        ScalarField::from_array(-self.values)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::field::{Cell, VolScalarField};

    #[test]
    fn arithmetic_is_element_wise() {
        let a = VolScalarField::from_vec(vec![1.0, 2.0, 3.0]);
        let b = VolScalarField::from_vec(vec![4.0, 5.0, 6.0]);

        assert_eq!((&a + &b).values().to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!((&b - &a).values().to_vec(), vec![3.0, 3.0, 3.0]);
        assert_eq!((&a * &b).values().to_vec(), vec![4.0, 10.0, 18.0]);
        assert_eq!((&a * 2.0).values().to_vec(), vec![2.0, 4.0, 6.0]);
        assert_eq!((-&a).values().to_vec(), vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn assign_ops_accumulate() {
        let mut total = VolScalarField::zeros(2);
        total += &VolScalarField::uniform(2, 1.5);
        total += &VolScalarField::uniform(2, 1.5);
        total -= &VolScalarField::uniform(2, 1.0);
        total *= 2.0;

        assert_eq!(total.values().to_vec(), vec![4.0, 4.0]);
    }

    #[test]
    fn add_weighted_scales_each_value() {
        let mut acc = <ScalarField<Cell> as BlendField<Cell>>::zeros(3);
        let value = VolScalarField::uniform(3, 10.0);
        let weight = VolScalarField::from_vec(vec![0.0, 0.5, 1.0]);

        acc.add_weighted(&value, &weight);
        acc.add_weighted(&value, &weight);

        assert_relative_eq!(acc[0], 0.0);
        assert_relative_eq!(acc[1], 10.0);
        assert_relative_eq!(acc[2], 20.0);
    }

    #[test]
    fn floors_values() {
        let field = VolScalarField::from_vec(vec![-1.0, 0.5, 2.0]);

        assert_eq!(field.max_with(0.0).values().to_vec(), vec![0.0, 0.5, 2.0]);
        assert_eq!(field.max_abs(), 2.0);
    }

    #[test]
    #[should_panic(expected = "cell field length mismatch")]
    fn mismatched_lengths_panic() {
        let _ = VolScalarField::zeros(2) + VolScalarField::zeros(3);
    }
}
