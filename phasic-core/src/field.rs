//! Scalar and vector fields defined over mesh cells or faces.
//!
//! Fields are tagged with a [`Location`] marker so that cell-centred values
//! ([`Cell`]) and face values ([`Face`]) cannot be mixed by accident.
//! Arithmetic between fields of the same location is element-wise.
//!
//! Combining two fields of different lengths is a programming error and
//! panics; every field handed out by a [`Mesh`](crate::Mesh) or a
//! [`Phase`](crate::Phase) has the length of its mesh location.

mod scalar;
mod vector;

use std::fmt::Debug;

pub use scalar::ScalarField;
pub use vector::VectorField;

/// Marker trait for the mesh location a field is defined on.
pub trait Location: Debug + Clone + Copy + PartialEq + Eq + Default + 'static {
    /// A short human-readable name, used in panic messages.
    const NAME: &'static str;
}

/// Values stored at cell centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell;

/// Values stored at internal faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Face;

impl Location for Cell {
    const NAME: &'static str = "cell";
}

impl Location for Face {
    const NAME: &'static str = "face";
}

/// A scalar field over cells.
pub type VolScalarField = ScalarField<Cell>;

/// A scalar field over faces.
pub type SurfaceScalarField = ScalarField<Face>;

/// A vector field over cells.
pub type VolVectorField = VectorField<Cell>;

/// A vector field over faces.
pub type SurfaceVectorField = VectorField<Face>;

/// A field that can be accumulated as a weighted sum of contributions.
///
/// This is the only capability regime blending needs from its results, so
/// scalar coefficients and vector forces share one blending routine.
pub trait BlendField<L: Location>: Sized {
    /// Returns a zero-valued field of the given length.
    fn zeros(len: usize) -> Self;

    /// Adds `weight · other` into `self`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if the lengths of `self`, `other`, and `weight` differ.
    fn add_weighted(&mut self, other: &Self, weight: &ScalarField<L>);
}

#[track_caller]
pub(crate) fn check_len(location: &'static str, left: usize, right: usize) {
    assert!(
        left == right,
        "{location} field length mismatch: {left} != {right}"
    );
}
