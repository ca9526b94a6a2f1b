//! A minimal finite-volume mesh.
//!
//! The mesh stores cell centres and volumes together with the internal and
//! boundary faces between them, and provides the few operators that
//! interfacial force models need: cell-to-face interpolation, face-normal
//! gradients, face fluxes, Gauss gradient and curl, and the distance to the
//! nearest wall. Boundary faces are treated as zero-gradient.

mod cartesian;
mod error;

use crate::field::{
    SurfaceScalarField, SurfaceVectorField, VolScalarField, VolVectorField, check_len,
};

pub use cartesian::WallPatches;
pub use error::MeshError;

/// A face shared by two cells.
///
/// The area vector points from `owner` to `neighbour` and its magnitude is the
/// face area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalFace {
    pub owner: usize,
    pub neighbour: usize,
    pub area: [f64; 3],
    pub centre: [f64; 3],
}

/// A face on the domain boundary with an outward area vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryFace {
    pub owner: usize,
    pub area: [f64; 3],
    pub centre: [f64; 3],
    /// Whether the face is a solid wall for wall-distance purposes.
    pub wall: bool,
}

/// A finite-volume mesh with precomputed interpolation weights and wall data.
#[derive(Debug, Clone)]
pub struct Mesh {
    centres: Vec<[f64; 3]>,
    volumes: Vec<f64>,
    faces: Vec<InternalFace>,
    boundary: Vec<BoundaryFace>,
    weights: SurfaceScalarField,
    delta_coeffs: SurfaceScalarField,
    mag_sf: SurfaceScalarField,
    wall_distance: VolScalarField,
    wall_normal: VolVectorField,
}

impl Mesh {
    /// Builds a mesh from raw cell and face data.
    ///
    /// Interpolation weights follow the usual linear scheme: a face's owner
    /// weight is the normal distance from the face to the neighbour centre
    /// divided by the normal distance between the two centres.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if the mesh has no cells, if centres and
    /// volumes disagree in length, if a volume is not strictly positive, if a
    /// face refers to a cell that does not exist, or if a face is degenerate
    /// (zero area or coincident cell centres along its normal).
    pub fn new(
        centres: Vec<[f64; 3]>,
        volumes: Vec<f64>,
        faces: Vec<InternalFace>,
        boundary: Vec<BoundaryFace>,
    ) -> Result<Self, MeshError> {
        if centres.is_empty() {
            return Err(MeshError::Empty);
        }
        if centres.len() != volumes.len() {
            return Err(MeshError::LengthMismatch {
                centres: centres.len(),
                volumes: volumes.len(),
            });
        }
        if let Some((cell, &volume)) = volumes
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(MeshError::NonPositiveVolume { cell, volume });
        }

        let n_cells = centres.len();
        let mut weights = Vec::with_capacity(faces.len());
        let mut delta_coeffs = Vec::with_capacity(faces.len());
        let mut mag_sf = Vec::with_capacity(faces.len());

        for (index, face) in faces.iter().enumerate() {
            for cell in [face.owner, face.neighbour] {
                if cell >= n_cells {
                    return Err(MeshError::CellIndex { face: index, cell });
                }
            }

            let area = norm(face.area);
            if area <= 0.0 || !area.is_finite() {
                return Err(MeshError::DegenerateFace { face: index });
            }
            let normal = scale(face.area, 1.0 / area);
            let to_owner = dot(normal, sub(face.centre, centres[face.owner])).abs();
            let to_neighbour = dot(normal, sub(centres[face.neighbour], face.centre)).abs();
            let span = to_owner + to_neighbour;
            if span <= 0.0 {
                return Err(MeshError::DegenerateFace { face: index });
            }

            weights.push(to_neighbour / span);
            delta_coeffs.push(1.0 / span);
            mag_sf.push(area);
        }

        for (index, face) in boundary.iter().enumerate() {
            if face.owner >= n_cells {
                return Err(MeshError::BoundaryCellIndex {
                    face: index,
                    cell: face.owner,
                });
            }
        }

        let (wall_distance, wall_normal) = wall_data(&centres, &boundary);

        Ok(Self {
            centres,
            volumes,
            faces,
            boundary,
            weights: SurfaceScalarField::from_vec(weights),
            delta_coeffs: SurfaceScalarField::from_vec(delta_coeffs),
            mag_sf: SurfaceScalarField::from_vec(mag_sf),
            wall_distance,
            wall_normal,
        })
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.centres.len()
    }

    /// Returns the number of internal faces.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn centres(&self) -> &[[f64; 3]] {
        &self.centres
    }

    #[must_use]
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    #[must_use]
    pub fn faces(&self) -> &[InternalFace] {
        &self.faces
    }

    #[must_use]
    pub fn boundary_faces(&self) -> &[BoundaryFace] {
        &self.boundary
    }

    /// Returns the owner-side linear interpolation weight of each face.
    #[must_use]
    pub fn weights(&self) -> &SurfaceScalarField {
        &self.weights
    }

    /// Returns the face area magnitudes `|S_f|`.
    #[must_use]
    pub fn mag_sf(&self) -> &SurfaceScalarField {
        &self.mag_sf
    }

    /// Returns the distance from each cell centre to the nearest wall face.
    ///
    /// Cells in a mesh without walls report `f64::MAX`.
    #[must_use]
    pub fn wall_distance(&self) -> &VolScalarField {
        &self.wall_distance
    }

    /// Returns the unit normal of the nearest wall, pointing into the domain.
    ///
    /// Cells in a mesh without walls report a zero vector.
    #[must_use]
    pub fn wall_normal(&self) -> &VolVectorField {
        &self.wall_normal
    }

    /// Returns a zero-valued cell scalar field.
    #[must_use]
    pub fn zero_vol_scalar(&self) -> VolScalarField {
        VolScalarField::zeros(self.n_cells())
    }

    /// Returns a zero-valued cell vector field.
    #[must_use]
    pub fn zero_vol_vector(&self) -> VolVectorField {
        VolVectorField::zeros(self.n_cells())
    }

    /// Returns a zero-valued face scalar field.
    #[must_use]
    pub fn zero_surface_scalar(&self) -> SurfaceScalarField {
        SurfaceScalarField::zeros(self.n_faces())
    }

    /// Linearly interpolates a cell scalar field to the faces.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn interpolate(&self, field: &VolScalarField) -> SurfaceScalarField {
        check_len("cell", field.len(), self.n_cells());
        let values = self
            .faces
            .iter()
            .zip(self.weights.iter())
            .map(|(face, w)| w * field[face.owner] + (1.0 - w) * field[face.neighbour])
            .collect();
        SurfaceScalarField::from_vec(values)
    }

    /// Linearly interpolates a cell vector field to the faces.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn interpolate_vector(&self, field: &VolVectorField) -> SurfaceVectorField {
        check_len("cell", field.len(), self.n_cells());
        let rows: Vec<[f64; 3]> = self
            .faces
            .iter()
            .zip(self.weights.iter())
            .map(|(face, w)| {
                let owner = field.row(face.owner);
                let neighbour = field.row(face.neighbour);
                std::array::from_fn(|j| w * owner[j] + (1.0 - w) * neighbour[j])
            })
            .collect();
        SurfaceVectorField::from_rows(&rows)
    }

    /// Returns the face-normal gradient `(φ_N − φ_P) / |d|`.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn sn_grad(&self, field: &VolScalarField) -> SurfaceScalarField {
        check_len("cell", field.len(), self.n_cells());
        let values = self
            .faces
            .iter()
            .zip(self.delta_coeffs.iter())
            .map(|(face, delta)| delta * (field[face.neighbour] - field[face.owner]))
            .collect();
        SurfaceScalarField::from_vec(values)
    }

    /// Returns the face flux `U_f · S_f` of a cell vector field.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn flux(&self, field: &VolVectorField) -> SurfaceScalarField {
        let interpolated = self.interpolate_vector(field);
        let values = self
            .faces
            .iter()
            .enumerate()
            .map(|(index, face)| dot(interpolated.row(index), face.area))
            .collect();
        SurfaceScalarField::from_vec(values)
    }

    /// Returns the Gauss-linear cell gradient of a scalar field.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn grad(&self, field: &VolScalarField) -> VolVectorField {
        let face_values = self.interpolate(field);
        let mut sums = vec![[0.0; 3]; self.n_cells()];

        for (face, value) in self.faces.iter().zip(face_values.iter()) {
            add_to(&mut sums[face.owner], scale(face.area, value));
            add_to(&mut sums[face.neighbour], scale(face.area, -value));
        }
        for face in &self.boundary {
            add_to(&mut sums[face.owner], scale(face.area, field[face.owner]));
        }

        self.per_volume(&sums)
    }

    /// Returns the Gauss-linear cell curl `∇ × U` of a vector field.
    ///
    /// # Panics
    ///
    /// Panics if the field does not have one value per cell.
    #[must_use]
    pub fn curl(&self, field: &VolVectorField) -> VolVectorField {
        let face_values = self.interpolate_vector(field);
        let mut sums = vec![[0.0; 3]; self.n_cells()];

        for (index, face) in self.faces.iter().enumerate() {
            let term = cross(face.area, face_values.row(index));
            add_to(&mut sums[face.owner], term);
            add_to(&mut sums[face.neighbour], scale(term, -1.0));
        }
        for face in &self.boundary {
            add_to(&mut sums[face.owner], cross(face.area, field.row(face.owner)));
        }

        self.per_volume(&sums)
    }

    fn per_volume(&self, sums: &[[f64; 3]]) -> VolVectorField {
        let rows: Vec<[f64; 3]> = sums
            .iter()
            .zip(&self.volumes)
            .map(|(sum, volume)| scale(*sum, 1.0 / volume))
            .collect();
        VolVectorField::from_rows(&rows)
    }
}

/// Finds the nearest wall face for every cell.
fn wall_data(centres: &[[f64; 3]], boundary: &[BoundaryFace]) -> (VolScalarField, VolVectorField) {
    let walls: Vec<&BoundaryFace> = boundary.iter().filter(|face| face.wall).collect();
    let mut distance = Vec::with_capacity(centres.len());
    let mut normals = Vec::with_capacity(centres.len());

    for centre in centres {
        let nearest = walls.iter().min_by(|a, b| {
            let da = norm(sub(*centre, a.centre));
            let db = norm(sub(*centre, b.centre));
            da.total_cmp(&db)
        });

        match nearest {
            Some(face) => {
                let unit = scale(face.area, 1.0 / norm(face.area));
                distance.push(dot(unit, sub(*centre, face.centre)).abs());
                normals.push(scale(unit, -1.0));
            }
            None => {
                distance.push(f64::MAX);
                normals.push([0.0; 3]);
            }
        }
    }

    (
        VolScalarField::from_vec(distance),
        VolVectorField::from_rows(&normals),
    )
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], factor: f64) -> [f64; 3] {
    [a[0] * factor, a[1] * factor, a[2] * factor]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

fn add_to(acc: &mut [f64; 3], value: [f64; 3]) {
    for (a, v) in acc.iter_mut().zip(value) {
        *a += v;
    }
}
