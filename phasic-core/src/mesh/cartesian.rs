use super::{BoundaryFace, InternalFace, Mesh, MeshError};

/// Selects which pairs of opposite block boundaries are solid walls.
///
/// Setting `y` marks both the `y = 0` and `y = L_y` boundaries as walls, which
/// gives a plane channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallPatches {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl WallPatches {
    fn on_axis(self, axis: usize) -> bool {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl Mesh {
    /// Creates a uniform block of hexahedral cells spanning `[0, L]` on each axis.
    ///
    /// Cells are numbered with `x` varying fastest, then `y`, then `z`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Dimensions`] if any cell count is zero or any
    /// length is not strictly positive and finite.
    pub fn cartesian(
        cells: [usize; 3],
        lengths: [f64; 3],
        walls: WallPatches,
    ) -> Result<Self, MeshError> {
        if cells.contains(&0) {
            return Err(MeshError::Dimensions(format!(
                "cell counts must be non-zero, got {cells:?}"
            )));
        }
        if lengths.iter().any(|l| !(l.is_finite() && *l > 0.0)) {
            return Err(MeshError::Dimensions(format!(
                "lengths must be positive, got {lengths:?}"
            )));
        }

        #[allow(clippy::cast_precision_loss)]
        let spacing: [f64; 3] = std::array::from_fn(|a| lengths[a] / cells[a] as f64);
        let face_area: [f64; 3] = std::array::from_fn(|a| {
            let (p, q) = ((a + 1) % 3, (a + 2) % 3);
            spacing[p] * spacing[q]
        });
        let volume = spacing[0] * spacing[1] * spacing[2];
        let index = |ijk: [usize; 3]| ijk[0] + cells[0] * (ijk[1] + cells[1] * ijk[2]);

        let n_cells = cells[0] * cells[1] * cells[2];
        let mut centres = Vec::with_capacity(n_cells);
        let mut faces = Vec::new();
        let mut boundary = Vec::new();

        for k in 0..cells[2] {
            for j in 0..cells[1] {
                for i in 0..cells[0] {
                    let ijk = [i, j, k];
                    #[allow(clippy::cast_precision_loss)]
                    let centre: [f64; 3] =
                        std::array::from_fn(|a| (ijk[a] as f64 + 0.5) * spacing[a]);
                    let cell = index(ijk);
                    centres.push(centre);

                    for axis in 0..3 {
                        let mut area = [0.0; 3];
                        area[axis] = face_area[axis];
                        let mut upper = centre;
                        upper[axis] += 0.5 * spacing[axis];

                        if ijk[axis] + 1 < cells[axis] {
                            let mut next = ijk;
                            next[axis] += 1;
                            faces.push(InternalFace {
                                owner: cell,
                                neighbour: index(next),
                                area,
                                centre: upper,
                            });
                        } else {
                            boundary.push(BoundaryFace {
                                owner: cell,
                                area,
                                centre: upper,
                                wall: walls.on_axis(axis),
                            });
                        }

                        if ijk[axis] == 0 {
                            let mut lower = centre;
                            lower[axis] -= 0.5 * spacing[axis];
                            let mut outward = [0.0; 3];
                            outward[axis] = -face_area[axis];
                            boundary.push(BoundaryFace {
                                owner: cell,
                                area: outward,
                                centre: lower,
                                wall: walls.on_axis(axis),
                            });
                        }
                    }
                }
            }
        }

        Self::new(centres, vec![volume; n_cells], faces, boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_cells_have_zero_net_area() {
        let mesh = Mesh::cartesian([3, 2, 2], [3.0, 2.0, 2.0], WallPatches::default()).unwrap();
        let mut net = vec![[0.0; 3]; mesh.n_cells()];

        for face in mesh.faces() {
            for a in 0..3 {
                net[face.owner][a] += face.area[a];
                net[face.neighbour][a] -= face.area[a];
            }
        }
        for face in mesh.boundary_faces() {
            for a in 0..3 {
                net[face.owner][a] += face.area[a];
            }
        }

        assert!(net.iter().flatten().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn without_walls_distance_is_unbounded() {
        let mesh = Mesh::cartesian([2, 1, 1], [1.0, 1.0, 1.0], WallPatches::default()).unwrap();
        assert!(mesh.wall_distance().iter().all(|d| d == f64::MAX));
        assert!(mesh.wall_normal().max_mag() == 0.0);
    }

    #[test]
    fn rejects_empty_blocks() {
        assert!(matches!(
            Mesh::cartesian([0, 1, 1], [1.0, 1.0, 1.0], WallPatches::default()),
            Err(MeshError::Dimensions(_))
        ));
        assert!(matches!(
            Mesh::cartesian([1, 1, 1], [1.0, -1.0, 1.0], WallPatches::default()),
            Err(MeshError::Dimensions(_))
        ));
    }
}
