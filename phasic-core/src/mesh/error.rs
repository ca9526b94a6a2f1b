use thiserror::Error;

/// Errors that can occur while building a [`Mesh`](super::Mesh).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("mesh has no cells")]
    Empty,

    #[error("{centres} cell centres but {volumes} cell volumes")]
    LengthMismatch { centres: usize, volumes: usize },

    #[error("cell {cell} has non-positive volume {volume}")]
    NonPositiveVolume { cell: usize, volume: f64 },

    #[error("internal face {face} refers to missing cell {cell}")]
    CellIndex { face: usize, cell: usize },

    #[error("boundary face {face} refers to missing cell {cell}")]
    BoundaryCellIndex { face: usize, cell: usize },

    /// The face has zero area, or its cell centres coincide along its normal.
    #[error("internal face {face} is degenerate")]
    DegenerateFace { face: usize },

    /// A block dimension was zero, or a block length was not strictly positive.
    #[error("invalid block dimensions: {0}")]
    Dimensions(String),
}
