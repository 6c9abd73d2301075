use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EnsembleError {
    #[error("packet parameter arrays have mismatched lengths: positions {positions:}, momenta {momenta:}, widths {widths:}, masses {masses:}")]
    MismatchedLengths {
        positions: usize,
        momenta: usize,
        widths: usize,
        masses: usize,
    },

    #[error("An ensemble must contain at least one packet")]
    Empty,

    #[error("Packet widths must be strictly positive; widths[{index:}] = {value:}")]
    NonPositiveWidth { index: usize, value: f64 },

    #[error("Packet masses must be nonzero; masses[{index:}] = 0")]
    ZeroMass { index: usize },

    #[error("Packet index {index:} is out of bounds for an ensemble of {count:} packets")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Time and position grids are not broadcast compatible: {t_shape:?} vs {x_shape:?}")]
    ShapeMismatch {
        t_shape: Vec<usize>,
        x_shape: Vec<usize>,
    },
}
