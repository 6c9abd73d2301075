pub mod ensemble;
pub mod grid;
pub mod utils;

pub use ensemble::WavePacketEnsemble;
pub use grid::{broadcast_shape, CoordinateField};
pub use utils::error::EnsembleError;
