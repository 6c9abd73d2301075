use ndarray::{Array1, Array2, ArrayD, Axis, Ix1, Ix2};
use num::Complex;
use num_traits::{Float, FloatConst, FromPrimitive, ToPrimitive};
use std::fmt::Display;

use crate::grid::{broadcast_zip, CoordinateField};
use crate::utils::error::EnsembleError;

/// This struct holds the parameter arrays for a train of one-dimensional
/// Gaussian wave packets: one initial position, momentum, width, and mass
/// per packet, plus the flag selecting the non-spreading approximation.
///
/// The arrays are validated once at construction and are read-only
/// thereafter; changing a parameter means building a new ensemble.
pub struct WavePacketEnsemble<T: Float> {
    /// Initial center position of each packet
    positions: Vec<T>,
    /// Initial momentum of each packet
    momenta: Vec<T>,
    /// Initial standard deviation of each packet
    widths: Vec<T>,
    /// Mass of each packet
    masses: Vec<T>,
    /// Freeze spreading, keeping only the classical drift
    nospread: bool,
}

impl<T> WavePacketEnsemble<T>
where
    T: Float + FloatConst + FromPrimitive + ToPrimitive,
{
    /// This constructor takes ownership of the four packet parameter arrays
    /// and validates them: all four must share one length N >= 1, every
    /// width must be strictly positive, and every mass must be nonzero.
    /// The width and mass conditions guard the divisions in the packet
    /// formula, so violating any of them is a construction-time error.
    pub fn new(
        positions: Vec<T>,
        momenta: Vec<T>,
        widths: Vec<T>,
        masses: Vec<T>,
        nospread: bool,
    ) -> Result<Self, EnsembleError> {
        if positions.len() != momenta.len()
            || positions.len() != widths.len()
            || positions.len() != masses.len()
        {
            return Err(EnsembleError::MismatchedLengths {
                positions: positions.len(),
                momenta: momenta.len(),
                widths: widths.len(),
                masses: masses.len(),
            });
        }
        if positions.is_empty() {
            return Err(EnsembleError::Empty);
        }
        for (index, &width) in widths.iter().enumerate() {
            // The comparison also rejects NaN widths
            if !(width > T::zero()) {
                return Err(EnsembleError::NonPositiveWidth {
                    index,
                    value: width.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        for (index, &mass) in masses.iter().enumerate() {
            if mass == T::zero() {
                return Err(EnsembleError::ZeroMass { index });
            }
        }

        Ok(WavePacketEnsemble {
            positions,
            momenta,
            widths,
            masses,
            nospread,
        })
    }

    /// Number of packets in the ensemble
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[T] {
        &self.positions
    }

    pub fn momenta(&self) -> &[T] {
        &self.momenta
    }

    pub fn widths(&self) -> &[T] {
        &self.widths
    }

    pub fn masses(&self) -> &[T] {
        &self.masses
    }

    pub fn nospread(&self) -> bool {
        self.nospread
    }

    /// This function evaluates a single Gaussian wave packet at one
    /// time/position pair. The closed-form free-particle solution is
    ///
    ///   1/(pi^(1/4) sqrt(S + i t/(S M)))
    ///     * exp( -(x - X - P t/M)^2 / (2 S^2 (1 + i t/(M S^2))) )
    ///     * exp( i P (x - X - P t/(2 M)) )
    ///
    /// with X, P, S, M the selected packet's parameters. In non-spreading
    /// mode the time argument of the amplitude and envelope terms is frozen
    /// at zero while the position argument is shifted by the classical
    /// drift P t/M, so the packet translates at constant width.
    fn packet_kernel(&self, t: T, x: T, idx: usize) -> Complex<T> {
        let x0 = self.positions[idx];
        let p = self.momenta[idx];
        let s = self.widths[idx];
        let m = self.masses[idx];

        let two = T::from_f64(2.0).unwrap();

        let (t, x) = if self.nospread {
            (T::zero(), x - p * t / m)
        } else {
            (t, x)
        };

        // Amplitude
        let quarter_root_pi = T::PI().powf(T::from_f64(0.25).unwrap());
        let amplitude = (Complex::new(s, t / (s * m)).sqrt() * quarter_root_pi).inv();

        // Spreading envelope
        let drift = x - x0 - p * t / m;
        let envelope = Complex::new(-(drift * drift), T::zero())
            / (Complex::new(T::one(), t / (m * s * s)) * (two * s * s));

        // Plane-wave phase
        let phase = Complex::new(T::zero(), p * (x - x0 - p * t / (two * m)));

        amplitude * envelope.exp() * phase.exp()
    }

    /// Evaluate one packet at a scalar time/position pair.
    pub fn packet_value(&self, t: T, x: T, idx: usize) -> Result<Complex<T>, EnsembleError> {
        if idx >= self.count() {
            return Err(EnsembleError::IndexOutOfRange {
                index: idx,
                count: self.count(),
            });
        }
        Ok(self.packet_kernel(t, x, idx))
    }

    /// This function evaluates a single packet over broadcast time/position
    /// fields. The result has the pair's common broadcast shape.
    pub fn packet(
        &self,
        t: &CoordinateField<T>,
        x: &CoordinateField<T>,
        idx: usize,
    ) -> Result<ArrayD<Complex<T>>, EnsembleError> {
        if idx >= self.count() {
            return Err(EnsembleError::IndexOutOfRange {
                index: idx,
                count: self.count(),
            });
        }
        broadcast_zip(t, x, |t_val, x_val| self.packet_kernel(t_val, x_val, idx))
    }

    /// Evaluate the superposition wavefunction at a scalar time/position
    /// pair: the packets are summed in ascending index order (so the
    /// floating-point result is reproducible run to run) and the sum is
    /// divided by sqrt(N).
    pub fn superposition_value(&self, t: T, x: T) -> Complex<T> {
        let mut ψ = Complex::new(T::zero(), T::zero());
        for idx in 0..self.count() {
            ψ = ψ + self.packet_kernel(t, x, idx);
        }
        ψ / T::from_usize(self.count()).unwrap().sqrt()
    }

    /// This function evaluates the superposition wavefunction over
    /// broadcast time/position fields.
    pub fn superposition(
        &self,
        t: &CoordinateField<T>,
        x: &CoordinateField<T>,
    ) -> Result<ArrayD<Complex<T>>, EnsembleError> {
        broadcast_zip(t, x, |t_val, x_val| self.superposition_value(t_val, x_val))
    }

    /// Probability density |ψ|² at a scalar time/position pair.
    pub fn density_value(&self, t: T, x: T) -> T {
        self.superposition_value(t, x).norm_sqr()
    }

    /// This function evaluates the probability density |ψ|² over broadcast
    /// time/position fields. The result is real and non-negative.
    pub fn density(
        &self,
        t: &CoordinateField<T>,
        x: &CoordinateField<T>,
    ) -> Result<ArrayD<T>, EnsembleError> {
        Ok(self.superposition(t, x)?.mapv(|ψ| ψ.norm_sqr()))
    }

    /// This function evaluates the superposition over the full
    /// time-position grid spanned by two axes, broadcasting the time axis
    /// across columns and the position axis down rows. The result has shape
    /// [positions.len(), times.len()].
    pub fn superposition_field(
        &self,
        times: &Array1<T>,
        positions: &Array1<T>,
    ) -> Result<Array2<Complex<T>>, EnsembleError> {
        let t = CoordinateField::Grid(times.clone().insert_axis(Axis(0)).into_dyn());
        let x = CoordinateField::Grid(positions.clone().insert_axis(Axis(1)).into_dyn());
        let ψ = self.superposition(&t, &x)?;
        Ok(ψ
            .into_dimensionality::<Ix2>()
            .expect("time-position field is two-dimensional"))
    }

    /// The 2D probability density over a time-position grid, with shape
    /// [positions.len(), times.len()].
    pub fn density_field(
        &self,
        times: &Array1<T>,
        positions: &Array1<T>,
    ) -> Result<Array2<T>, EnsembleError> {
        Ok(self
            .superposition_field(times, positions)?
            .mapv(|ψ| ψ.norm_sqr()))
    }

    /// The probability density over time at a fixed detector position.
    pub fn detector_series(
        &self,
        times: &Array1<T>,
        x_detector: T,
    ) -> Result<Array1<T>, EnsembleError> {
        let t = CoordinateField::Grid(times.clone().into_dyn());
        let x = CoordinateField::Scalar(x_detector);
        let density = self.density(&t, &x)?;
        Ok(density
            .into_dimensionality::<Ix1>()
            .expect("detector series is one-dimensional"))
    }
}

impl<T> Display for WavePacketEnsemble<T>
where
    T: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n", "-".repeat(40))?;
        write!(f, "packets   = {}\n", self.positions.len())?;
        write!(f, "positions = {:?}\n", self.positions)?;
        write!(f, "momenta   = {:?}\n", self.momenta)?;
        write!(f, "widths    = {:?}\n", self.widths)?;
        write!(f, "masses    = {:?}\n", self.masses)?;
        write!(f, "nospread  = {}\n", self.nospread)?;
        write!(f, "{}\n", "-".repeat(40))?;
        Ok(())
    }
}

#[test]
fn test_new_ensemble() {
    type T = f64;

    let positions: Vec<T> = vec![-4.0, 0.0, 4.0];
    let momenta: Vec<T> = vec![1.0, 0.0, -1.0];
    let widths: Vec<T> = vec![0.5, 1.0, 0.5];
    let masses: Vec<T> = vec![1.0, 1.0, 2.0];

    let ensemble = WavePacketEnsemble::new(positions, momenta, widths, masses, false).unwrap();
    assert_eq!(ensemble.count(), 3);
    assert!(!ensemble.nospread());
    println!("{}", ensemble);
}

#[test]
fn test_mismatched_lengths_rejected() {
    let result = WavePacketEnsemble::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
        false,
    );
    assert_eq!(
        result.err(),
        Some(EnsembleError::MismatchedLengths {
            positions: 3,
            momenta: 2,
            widths: 3,
            masses: 3,
        })
    );
}

#[test]
fn test_empty_ensemble_rejected() {
    let result =
        WavePacketEnsemble::<f64>::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), false);
    assert_eq!(result.err(), Some(EnsembleError::Empty));
}

#[test]
fn test_zero_width_rejected() {
    let result = WavePacketEnsemble::new(
        vec![0.0, 1.0],
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        false,
    );
    assert_eq!(
        result.err(),
        Some(EnsembleError::NonPositiveWidth {
            index: 1,
            value: 0.0,
        })
    );
}

#[test]
fn test_negative_width_rejected() {
    let result = WavePacketEnsemble::new(vec![0.0], vec![0.0], vec![-0.3], vec![1.0], false);
    assert_eq!(
        result.err(),
        Some(EnsembleError::NonPositiveWidth {
            index: 0,
            value: -0.3,
        })
    );
}

#[test]
fn test_zero_mass_rejected() {
    let result = WavePacketEnsemble::new(
        vec![0.0, 1.0],
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        false,
    );
    assert_eq!(result.err(), Some(EnsembleError::ZeroMass { index: 0 }));
}

#[test]
fn test_packet_index_bounds() {
    type T = f32;

    let ensemble =
        WavePacketEnsemble::<T>::new(vec![0.0], vec![0.0], vec![1.0], vec![1.0], false).unwrap();

    assert!(ensemble.packet_value(0.0, 0.0, 0).is_ok());
    assert_eq!(
        ensemble.packet_value(0.0, 0.0, 1).err(),
        Some(EnsembleError::IndexOutOfRange { index: 1, count: 1 })
    );
}
