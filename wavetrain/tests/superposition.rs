use approx::assert_abs_diff_eq;
use ndarray::{arr1, Array2};
use wavetrain::{CoordinateField, EnsembleError, WavePacketEnsemble};

#[test]
fn single_packet_equals_its_superposition() {
    // With N = 1 the normalization is sqrt(1), so the superposition is the
    // packet itself, bit for bit
    let ensemble =
        WavePacketEnsemble::new(vec![0.3], vec![1.2], vec![0.8], vec![2.0], false).unwrap();

    for &t in &[0.0, 0.5, 2.0, 7.3] {
        for &x in &[-3.0, 0.0, 0.3, 4.1] {
            let packet = ensemble.packet_value(t, x, 0).unwrap();
            let train = ensemble.superposition_value(t, x);
            assert_eq!(train.re, packet.re);
            assert_eq!(train.im, packet.im);
        }
    }
}

#[test]
fn ground_state_amplitude_at_origin() {
    // X = [0], P = [0], S = [1], M = [1] at t = 0, x = 0 evaluates to
    // pi^(-1/4), purely real
    let ensemble =
        WavePacketEnsemble::new(vec![0.0], vec![0.0], vec![1.0], vec![1.0], false).unwrap();

    let value = ensemble.superposition_value(0.0, 0.0);
    assert_abs_diff_eq!(value.re, std::f64::consts::PI.powf(-0.25), epsilon = 1e-12);
    assert_abs_diff_eq!(value.re, 0.7511, epsilon = 1e-4);
    assert_eq!(value.im, 0.0);
}

#[test]
fn superposition_is_permutation_invariant() {
    let forward = WavePacketEnsemble::new(
        vec![-2.0, 0.0, 3.0],
        vec![1.0, -0.5, 0.0],
        vec![0.5, 1.0, 2.0],
        vec![1.0, 2.0, 0.5],
        false,
    )
    .unwrap();

    // Same packets, permuted consistently
    let permuted = WavePacketEnsemble::new(
        vec![3.0, -2.0, 0.0],
        vec![0.0, 1.0, -0.5],
        vec![2.0, 0.5, 1.0],
        vec![0.5, 1.0, 2.0],
        false,
    )
    .unwrap();

    for &t in &[0.0, 1.3, 5.0] {
        for &x in &[-4.0, -0.5, 0.0, 2.7] {
            let a = forward.superposition_value(t, x);
            let b = permuted.superposition_value(t, x);
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}

#[test]
fn nospread_with_zero_momentum_never_evolves() {
    // With P = 0 the classical drift vanishes, so the non-spreading packet
    // is the t = 0 stationary Gaussian at every time
    let frozen =
        WavePacketEnsemble::new(vec![0.7], vec![0.0], vec![1.3], vec![1.0], true).unwrap();
    let spreading =
        WavePacketEnsemble::new(vec![0.7], vec![0.0], vec![1.3], vec![1.0], false).unwrap();

    for &t in &[0.0, 0.9, 4.2, 100.0] {
        for &x in &[-2.0, 0.0, 0.7, 3.3] {
            let a = frozen.superposition_value(t, x);
            let b = spreading.superposition_value(0.0, x);
            assert_eq!(a.re, b.re);
            assert_eq!(a.im, b.im);
        }
    }
}

#[test]
fn nospread_translates_at_constant_width() {
    // A drifting non-spreading packet at time t matches the t = 0 packet
    // evaluated at the drifted position, up to the momentum phase
    let ensemble =
        WavePacketEnsemble::new(vec![0.0], vec![2.0], vec![1.0], vec![1.0], true).unwrap();

    let t = 3.0;
    let drift = 2.0 * t / 1.0;
    let at_center = ensemble.density_value(t, drift);
    let at_origin = ensemble.density_value(0.0, 0.0);
    assert_abs_diff_eq!(at_center, at_origin, epsilon = 1e-12);
}

#[test]
fn packet_index_out_of_range() {
    let ensemble =
        WavePacketEnsemble::new(vec![0.0], vec![0.0], vec![1.0], vec![1.0], false).unwrap();

    let t = CoordinateField::Scalar(0.0);
    let x = CoordinateField::Scalar(0.0);
    assert_eq!(
        ensemble.packet(&t, &x, 5).err(),
        Some(EnsembleError::IndexOutOfRange { index: 5, count: 1 })
    );
}

#[test]
fn superposition_broadcasts_time_row_against_position_column() {
    let ensemble = WavePacketEnsemble::new(
        vec![-1.0, 1.0],
        vec![0.5, -0.5],
        vec![1.0, 1.0],
        vec![1.0, 1.0],
        false,
    )
    .unwrap();

    let times = arr1(&[0.0, 0.4, 0.8]);
    let positions = arr1(&[-2.0, -1.0, 0.0, 1.0]);

    let t_row: Array2<f64> = times.clone().insert_axis(ndarray::Axis(0));
    let x_col: Array2<f64> = positions.clone().insert_axis(ndarray::Axis(1));

    let ψ = ensemble
        .superposition(&CoordinateField::from(t_row), &CoordinateField::from(x_col))
        .unwrap();
    assert_eq!(ψ.shape(), &[4, 3]);

    // Each grid entry agrees with the pointwise evaluation
    for (i, &x) in positions.iter().enumerate() {
        for (j, &t) in times.iter().enumerate() {
            let pointwise = ensemble.superposition_value(t, x);
            assert_eq!(ψ[[i, j]].re, pointwise.re);
            assert_eq!(ψ[[i, j]].im, pointwise.im);
        }
    }
}

#[test]
fn incompatible_grids_are_rejected() {
    let ensemble =
        WavePacketEnsemble::new(vec![0.0], vec![0.0], vec![1.0], vec![1.0], false).unwrap();

    let t = CoordinateField::from(arr1(&[0.0, 1.0, 2.0]));
    let x = CoordinateField::from(arr1(&[0.0, 1.0, 2.0, 3.0]));
    assert_eq!(
        ensemble.superposition(&t, &x).err(),
        Some(EnsembleError::ShapeMismatch {
            t_shape: vec![3],
            x_shape: vec![4],
        })
    );
}
