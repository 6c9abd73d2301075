use anyhow::Result;
use ndarray::{Array, ArrayD, Dimension};
use ndarray_npy::{write_npy, WritableElement};
use num::{Complex, Float};
use std::thread::{spawn, JoinHandle};
use std::time::Instant;

/// This function writes a real-valued grid (a density field or a detector
/// series) to disk in .npy format.
pub fn density_to_disk<T, D>(path: String, array: &Array<T, D>) -> Result<()>
where
    T: WritableElement,
    D: Dimension,
{
    write_npy(&path, array)?;
    Ok(())
}

/// This function writes a complex-valued grid to disk as a pair of .npy
/// files holding the real and imaginary parts. Each part is written from
/// its own thread; the caller joins the returned handles.
pub fn complex_to_disk<T>(
    path: String,
    array: &ArrayD<Complex<T>>,
) -> Result<Vec<JoinHandle<Instant>>>
where
    T: Float + WritableElement + Send + Sync + 'static,
{
    let timer = Instant::now();

    // Split into component grids
    let real: ArrayD<T> = array.mapv(|ψ| ψ.re);
    let imag: ArrayD<T> = array.mapv(|ψ| ψ.im);

    // Construct paths
    let real_path = format!("{}_real.npy", path);
    let imag_path = format!("{}_imag.npy", path);

    // Spawn a thread for each of the i/o operations
    let real_handle: JoinHandle<_> = spawn(move || {
        write_npy(&real_path, &real).expect("write to disk in parallel failed");
        timer
    });
    let imag_handle: JoinHandle<_> = spawn(move || {
        write_npy(&imag_path, &imag).expect("write to disk in parallel failed");
        timer
    });

    Ok(vec![real_handle, imag_handle])
}
