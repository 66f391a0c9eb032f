//! Synthetic chromatographic traces shared by the unit tests

/// A gaussian elution profile sampled every half second, apex at 30 seconds
pub fn gaussian_eic() -> (Vec<f64>, Vec<f32>) {
    let mut time = Vec::new();
    let mut intensity = Vec::new();
    for i in 0..=120usize {
        let t = i as f64 * 0.5;
        let z = (t - 30.0) / 4.0;
        time.push(t);
        intensity.push((2.5e5 * (-0.5 * z * z).exp()) as f32);
    }
    (time, intensity)
}

/// The gaussian profile with a deterministic ripple layered on top so that
/// intensities are not monotone on either side of the apex
pub fn noisy_eic() -> (Vec<f64>, Vec<f32>) {
    let (time, intensity) = gaussian_eic();
    let noisy = intensity
        .iter()
        .enumerate()
        .map(|(i, y)| y + 350.0 * ((i * 7919) % 13) as f32)
        .collect();
    (time, noisy)
}
