//! Synthetic low-loss spectra, used for the start-up preview and by the
//! `generate_sample` binary.

use super::model::RawTable;

/// A Gaussian feature: (centre eV, sigma eV, amplitude counts).
pub type Feature = (f64, f64, f64);

/// Shape of a synthetic low-loss spectrum.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub name: &'static str,
    pub zlp_amplitude: f64,
    pub zlp_sigma: f64,
    /// Interband transitions and bulk plasmon.
    pub features: Vec<Feature>,
    /// Shift applied to every feature (not to the ZLP), eV.
    pub shift: f64,
    /// Overall intensity scale.
    pub scale: f64,
    pub noise_level: f64,
}

impl SampleSpec {
    /// Hematite-like low-loss spectrum: plasmon near 22.5 eV.
    pub fn fe2o3() -> Self {
        SampleSpec {
            name: "EELS_LowLoss_Fe2O3.csv",
            zlp_amplitude: 60_000.0,
            zlp_sigma: 0.6,
            features: vec![(5.6, 1.4, 900.0), (12.5, 3.0, 1500.0), (22.5, 5.5, 4200.0)],
            shift: 0.0,
            scale: 1.0,
            noise_level: 25.0,
        }
    }

    /// Magnetite-like low-loss spectrum: broader plasmon near 24 eV.
    pub fn fe3o4() -> Self {
        SampleSpec {
            name: "EELS_LowLoss_Fe3O4.csv",
            zlp_amplitude: 55_000.0,
            zlp_sigma: 0.6,
            features: vec![(3.2, 1.2, 700.0), (11.0, 3.5, 1200.0), (24.0, 6.5, 3900.0)],
            shift: 0.0,
            scale: 1.0,
            noise_level: 25.0,
        }
    }

    /// Counts at energy loss `e`, noise excluded.
    pub fn signal(&self, e: f64) -> f64 {
        let zlp = gaussian(e, 0.0, self.zlp_sigma, self.zlp_amplitude);
        let features: f64 = self
            .features
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(e, mu + self.shift, sigma, amp))
            .sum();
        self.scale * (zlp + features)
    }
}

/// Energy grid from `start` to `end` (inclusive) in steps of `step`.
pub fn energy_grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).round() as usize + 1;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Sample a spectrum on `energies`, adding Gaussian noise.
pub fn generate(spec: &SampleSpec, energies: &[f64], rng: &mut NoiseRng) -> RawTable {
    let pairs: Vec<(f64, f64)> = energies
        .iter()
        .map(|&e| {
            let counts = spec.signal(e) + rng.noise(0.0, spec.noise_level);
            (e, counts.max(0.0))
        })
        .collect();
    RawTable::from_pairs(spec.name, &pairs)
}

/// The spectrum shown before any file is loaded.
pub fn preview_spectrum() -> RawTable {
    let mut rng = NoiseRng::new(42);
    generate(&SampleSpec::fe2o3(), &energy_grid(-2.0, 100.0, 0.1), &mut rng)
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Seeded Gaussian noise for synthetic counts.
///
/// Public so the `generate_sample` binary draws from the same stream as the
/// preview. A fixed seed gives byte-identical sample files.
pub struct NoiseRng {
    state: u64,
    /// Second value of the last polar Box-Muller pair.
    spare: Option<f64>,
}

impl NoiseRng {
    pub fn new(seed: u64) -> Self {
        NoiseRng {
            state: seed,
            spare: None,
        }
    }

    /// SplitMix64 step.
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn next_signed(&mut self) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        2.0 * unit - 1.0
    }

    /// Standard normal draw (Marsaglia polar method).
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        loop {
            let u = self.next_signed();
            let v = self.next_signed();
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let factor = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * factor);
                return u * factor;
            }
        }
    }

    /// Noise with standard deviation `sigma` around `mean`.
    pub fn noise(&mut self, mean: f64, sigma: f64) -> f64 {
        mean + sigma * self.standard_normal()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn grid_is_inclusive() {
        let grid = energy_grid(0.0, 1.0, 0.25);
        assert_eq!(grid.len(), 5);
        assert_abs_diff_eq!(grid[4], 1.0);
    }

    #[test]
    fn noise_is_deterministic() {
        let mut a = NoiseRng::new(7);
        let mut b = NoiseRng::new(7);
        for _ in 0..11 {
            assert_eq!(a.noise(0.0, 1.0).to_bits(), b.noise(0.0, 1.0).to_bits());
        }
    }

    #[test]
    fn noise_has_requested_spread() {
        let mut rng = NoiseRng::new(42);
        let draws: Vec<f64> = (0..20_000).map(|_| rng.noise(10.0, 2.0)).collect();
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert_abs_diff_eq!(mean, 10.0, epsilon = 0.1);
        assert_abs_diff_eq!(var.sqrt(), 2.0, epsilon = 0.1);
    }

    #[test]
    fn preview_has_plasmon_above_five_ev() {
        let table = preview_spectrum();
        let (e, _) = table
            .rows
            .iter()
            .filter_map(|r| Some((r.energy?, r.intensity?)))
            .filter(|(e, _)| *e >= 5.0)
            .fold((0.0, f64::NEG_INFINITY), |acc, (e, i)| if i > acc.1 { (e, i) } else { acc });
        assert!(e > 18.0 && e < 27.0, "plasmon found at {e}");
    }
}
