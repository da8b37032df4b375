use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Continuum baseline plus emission lines plus noise.
fn generate_spectrum(
    frequencies: &[f64],
    baseline: &[f64],
    lines: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    let (lo, hi) = (frequencies[0], frequencies[frequencies.len() - 1]);
    frequencies
        .iter()
        .map(|&f| {
            let t = (f - lo) / (hi - lo);
            let continuum: f64 = baseline.iter().rev().fold(0.0, |acc, &c| acc * t + c);
            let signal: f64 = lines
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(f, mu, sigma, amp))
                .sum();
            continuum + signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic spectrum (GHz, descending) as TSV")]
struct Args {
    /// Output file.
    #[arg(default_value = "spw0_sample.tsv")]
    output: PathBuf,

    /// Number of channels.
    #[arg(long, default_value_t = 1920)]
    channels: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    // 217.2 GHz downwards in 0.488 MHz channels, as a lower sideband would be
    // written out.
    let channels = args.channels.max(2);
    let frequencies: Vec<f64> = (0..channels)
        .map(|i| 217.2 - i as f64 * 0.000488)
        .collect();
    let mut ascending = frequencies.clone();
    ascending.reverse();

    let span = ascending[channels - 1] - ascending[0];
    let lines: Vec<(f64, f64, f64)> = [(0.2, 0.004, 0.9), (0.45, 0.002, 0.4), (0.8, 0.006, 1.3)]
        .iter()
        .map(|&(at, sigma_frac, amp)| (ascending[0] + at * span, sigma_frac * span, amp))
        .collect();
    let intensities = generate_spectrum(&ascending, &[0.05, 0.03, -0.02], &lines, 0.01, &mut rng);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    // Written descending so loading exercises the reversal.
    for (f, y) in ascending.iter().zip(intensities.iter()).rev() {
        writer
            .write_record([format!("{f:.6}"), format!("{y:.6}")])
            .context("writing row")?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {channels} channels ({} lines) to {}",
        lines.len(),
        args.output.display()
    );
    Ok(())
}
