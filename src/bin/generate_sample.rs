use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic taxpayer risk dataset for the dashboard.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output CSV path
    #[arg(value_name = "FILE", default_value = "zimra_data.csv")]
    output: PathBuf,

    /// Number of taxpayers to generate
    #[arg(short = 'n', long, default_value_t = 500)]
    count: usize,
}

const REGIONS: [&str; 5] = ["Harare", "Bulawayo", "Manicaland", "Midlands", "Masvingo"];
const SECTORS: [&str; 5] = ["Retail", "Mining", "Agriculture", "Manufacturing", "Services"];
const NAME_PARTS: [&str; 8] = [
    "Zambezi", "Kariba", "Mutare", "Granite", "Baobab", "Savanna", "Chimanimani", "Limpopo",
];
const SUFFIXES: [&str; 4] = ["Holdings", "Traders", "Enterprises", "(Pvt) Ltd"];

#[derive(Serialize)]
struct SampleRow {
    taxpayer_name: String,
    taxpayer_id: String,
    sector: &'static str,
    region: &'static str,
    annual_revenue_usd: f64,
    late_filings_last_12m: u32,
    fiscal_device_uptime_pct: f64,
    vat_to_sales_ratio: f64,
    outstanding_debt_zig: f64,
    previous_audit_violations: u32,
    prediction_score: f64,
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }
}

/// Log-normal-ish revenue: most taxpayers small, a long tail of large ones.
fn revenue(rng: &mut SimpleRng) -> f64 {
    let exponent = 4.0 + rng.next_f64() * 3.0;
    (10f64.powf(exponent) / 10.0).round() * 10.0
}

fn sample_row(i: usize, rng: &mut SimpleRng) -> SampleRow {
    let late_filings = rng.below(7) as u32;
    let violations = rng.below(4) as u32;
    let uptime = 60.0 + rng.next_f64() * 40.0;
    let vat_ratio = 0.02 + rng.next_f64() * 0.18;

    // Score loosely tracks the behavioural features so quadrants are populated.
    let signal = late_filings as f64 * 8.0 + violations as f64 * 10.0 + (100.0 - uptime) * 0.6
        - vat_ratio * 60.0;
    let score = (signal + rng.next_f64() * 35.0).clamp(0.0, 100.0);

    SampleRow {
        taxpayer_name: format!("{} {}", rng.pick(&NAME_PARTS), rng.pick(&SUFFIXES)),
        taxpayer_id: format!("ZW{:07}", 1_000_000 + i),
        sector: rng.pick(&SECTORS),
        region: rng.pick(&REGIONS),
        annual_revenue_usd: revenue(rng),
        late_filings_last_12m: late_filings,
        fiscal_device_uptime_pct: (uptime * 10.0).round() / 10.0,
        vat_to_sales_ratio: (vat_ratio * 1000.0).round() / 1000.0,
        outstanding_debt_zig: (rng.next_f64() * 250_000.0).round(),
        previous_audit_violations: violations,
        prediction_score: (score * 10.0).round() / 10.0,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { output, count } = Args::parse();
    let output_path = output.display();

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {output_path}"))?;
    for i in 0..count {
        writer
            .serialize(sample_row(i, &mut rng))
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {count} taxpayers to {output_path}");
    println!("Wrote {count} taxpayers to {output_path}");
    Ok(())
}
