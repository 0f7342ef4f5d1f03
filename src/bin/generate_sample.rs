use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::json;

const MIN_CARS: u64 = 4;
const MAX_CARS: u64 = 10;
const MIN_ROWS: u64 = 3;
const MAX_ROWS: u64 = 20;
const MAX_TIME: f64 = 120.0;
const MAX_SPEED: f64 = 20.0;
/// Actual fields deviate from expected by up to ±30 %.
const ERROR_CAP: f64 = 0.30;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Inclusive integer range.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

struct Options {
    out_dir: PathBuf,
    na_rate: f64,
    seed: u64,
}

fn parse_options() -> Result<Options> {
    let mut opts = Options {
        out_dir: PathBuf::from("."),
        na_rate: 0.0,
        seed: 42,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--na-rate" => {
                let v = args.next().context("--na-rate needs a value")?;
                opts.na_rate = v.parse().with_context(|| format!("bad --na-rate '{v}'"))?;
                if !(0.0..=1.0).contains(&opts.na_rate) {
                    bail!("--na-rate must be between 0 and 1");
                }
            }
            "--seed" => {
                let v = args.next().context("--seed needs a value")?;
                opts.seed = v.parse().with_context(|| format!("bad --seed '{v}'"))?;
            }
            other if other.starts_with("--") => bail!("unknown option `{other}`"),
            dir => opts.out_dir = PathBuf::from(dir),
        }
    }
    Ok(opts)
}

/// Write one car's expected and actual logs.
fn write_pair(exp_path: &Path, act_path: &Path, opts: &Options, rng: &mut SimpleRng) -> Result<()> {
    let mut exp = csv::Writer::from_path(exp_path)
        .with_context(|| format!("creating {}", exp_path.display()))?;
    let mut act = csv::Writer::from_path(act_path)
        .with_context(|| format!("creating {}", act_path.display()))?;

    let rows = rng.range(MIN_ROWS, MAX_ROWS);
    for _ in 0..rows {
        let row = [
            rng.uniform(-360.0, 360.0),
            rng.uniform(0.0, MAX_TIME),
            rng.uniform(0.0, MAX_SPEED),
        ];
        exp.write_record(row.iter().map(|v| v.to_string()))?;

        let noisy: Vec<String> = row
            .iter()
            .map(|&v| {
                if rng.next_f64() < opts.na_rate {
                    "NA".to_string()
                } else {
                    (v * rng.uniform(1.0 - ERROR_CAP, 1.0 + ERROR_CAP)).to_string()
                }
            })
            .collect();
        act.write_record(&noisy)?;
    }

    exp.flush()?;
    act.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let opts = parse_options()?;
    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating {}", opts.out_dir.display()))?;

    let mut rng = SimpleRng::new(opts.seed);
    let cars = rng.range(MIN_CARS, MAX_CARS);

    let mut expected = Vec::new();
    let mut actual = Vec::new();
    for i in 1..=cars {
        let exp_name = format!("exp{i}.csv");
        let act_name = format!("act{i}.csv");
        write_pair(
            &opts.out_dir.join(&exp_name),
            &opts.out_dir.join(&act_name),
            &opts,
            &mut rng,
        )?;
        expected.push(exp_name);
        actual.push(act_name);
    }

    let manifest_path = opts.out_dir.join("manifest.json");
    let manifest = json!({ "expected": expected, "actual": actual });
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    println!("Wrote {cars} car pairs to {}", opts.out_dir.display());
    println!("View with: microcar-compare {}", manifest_path.display());
    Ok(())
}
