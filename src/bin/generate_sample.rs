use std::path::Path;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in s.iter_mut() {
            // splitmix64
            x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            *slot = z ^ (z >> 31);
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

/// (column, max value, mean at stress 0, shift per stress step)
const FACTORS: [(&str, f64, f64, f64); 20] = [
    ("anxiety_level", 21.0, 5.0, 6.0),
    ("self_esteem", 30.0, 25.0, -8.0),
    ("mental_health_history", 1.0, 0.1, 0.35),
    ("depression", 27.0, 4.0, 7.0),
    ("headache", 5.0, 1.0, 1.5),
    ("blood_pressure", 3.0, 1.5, 0.6),
    ("sleep_quality", 5.0, 4.0, -1.4),
    ("breathing_problem", 5.0, 1.5, 1.0),
    ("noise_level", 5.0, 1.8, 0.8),
    ("living_conditions", 5.0, 3.2, -0.6),
    ("safety", 5.0, 3.6, -1.0),
    ("basic_needs", 5.0, 3.6, -1.0),
    ("academic_performance", 5.0, 3.8, -1.0),
    ("study_load", 5.0, 2.0, 0.9),
    ("teacher_student_relationship", 5.0, 3.7, -1.0),
    ("future_career_concerns", 5.0, 1.2, 1.6),
    ("social_support", 3.0, 2.6, -0.8),
    ("peer_pressure", 5.0, 1.5, 1.2),
    ("extracurricular_activities", 5.0, 1.6, 1.1),
    ("bullying", 5.0, 1.0, 1.6),
];

const ROWS: usize = 1100;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = Path::new("data").join("StressLevelDataset.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut header = vec!["id"];
    header.extend(FACTORS.iter().map(|(name, ..)| *name));
    header.push("stress_level");
    writer.write_record(&header).context("writing header")?;

    let mut blanks = 0usize;
    for id in 0..ROWS {
        let stress = (rng.next_f64() * 3.0).floor().min(2.0);

        let mut record = Vec::with_capacity(header.len());
        record.push(id.to_string());
        for &(_, max, base, shift) in &FACTORS {
            // Roughly 1% of cells are missing or junk, as in survey exports.
            let roll = rng.next_f64();
            if roll < 0.005 {
                record.push(String::new());
                blanks += 1;
                continue;
            }
            if roll < 0.01 {
                record.push("n/a".to_string());
                blanks += 1;
                continue;
            }
            let noise = rng.gauss(0.0, max * 0.12);
            let value = (base + shift * stress + noise).round().clamp(0.0, max);
            record.push(format!("{value}"));
        }
        record.push(format!("{stress}"));

        writer.write_record(&record).with_context(|| format!("writing row {id}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {ROWS} rows ({} factors, {blanks} blank or junk cells) to {}",
        FACTORS.len() + 1,
        output_path.display()
    );
    Ok(())
}
