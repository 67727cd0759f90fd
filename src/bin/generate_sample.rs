use anyhow::{Context, Result};

/// Seeded xoshiro256** generator: the same seed always yields the same
/// sample sheet, so checked-in fixtures can be regenerated byte for byte.
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

    /// A noisy score around `mean`, clamped to `[0, 1]` with 3 decimals.
    fn score(&mut self, mean: f64) -> f64 {
        let s = self.gauss(mean, SCORE_NOISE);
        (s.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
    }
}

/// Spread of generated scores around a model's expected skill.
const SCORE_NOISE: f64 = 0.04;

const LEVELS: [(&str, f64); 4] = [("A1", 0.0), ("A2", 0.06), ("B1", 0.14), ("B2", 0.22)];
const CATEGORIES: [(&str, f64); 4] = [("VOCAB", 0.0), ("GRAMMAR", 0.05), ("RC", -0.03), ("LC", 0.08)];

/// (name, size in billions or None when undisclosed, family, openness, skill)
const MODELS: [(&str, Option<f64>, &str, &str, f64); 12] = [
    ("GPT-4o", None, "GPT", "Closed", 0.93),
    ("Claude-3.5-Sonnet", None, "Claude", "Closed", 0.92),
    ("Gemini-1.5-Pro", None, "Gemini", "Closed", 0.88),
    ("Llama-3.1-405B", Some(405.0), "Llama", "Open", 0.86),
    ("Llama-3.1-70B", Some(70.0), "Llama", "Open", 0.8),
    ("Llama-3.1-8B", Some(8.0), "Llama", "Open", 0.58),
    ("Qwen2.5-72B", Some(72.0), "Qwen", "Open", 0.78),
    ("Mistral-Large", Some(123.0), "Mistral", "Open", 0.8),
    ("Gemma-2-9B", Some(9.0), "Gemma", "Open", 0.62),
    ("Phi-3.5-mini", Some(3.8), "Phi", "Open", 0.41),
    ("Aya-23-35B", Some(35.0), "Aya", "Open", 0.66),
    ("Command-R-Plus", Some(104.0), "Command-R", "Open", 0.7),
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_results.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut header: Vec<String> = ["LLM", "Size", "Family", "Closed_Open"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for (level, _) in LEVELS {
        for (category, _) in CATEGORIES {
            header.push(format!("{level}_{category}"));
        }
        header.push(format!("{level}_total"));
    }

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(&header)?;

    for (name, size, family, openness, skill) in MODELS {
        let mut record = vec![
            name.to_string(),
            size.map(|s| s.to_string()).unwrap_or_default(),
            family.to_string(),
            openness.to_string(),
        ];
        for (_, level_penalty) in LEVELS {
            let scores: Vec<f64> = CATEGORIES
                .iter()
                .map(|&(_, cat_penalty)| rng.score(skill - level_penalty - cat_penalty))
                .collect();
            let total = scores.iter().sum::<f64>() / scores.len() as f64;
            record.extend(scores.iter().map(|s| s.to_string()));
            record.push(format!("{:.3}", total));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {} models to {output_path}", MODELS.len());
    Ok(())
}
