use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

const OUTPUT_DIR: &str = "sample_data";

const SALARY_FIELDS: [(&str, f64); 11] = [
    ("All fields", 1.00),
    ("Science and engineering", 1.03),
    ("Life sciences", 0.92),
    ("Physical sciences and earth sciences", 1.02),
    ("Mathematics and computer sciences", 1.15),
    ("Psychology and social sciences ", 0.90),
    ("Engineering", 1.20),
    ("Non-science and engineering", 0.85),
    ("Education", 0.86),
    ("Humanities and arts", 0.78),
    ("Other", 0.88),
];

/// (field, recipients in 1987, yearly growth, visa share in 1987, in 2017)
const STATUS_FIELDS: [(&str, f64, f64, f64, f64); 9] = [
    ("All fields", 32000.0, 0.018, 0.18, 0.33),
    ("Life sciences", 6500.0, 0.028, 0.15, 0.26),
    ("Physical sciences and earth sciences", 4200.0, 0.015, 0.25, 0.42),
    ("Mathematics and computer sciences", 1200.0, 0.040, 0.35, 0.58),
    ("Psychology and social sciences", 5800.0, 0.012, 0.10, 0.20),
    ("Engineering", 4000.0, 0.032, 0.42, 0.57),
    ("Education", 6500.0, -0.008, 0.06, 0.11),
    ("Humanities and arts", 3800.0, 0.012, 0.07, 0.13),
    ("Other", 1200.0, 0.035, 0.14, 0.22),
];

const COUNTRIES: [&str; 40] = [
    "China", "India", "South Korea", "Iran", "Taiwan", "Saudi Arabia", "Turkey",
    "Bangladesh", "Canada", "Brazil", "Nigeria", "Vietnam", "Italy", "Colombia", "Mexico",
    "Egypt", "Pakistan", "Germany", "Japan", "Chile", "Thailand", "Nepal", "France",
    "Indonesia", "Greece", "Spain", "Ghana", "Kenya", "Ethiopia", "Malaysia", "Sri Lanka",
    "Jordan", "Russia", "Argentina", "United Kingdom", "Israel", "Ecuador", "Peru",
    "Lebanon", "Kuwait",
];

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

    /// Multiplicative jitter in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (2.0 * self.next_f64() - 1.0)
    }
}

/// Rows are padded to `width` cells so blank rows stay blank records.
fn write_rows(path: &Path, rows: &[Vec<String>], width: usize) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        let mut record = row.clone();
        record.resize(width.max(record.len()), String::new());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn title_rows(title: &str, unit: &str) -> Vec<Vec<String>> {
    vec![vec![title.to_string()], vec![unit.to_string()], vec![]]
}

fn salaries(rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let mut rows = title_rows(
        "Median annual salary of doctorate recipients with definite postgraduation plans, by field and employment sector: 2017",
        "(Dollars)",
    );
    rows.push(
        [
            "Field of study",
            "Academe",
            "Industry or business",
            "Government",
            "Nonprofit organization",
            "Other or unknown",
        ]
        .map(String::from)
        .to_vec(),
    );

    let sector_base = [58000.0, 105000.0, 95000.0, 72000.0, 68000.0];
    for (field, factor) in SALARY_FIELDS {
        let mut row = vec![field.to_string()];
        for base in sector_base {
            let salary = (base * factor * rng.jitter(0.05) / 500.0).round() * 500.0;
            row.push(format!("{salary}"));
        }
        rows.push(row);
    }
    rows
}

fn status(rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let mut header = vec!["Year".to_string()];
    for (field, ..) in STATUS_FIELDS {
        header.push(field.to_string());
        header.push("U.S. citizen or permanent resident".to_string());
        header.push("Temporary visa holder".to_string());
    }
    let mut rows = vec![header];

    for year in 1987..=2017 {
        let t = (year - 1987) as f64;
        let mut row = vec![year.to_string()];
        for (_, base, growth, visa_start, visa_end) in STATUS_FIELDS {
            let total = (base * (1.0 + growth).powf(t) * rng.jitter(0.03)).round();
            let visa_share = visa_start + (visa_end - visa_start) * t / 30.0;
            let visa = (total * visa_share).round();
            // Some recipients report no citizenship.
            let citizen = ((total - visa) * 0.95).round();
            row.extend([total, citizen, visa].map(|v| v.to_string()));
        }
        rows.push(row);
    }

    rows.push(vec![
        "SOURCE: synthetic sample generated by generate_sample.".to_string(),
    ]);
    rows
}

fn countries(rng: &mut SimpleRng) -> Vec<Vec<String>> {
    let mut rows = title_rows(
        "Top countries of origin of temporary visa holders earning doctorates at U.S. colleges and universities: 2017",
        "(Number)",
    );
    rows.push(["Country", "Rank", "Doctorate recipients"].map(String::from).to_vec());

    let mut recipients: Vec<f64> = (0..COUNTRIES.len())
        .map(|i| (5200.0 / (i as f64 + 1.0).powf(1.1) * rng.jitter(0.1)).round() + 30.0)
        .collect();
    recipients.sort_by(|a, b| b.total_cmp(a));

    let total: f64 = recipients.iter().sum();
    rows.push(vec![
        "All temporary visa holders".to_string(),
        String::new(),
        format!("{}", (total * 1.25).round()),
    ]);
    rows.push(vec![
        format!("Top {} countries", COUNTRIES.len()),
        String::new(),
        format!("{total}"),
    ]);
    for (i, (country, n)) in COUNTRIES.iter().zip(&recipients).enumerate() {
        rows.push(vec![country.to_string(), (i + 1).to_string(), n.to_string()]);
    }
    rows.push(vec![
        "NOTE: Countries are ranked by number of doctorate recipients.".to_string(),
    ]);
    rows
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(dir).with_context(|| format!("creating {OUTPUT_DIR}"))?;

    write_rows(&dir.join("salaries.csv"), &salaries(&mut rng), 6)?;
    write_rows(&dir.join("status.csv"), &status(&mut rng), 1 + 3 * STATUS_FIELDS.len())?;
    write_rows(&dir.join("countries.csv"), &countries(&mut rng), 3)?;

    let config = json!({
        "salaries_path": "salaries.csv",
        "status_path": "status.csv",
        "countries_path": "countries.csv",
        "header_image": null
    });
    fs::write(dir.join("dashboard.json"), serde_json::to_string_pretty(&config)?)
        .context("writing dashboard.json")?;

    println!(
        "Wrote sample tables ({} fields, 31 years, {} countries) to {OUTPUT_DIR}/",
        SALARY_FIELDS.len(),
        COUNTRIES.len()
    );
    println!("Run with PHD_TRENDS_CONFIG={OUTPUT_DIR}/dashboard.json");
    Ok(())
}
