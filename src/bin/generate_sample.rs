use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> String {
    format!("{:.2}", v)
}

const PREFIXES: [&str; 12] = [
    "Bharat", "Indus", "Sagar", "Ganga", "Deccan", "Kaveri", "Shakti", "Surya", "Vayu", "Pragati", "Nilgiri", "Aravalli",
];
const SUFFIXES: [&str; 8] = [
    "Infra", "Finance", "Pharma", "Textiles", "Power", "Tech", "Foods", "Logistics",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "Indian_IPO_Market_Data.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // Padded header names, as found in the published dataset.
    writer.write_record([
        "Date ",
        "IPOName",
        "Issue_Size",
        "Subscription_QIB",
        "Subscription_HNI",
        "Subscription_RII",
        "Subscription_Total",
        "Issue_Price",
        " Listing_Gains_Percent",
    ])?;

    let start = NaiveDate::from_ymd_opt(2010, 1, 4).context("start date")?;
    let n_rows = 320;
    let mut day = 0i64;

    for i in 0..n_rows {
        day += 5 + (rng.next_u64() % 20) as i64;
        let date = (start + Duration::days(day)).format("%d/%m/%y").to_string();

        let name = format!("{} {} Ltd", rng.pick(&PREFIXES), rng.pick(&SUFFIXES));
        let issue_size = rng.gauss(6.0, 1.2).exp().max(10.0);
        let issue_price = rng.gauss(5.2, 0.8).exp().clamp(10.0, 2500.0);

        let qib = rng.gauss(1.5, 1.4).exp();
        let hni = rng.gauss(1.8, 1.6).exp();
        let rii = rng.gauss(1.0, 1.0).exp();
        let total = 0.5 * qib + 0.15 * hni + 0.35 * rii;

        // Hot subscriptions tend to list higher.
        let gain = 6.0 * total.ln() + rng.gauss(0.0, 18.0);

        let mut row = vec![
            date,
            name,
            round2(issue_size),
            round2(qib),
            round2(hni),
            round2(rii),
            round2(total),
            format!("{:.0}", issue_price),
            round2(gain),
        ];

        // A few imperfect rows exercise the loader's missing-value handling.
        match i {
            17 => row[0] = "31/02/15".to_string(),
            41 => row[4].clear(),
            77 => row[8].clear(),
            _ => {}
        }

        writer.write_record(&row)?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {n_rows} IPOs to {output_path}");
    Ok(())
}
