use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "data/spacex_launch_dash.csv";
const PARQUET_PATH: &str = "data/spacex_launch_dash.parquet";

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

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Bernoulli trial with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One row of the generated table.
struct GeneratedLaunch {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload_mass_kg: f64,
    booster_category: &'static str,
}

/// Booster category, payload band (kg) and base success rate, roughly
/// tracking the Falcon 9 block history.
const BOOSTER_PROFILES: [(&str, f64, f64, f64); 5] = [
    ("v1.0", 0.0, 700.0, 0.40),
    ("v1.1", 400.0, 5000.0, 0.50),
    ("FT", 1500.0, 9600.0, 0.75),
    ("B4", 2000.0, 9600.0, 0.80),
    ("B5", 2500.0, 9600.0, 0.92),
];

/// Launch sites with how many launches each contributes per category era.
const SITES: [(&str, [usize; 5]); 4] = [
    ("CCAFS LC-40", [4, 6, 10, 4, 2]),
    ("CCAFS SLC-40", [0, 0, 2, 2, 3]),
    ("KSC LC-39A", [0, 0, 6, 4, 3]),
    ("VAFB SLC-4E", [0, 3, 4, 2, 1]),
];

fn generate(rng: &mut SimpleRng) -> Vec<GeneratedLaunch> {
    let mut launches = Vec::new();
    let mut flight_number: i64 = 1;

    for (era, &(category, payload_lo, payload_hi, base_rate)) in
        BOOSTER_PROFILES.iter().enumerate()
    {
        for &(site, counts) in &SITES {
            for _ in 0..counts[era] {
                let payload_mass_kg = rng.range(payload_lo, payload_hi).round();
                // Heavier payloads were slightly riskier early on.
                let success_rate = base_rate - 0.08 * (payload_mass_kg / 10_000.0);
                let class = i64::from(rng.chance(success_rate));

                launches.push(GeneratedLaunch {
                    flight_number,
                    site,
                    class,
                    payload_mass_kg,
                    booster_category: category,
                });
                flight_number += 1;
            }
        }
    }

    launches
}

fn write_csv(launches: &[GeneratedLaunch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for launch in launches {
        writer.write_record([
            launch.flight_number.to_string(),
            launch.site.to_string(),
            launch.class.to_string(),
            format!("{}", launch.payload_mass_kg),
            launch.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(launches: &[GeneratedLaunch]) -> Result<()> {
    let flight_array =
        Int64Array::from(launches.iter().map(|l| l.flight_number).collect::<Vec<_>>());
    let site_array = StringArray::from(launches.iter().map(|l| l.site).collect::<Vec<_>>());
    let class_array = Int64Array::from(launches.iter().map(|l| l.class).collect::<Vec<_>>());
    let payload_array =
        Float64Array::from(launches.iter().map(|l| l.payload_mass_kg).collect::<Vec<_>>());
    let booster_array =
        StringArray::from(launches.iter().map(|l| l.booster_category).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(booster_array),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    std::fs::create_dir_all("data").context("creating data directory")?;
    write_csv(&launches)?;
    write_parquet(&launches)?;

    println!(
        "Wrote {} launches to {CSV_PATH} and {PARQUET_PATH}",
        launches.len()
    );
    Ok(())
}
