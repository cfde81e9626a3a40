use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

/// One generated observation.
struct Row {
    country: &'static str,
    indicator: &'static str,
    year: i64,
    value: Option<f64>,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let years: Vec<i64> = (1990..=2020).collect();

    // (country, gdp_per_capita_1990, population_1990_millions, life_expectancy_1990)
    let countries: [(&str, f64, f64, f64); 10] = [
        ("Argentina", 7_200.0, 32.6, 71.6),
        ("Brazil", 6_800.0, 149.0, 66.3),
        ("Chile", 6_100.0, 13.2, 73.5),
        ("France", 26_500.0, 58.2, 76.6),
        ("Germany", 27_100.0, 79.4, 75.2),
        ("India", 1_200.0, 873.3, 57.9),
        ("Japan", 30_400.0, 123.5, 78.8),
        ("Nigeria", 1_600.0, 95.2, 45.9),
        ("Norway", 37_300.0, 4.2, 76.5),
        ("United States", 36_300.0, 249.6, 75.2),
    ];

    let mut rows: Vec<Row> = Vec::new();

    for (country, gdp0, pop0, life0) in countries {
        // Per-country growth characteristics.
        let gdp_growth = 0.01 + rng.next_f64() * 0.03;
        let pop_growth = 0.002 + rng.next_f64() * 0.02;
        let co2_base = 0.3 + (gdp0 / 4_000.0) * (0.6 + rng.next_f64() * 0.4);

        for (i, &year) in years.iter().enumerate() {
            let t = i as f64;
            let gdp = gdp0 * (1.0 + gdp_growth).powf(t) * (1.0 + rng.gauss(0.0, 0.02));
            let pop = pop0 * 1.0e6 * (1.0 + pop_growth).powf(t);
            let life = life0 + 0.22 * t + rng.gauss(0.0, 0.15);
            let co2 = co2_base * (1.0 + rng.gauss(0.0, 0.05));

            let observations: [(&str, f64); 4] = [
                ("GDP per capita (constant 2010 US$)", gdp),
                ("Population, total", pop.round()),
                ("Life expectancy at birth, total (years)", life),
                ("CO2 emissions (metric tons per capita)", co2),
            ];

            for (indicator, value) in observations {
                // Real tables have gaps; drop a few values entirely.
                let value = (rng.next_f64() >= 0.03).then_some(value);
                rows.push(Row {
                    country,
                    indicator,
                    year,
                    value,
                });
            }
        }
    }

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    write_csv("data/indicators.csv", &rows);
    write_parquet("data/indicators.parquet", &rows);

    println!(
        "Wrote {} rows ({} countries × 4 indicators × {} years) to data/indicators.{{csv,parquet}}",
        rows.len(),
        countries.len(),
        years.len()
    );
}

fn write_csv(path: &str, rows: &[Row]) {
    let mut w = csv::Writer::from_path(path).expect("Failed to create CSV file");
    w.write_record(["Country Name", "Indicator Name", "Year", "Value"])
        .expect("Failed to write CSV header");
    for row in rows {
        let value = row.value.map(|v| format!("{v:.4}")).unwrap_or_default();
        w.write_record([row.country, row.indicator, &row.year.to_string(), &value])
            .expect("Failed to write CSV row");
    }
    w.flush().expect("Failed to flush CSV");
}

fn write_parquet(path: &str, rows: &[Row]) {
    let country_array =
        StringArray::from(rows.iter().map(|r| r.country).collect::<Vec<_>>());
    let indicator_array =
        StringArray::from(rows.iter().map(|r| r.indicator).collect::<Vec<_>>());
    let year_array = Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>());
    let value_array = Float64Array::from(rows.iter().map(|r| r.value).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Country Name", DataType::Utf8, false),
        Field::new("Indicator Name", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Value", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(country_array),
            Arc::new(indicator_array),
            Arc::new(year_array),
            Arc::new(value_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
