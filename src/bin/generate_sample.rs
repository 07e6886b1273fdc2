use std::path::PathBuf;

use anyhow::Result;
use rusty_scrub::data::export::save_csv;
use rusty_scrub::data::model::{Cell, Column, Table};

/// splitmix64 stream: reproducible sample data, nothing more.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Roughly normal: twelve uniforms summed and centred.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = (0..12).map(|_| self.unit()).sum::<f64>() - 6.0;
        mean + std_dev * z
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Cell that is missing with probability `p`.
fn maybe(rng: &mut SampleRng, p: f64, cell: Cell) -> Cell {
    if rng.chance(p) {
        Cell::Missing
    } else {
        cell
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data.csv"));

    let mut rng = SampleRng(42);

    let cities = ["Paris", "Lyon", "Marseille", "Lille", "Nantes, Centre"];
    let sensors = ["alpha", "beta", "gamma"];

    let mut rows: Vec<[Cell; 5]> = Vec::new();
    for id in 0..500i64 {
        let city = rng.pick(&cities);
        let temp_mean = match city {
            "Lille" => 11.0,
            "Marseille" => 19.0,
            _ => 15.0,
        };
        let temperature = (rng.normal(temp_mean, 4.0) * 10.0).round() / 10.0;
        let humidity = rng.normal(65.0, 12.0).clamp(0.0, 100.0).round() as i64;
        let sensor = rng.pick(&sensors).to_string();

        let row = [
            Cell::Integer(id),
            Cell::Text(city.to_string()),
            maybe(&mut rng, 0.05, Cell::Float(temperature)),
            maybe(&mut rng, 0.05, Cell::Integer(humidity)),
            maybe(&mut rng, 0.1, Cell::Text(sensor)),
        ];

        // Re-emit some rows verbatim to give the de-duplication something to do.
        let duplicate = rng.chance(0.08);
        if duplicate {
            rows.push(row.clone());
        }
        rows.push(row);
    }

    let names = ["id", "city", "temperature", "humidity", "sensor"];
    let columns = names
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(*name, rows.iter().map(|r| r[i].clone()).collect()))
        .collect();
    let table = Table::new(columns)?;

    let bytes = save_csv(&table, &output_path)?;
    println!(
        "Wrote {} rows ({bytes} bytes) to {}",
        table.n_rows(),
        output_path.display()
    );
    Ok(())
}
