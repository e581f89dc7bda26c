use std::collections::BTreeMap;

use staffscope::data::model::{Employee, EmployeeTable};

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

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Convert a day offset from 2020-01-01 into an ISO-8601 date string.
/// The generated range (2020–2023) only needs these four years.
fn date_from_offset(mut days: u64) -> String {
    let month_lengths = |year: u64| {
        let feb = if year % 4 == 0 { 29 } else { 28 };
        [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };
    let mut year = 2020;
    loop {
        let year_len: u64 = month_lengths(year).iter().sum();
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }
    for (month, &len) in month_lengths(year).iter().enumerate() {
        if days < len {
            return format!("{year}-{:02}-{:02}", month + 1, days + 1);
        }
        days -= len;
    }
    unreachable!("day offset exceeds year length");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let cities = [
        "New York",
        "Los Angeles",
        "Chicago",
        "Houston",
        "Phoenix",
        "Philadelphia",
        "San Antonio",
        "San Diego",
        "Dallas",
        "San Jose",
    ];
    let categories = ["Analyst", "Manager", "Engineer", "Technician", "Specialist"];
    let departments = [
        "Operations",
        "Engineering",
        "IT",
        "Maintenance",
        "Marketing",
        "Sales",
        "Finance",
        "HR",
    ];

    // 2020-01-01 .. 2024-01-01
    let date_span_days: u64 = 366 + 365 + 365 + 365;

    let mut rows = Vec::with_capacity(500);
    for i in 0..500u64 {
        let age = rng.range(22, 65);
        let category = categories[(i as usize) % categories.len()];

        // Salary depends on age and category, with clamped noise.
        let base_salary: f64 = if category == "Analyst" { 40_000.0 } else { 60_000.0 };
        let salary = base_salary + (age - 22) as f64 * 1500.0 + rng.gauss(0.0, 10_000.0);
        let salary = salary.round().clamp(40_000.0, 150_000.0);

        rows.push(Employee {
            name: format!("Employee{i}"),
            age: age as u32,
            salary,
            city: cities[rng.range(0, cities.len() as u64) as usize].to_string(),
            category: category.to_string(),
            department: departments[rng.range(0, departments.len() as u64) as usize]
                .to_string(),
            date: date_from_offset(rng.range(0, date_span_days)),
            extra: BTreeMap::new(),
        });
    }

    let table = EmployeeTable::from_rows(rows);
    let output_path = "data.csv";
    let bytes = staffscope::data::export::to_csv_bytes(&table)
        .expect("serializing sample data");
    std::fs::write(output_path, bytes).expect("writing sample data");

    println!("Wrote {} employee records to {output_path}", table.len());
}
