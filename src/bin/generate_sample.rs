use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use loweels::data::model::RawTable;
use loweels::data::sample::{NoiseRng, SampleSpec, energy_grid, generate};

/// Write `table` as a two-column CSV with its own header names.
fn write_table(dir: &Path, table: &RawTable) -> Result<PathBuf> {
    let path = dir.join(&table.source_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([table.energy_column.as_str(), table.intensity_column.as_str()])?;
    for row in &table.rows {
        let energy = row.energy.map(|e| format!("{e:.2}")).unwrap_or_default();
        let intensity = row.intensity.map(|i| format!("{i:.1}")).unwrap_or_default();
        writer.write_record([energy.as_str(), intensity.as_str()])?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = NoiseRng::new(42);

    // Same grid for all three files so row labels line up.
    let energies = energy_grid(-2.0, 100.0, 0.05);

    let unknown = SampleSpec {
        name: "EELS_LowLoss_unknown.csv",
        shift: 0.4,
        scale: 0.7,
        noise_level: 40.0,
        ..SampleSpec::fe2o3()
    };

    for spec in [SampleSpec::fe2o3(), SampleSpec::fe3o4(), unknown] {
        let table = generate(&spec, &energies, &mut rng);
        let path = write_table(&out_dir, &table)?;
        println!("Wrote {} rows to {}", table.len(), path.display());
    }

    Ok(())
}
