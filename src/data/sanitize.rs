use serde::Serialize;

use super::model::{RawTable, Spectrum, SpectrumPoint};

/// What sanitization did to one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub rows_read: usize,
    /// Rows dropped because the energy cell was not a number.
    pub dropped_unparseable: usize,
    /// Rows dropped because the energy was exactly 0.
    pub dropped_zero_energy: usize,
    /// Intensity cells that were not numbers; kept as NaN.
    pub nan_intensities: usize,
}

impl SanitizeReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.dropped_unparseable - self.dropped_zero_energy
    }
}

/// Turn a raw table into a [`Spectrum`].
///
/// Rows whose energy cell did not parse are always dropped. With
/// `drop_zero_energy` set, rows at exactly 0 eV are dropped as well, which
/// also removes a legitimate zero-loss reading. Row labels are preserved.
pub fn sanitize(table: &RawTable, drop_zero_energy: bool) -> (Spectrum, SanitizeReport) {
    let mut report = SanitizeReport {
        rows_read: table.rows.len(),
        ..SanitizeReport::default()
    };

    let mut points = Vec::with_capacity(table.rows.len());
    for raw in &table.rows {
        let Some(energy) = raw.energy else {
            report.dropped_unparseable += 1;
            continue;
        };
        if drop_zero_energy && energy == 0.0 {
            report.dropped_zero_energy += 1;
            continue;
        }
        let intensity = raw.intensity.unwrap_or_else(|| {
            report.nan_intensities += 1;
            f64::NAN
        });
        points.push(SpectrumPoint {
            row: raw.row,
            energy,
            intensity,
        });
    }

    if report.dropped_unparseable + report.dropped_zero_energy + report.nan_intensities > 0 {
        log::debug!(
            "{}: dropped {} unparseable and {} zero-energy rows, {} intensities not numeric",
            table.source_name,
            report.dropped_unparseable,
            report.dropped_zero_energy,
            report.nan_intensities
        );
    }

    (
        Spectrum::new(&table.energy_column, &table.intensity_column, points),
        report,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::loader::read_csv;

    const TABLE: &str = "Energy,Intensity\n0,900\nfoo,10\n1.5,20\n2.0,x\n3.0,40\n";

    #[test]
    fn no_sentinel_rows_survive() {
        let table = read_csv(TABLE.as_bytes(), "t.csv").unwrap();
        let (spectrum, report) = sanitize(&table, true);
        assert!(spectrum.points.iter().all(|p| p.energy != 0.0));
        assert_eq!(spectrum.len(), 3);
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.dropped_unparseable, 1);
        assert_eq!(report.dropped_zero_energy, 1);
        assert_eq!(report.rows_kept(), 3);
    }

    #[test]
    fn row_labels_are_preserved() {
        let table = read_csv(TABLE.as_bytes(), "t.csv").unwrap();
        let (spectrum, _) = sanitize(&table, true);
        let rows: Vec<usize> = spectrum.points.iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![2, 3, 4]);
    }

    #[test]
    fn zero_energy_can_be_kept() {
        let table = read_csv(TABLE.as_bytes(), "t.csv").unwrap();
        let (spectrum, report) = sanitize(&table, false);
        assert_eq!(spectrum.points[0].energy, 0.0);
        assert_eq!(report.dropped_zero_energy, 0);
        assert_eq!(report.dropped_unparseable, 1);
    }

    #[test]
    fn bad_intensity_becomes_nan() {
        let table = read_csv(TABLE.as_bytes(), "t.csv").unwrap();
        let (spectrum, report) = sanitize(&table, true);
        assert_eq!(report.nan_intensities, 1);
        assert!(spectrum.points[1].intensity.is_nan());
    }
}
