use super::domain::{DepartureRecord, EnrichedRecord};

/// Attaches age, tenure and salary bands to every record.
///
/// The input is left untouched; callers receive an owned, enriched copy.
pub fn categorize(records: &[DepartureRecord]) -> Vec<EnrichedRecord> {
    let enriched: Vec<EnrichedRecord> = records.iter().cloned().map(EnrichedRecord::new).collect();
    tracing::debug!(records = enriched.len(), "categorized departure records");
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::attrition::domain::{AgeBand, Gender, SalaryBand, TenureBand};

    fn record(age: u8, tenure_years: f64, monthly_salary: f64) -> DepartureRecord {
        DepartureRecord {
            employee_id: "1".to_string(),
            gender: Gender::Female,
            age,
            department: "Sales".to_string(),
            reason: "relocation".to_string(),
            departure_year: 2023,
            tenure_years,
            monthly_salary,
        }
    }

    #[test]
    fn lower_edges_belong_to_the_band_they_open() {
        let enriched = categorize(&[
            record(25, 1.0, 5000.0),
            record(35, 3.0, 8000.0),
            record(45, 5.0, 12000.0),
            record(55, 10.0, 20000.0),
        ]);

        let ages: Vec<_> = enriched.iter().map(|r| r.age_band).collect();
        assert_eq!(
            ages,
            vec![
                AgeBand::From25To35,
                AgeBand::From35To45,
                AgeBand::From45To55,
                AgeBand::Over55
            ]
        );

        let tenures: Vec<_> = enriched.iter().map(|r| r.tenure_band).collect();
        assert_eq!(
            tenures,
            vec![
                TenureBand::OneToThree,
                TenureBand::ThreeToFive,
                TenureBand::FiveToTen,
                TenureBand::OverTen
            ]
        );

        let salaries: Vec<_> = enriched.iter().map(|r| r.salary_band).collect();
        assert_eq!(
            salaries,
            vec![
                SalaryBand::From5000To8000,
                SalaryBand::From8000To12000,
                SalaryBand::From12000To20000,
                SalaryBand::Over20000
            ]
        );
    }

    #[test]
    fn values_just_below_an_edge_stay_in_the_lower_band() {
        let enriched = categorize(&[record(24, 0.99, 4999.99)]);
        assert_eq!(enriched[0].age_band, AgeBand::Under25);
        assert_eq!(enriched[0].tenure_band, TenureBand::UnderOneYear);
        assert_eq!(enriched[0].salary_band, SalaryBand::Under5000);
    }

    #[test]
    fn out_of_range_values_fall_into_terminal_bands() {
        let enriched = categorize(&[record(0, 0.0, 0.0), record(255, 80.0, 1_000_000.0)]);
        assert_eq!(enriched[0].age_band, AgeBand::Under25);
        assert_eq!(enriched[0].tenure_band, TenureBand::UnderOneYear);
        assert_eq!(enriched[0].salary_band, SalaryBand::Under5000);
        assert_eq!(enriched[1].age_band, AgeBand::Over55);
        assert_eq!(enriched[1].tenure_band, TenureBand::OverTen);
        assert_eq!(enriched[1].salary_band, SalaryBand::Over20000);

        let nan = categorize(&[record(30, f64::NAN, f64::NAN)]);
        assert_eq!(nan[0].tenure_band, TenureBand::OverTen);
        assert_eq!(nan[0].salary_band, SalaryBand::Over20000);
    }

    #[test]
    fn categorize_preserves_raw_fields_and_order() {
        let source = vec![record(30, 2.5, 7000.0), record(50, 12.0, 15000.0)];
        let enriched = categorize(&source);

        assert_eq!(enriched.len(), source.len());
        for (raw, enriched) in source.iter().zip(&enriched) {
            assert_eq!(&enriched.record, raw);
        }
    }
}
