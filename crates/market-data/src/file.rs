// In crates/market-data/src/file.rs

use std::path::Path;

use core_types::PricePoint;

use crate::error::Result;

/// Reads a JSON array of `{ "date": "YYYY-MM-DD", "price": ... }` records.
///
/// Prices may be JSON numbers or decimal strings. Ordering is not checked
/// here; `PriceSeries::new` does that.
pub fn load_price_file(path: &Path) -> Result<Vec<PricePoint>> {
    let content = std::fs::read_to_string(path)?;
    let points: Vec<PricePoint> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = points.len(), "Loaded price file.");
    Ok(points)
}

/// Writes price points in the format [`load_price_file`] reads.
pub fn save_price_file(path: &Path, points: &[PricePoint]) -> Result<()> {
    let content = serde_json::to_string_pretty(points)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_numbers_and_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");
        std::fs::write(
            &path,
            r#"[{"date":"2020-01-02","price":75.09},{"date":"2020-01-03","price":"74.36"}]"#,
        )
        .unwrap();

        let points = load_price_file(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(points[0].price, dec!(75.09));
        assert_eq!(points[1].price, dec!(74.36));
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.json");
        let points = vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), dec!(75.0875)),
            PricePoint::new(NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(), dec!(74.3575)),
        ];
        save_price_file(&path, &points).unwrap();
        assert_eq!(load_price_file(&path).unwrap(), points);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_price_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
