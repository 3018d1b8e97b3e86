//! Load both tables from disk and assemble a `Dataset`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::models::dataset::Dataset;
use crate::models::product::ProductRecord;
use crate::models::rating::RatingRecord;
use crate::parsers::{parse_table, InputFormat, ParseError, ParseResult, TableRecord};

/// A dataset plus every row that was rejected while loading it.
#[derive(Debug)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub product_errors: Vec<ParseError>,
    pub rating_errors: Vec<ParseError>,
}

/// Read and parse the product catalog and rating log files.
///
/// The format of each file is inferred from its extension. Unreadable files
/// and unsupported formats fail the load; malformed rows are reported in the
/// returned `LoadReport` and skipped.
pub fn load_from_files(
    products_path: &Path,
    ratings_path: &Path,
) -> Result<LoadReport, anyhow::Error> {
    let products = read_table::<ProductRecord>(products_path)?;
    let ratings = read_table::<RatingRecord>(ratings_path)?;
    Ok(assemble(products, ratings))
}

fn read_table<T: TableRecord>(path: &Path) -> Result<ParseResult<T>, anyhow::Error> {
    let format = InputFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported {} file '{}': expected .csv or .json",
            T::TABLE,
            path.display()
        )
    })?;
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read {} file '{}'", T::TABLE, path.display()))?;
    parse_table(&data, format)
        .with_context(|| format!("Failed to parse {} file '{}'", T::TABLE, path.display()))
}

fn assemble(
    products: ParseResult<ProductRecord>,
    ratings: ParseResult<RatingRecord>,
) -> LoadReport {
    let mut product_errors = products.errors;
    let mut seen = HashSet::with_capacity(products.records.len());
    let mut unique = Vec::with_capacity(products.records.len());

    // Keep the first row for each product id.
    for parsed in products.records {
        let product = parsed.record;
        if seen.insert(product.product_id.clone()) {
            unique.push(product);
        } else {
            product_errors.push(ParseError {
                record_index: parsed.record_index,
                field: "product_id".to_string(),
                message: format!("Duplicate product_id '{}'", product.product_id),
            });
        }
    }
    product_errors.sort_by_key(|e| e.record_index);

    for err in product_errors.iter().chain(ratings.errors.iter()) {
        tracing::warn!(
            record = err.record_index,
            field = %err.field,
            message = %err.message,
            "Skipped malformed row"
        );
    }

    let rating_records = ratings.records.into_iter().map(|r| r.record).collect();
    let dataset = Dataset::new(unique, rating_records);
    tracing::info!(
        products = dataset.products().len(),
        ratings = dataset.ratings().len(),
        rejected_products = product_errors.len(),
        rejected_ratings = ratings.errors.len(),
        fingerprint = %dataset.fingerprint(),
        "Dataset loaded"
    );

    LoadReport {
        dataset,
        product_errors,
        rating_errors: ratings.errors,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PRODUCTS_CSV: &[u8] = b"product_id,product_name,sub_category,price\n\
        p1,Kettle,Kitchen,100\n\
        p2,Mug,Kitchen,20\n\
        p1,Kettle (dup),Kitchen,999\n";

    const RATINGS_CSV: &[u8] = b"user_id,product_id,rating\n\
        u1,p1,5\n\
        u2,p2,4\n";

    fn load_csv(products: &[u8], ratings: &[u8]) -> LoadReport {
        assemble(
            parse_table(products, InputFormat::Csv).unwrap(),
            parse_table(ratings, InputFormat::Csv).unwrap(),
        )
    }

    #[test]
    fn duplicate_product_ids_keep_first() {
        let report = load_csv(PRODUCTS_CSV, RATINGS_CSV);
        assert_eq!(report.dataset.products().len(), 2);
        assert_eq!(report.dataset.products()[0].product_name, "Kettle");
        assert_eq!(report.product_errors.len(), 1);
        assert_eq!(report.product_errors[0].field, "product_id");
        assert!(report.rating_errors.is_empty());
    }

    #[test]
    fn duplicate_reports_file_position_after_rejected_rows() {
        let products = b"product_id,product_name,sub_category,price\n\
            p1,Kettle,Kitchen,100\n\
            p2,Broken,Kitchen,-5\n\
            p1,Kettle again,Kitchen,100\n";
        let report = load_csv(products, RATINGS_CSV);
        assert_eq!(report.product_errors.len(), 2);
        assert_eq!(report.product_errors[0].record_index, 1);
        assert_eq!(report.product_errors[0].field, "products");
        assert_eq!(report.product_errors[1].record_index, 2);
        assert_eq!(report.product_errors[1].field, "product_id");
    }

    #[test]
    fn leading_zero_ids_stay_distinct() {
        let products = b"product_id,product_name,sub_category,price\n\
            007,Bond Mug,Kitchen,50\n\
            7,Plain Mug,Kitchen,40\n";
        let ratings = b"user_id,product_id,rating\n\
            0042,7,5\n\
            true,007,5\n\
            12345678901234567890123,7,4\n";
        let report = load_csv(products, ratings);

        assert!(report.product_errors.is_empty());
        assert!(report.rating_errors.is_empty());
        assert_eq!(report.dataset.products().len(), 2);
        assert_eq!(report.dataset.ratings()[0].user_id, "0042");
        assert_eq!(report.dataset.ratings()[1].user_id, "true");
        assert_eq!(
            report.dataset.ratings()[2].user_id,
            "12345678901234567890123"
        );

        let stats = crate::services::basic_stats::calculate(
            report.dataset.products(),
            report.dataset.ratings(),
        );
        assert_eq!(stats.num_products, 2);
        assert_eq!(stats.num_users, 3);
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let products_path = dir.path().join("products.csv");
        let ratings_path = dir.path().join("ratings.json");
        std::fs::File::create(&products_path)
            .unwrap()
            .write_all(PRODUCTS_CSV)
            .unwrap();
        std::fs::write(
            &ratings_path,
            br#"[{"user_id": "u1", "product_id": "p2", "rating": 5}]"#,
        )
        .unwrap();

        let report = load_from_files(&products_path, &ratings_path).unwrap();
        assert_eq!(report.dataset.ratings().len(), 1);
        assert_eq!(report.dataset.ratings()[0].product_id, "p2");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_files(
            &dir.path().join("products.csv"),
            &dir.path().join("ratings.csv"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read products file"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_from_files(Path::new("products.xlsx"), Path::new("ratings.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported products file"));
    }
}
