//! Partition location resolution
//!
//! Builds Hive-style partition paths: `{base}/key1=value1/key2=value2/`

use crate::descriptor::FieldSchema;
use crate::error::{CatalogError, Result};

/// Resolve the physical storage location for a partition.
///
/// Appends one `key=value` segment per partition key, in declared key order,
/// to the table's base location. The result is normalized: it does not
/// depend on whether `base_location` already ends with a path delimiter, and
/// it always ends with one, matching where the upload process places files.
///
/// Pure and deterministic; no I/O.
///
/// Partition values are not escaped (mirrors catalog behavior). Values
/// containing `/` produce paths the downstream reader will not interpret the
/// way the caller intended.
///
/// # Errors
/// Returns [`CatalogError::ArityMismatch`] when the value count differs from
/// the declared partition key count.
pub fn resolve_partition_location(
    base_location: &str,
    partition_keys: &[FieldSchema],
    values: &[String],
) -> Result<String> {
    if partition_keys.len() != values.len() {
        return Err(CatalogError::ArityMismatch {
            expected: partition_keys.len(),
            actual: values.len(),
        });
    }

    let mut location = base_location.trim_end_matches('/').to_string();
    for (key, value) in partition_keys.iter().zip(values) {
        location.push('/');
        location.push_str(&key.name);
        location.push('=');
        location.push_str(value);
    }
    location.push('/');
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_month_keys() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("year", "string"),
            FieldSchema::new("month", "string"),
        ]
    }

    #[test]
    fn test_resolve_partition_location() {
        let location = resolve_partition_location(
            "s3://bucket/events/",
            &year_month_keys(),
            &["2024".to_string(), "04".to_string()],
        )
        .unwrap();

        assert_eq!(location, "s3://bucket/events/year=2024/month=04/");
    }

    #[test]
    fn trailing_delimiter_on_base_does_not_matter() {
        let keys = year_month_keys();
        let values = vec!["2024".to_string(), "04".to_string()];

        let with_slash = resolve_partition_location("s3://b/p/", &keys, &values).unwrap();
        let without_slash = resolve_partition_location("s3://b/p", &keys, &values).unwrap();

        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash, "s3://b/p/year=2024/month=04/");
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let err = resolve_partition_location(
            "s3://bucket/events/",
            &year_month_keys(),
            &["2024".to_string()],
        )
        .unwrap_err();

        match err {
            CatalogError::ArityMismatch { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn no_partition_keys_yields_normalized_base() {
        let location = resolve_partition_location("s3://bucket/flat", &[], &[]).unwrap();
        assert_eq!(location, "s3://bucket/flat/");
    }

    #[test]
    fn values_are_not_escaped() {
        let keys = vec![FieldSchema::new("day", "string")];
        let location =
            resolve_partition_location("s3://b/p", &keys, &["01 02".to_string()]).unwrap();
        assert_eq!(location, "s3://b/p/day=01 02/");
    }
}
