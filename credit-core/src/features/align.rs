//! Inference alignment
//!
//! Maps arbitrary submitted fields onto the exact training schema:
//! every value is coerced to `f64`, raw categorical fields are consumed,
//! missing columns are filled with 0, unknown fields are dropped and the
//! result is ordered like the schema.

use ndarray::Array1;

use super::layout::ColumnSchema;
use crate::error::PredictError;

/// Numeric form fields in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, f64)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. Keeps the first value when the name repeats.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.fields.push((name, value));
        true
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        let pos = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

/// A row whose names equal the schema, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.values.clone())
    }

    /// NaN or infinite values cannot be scaled.
    pub fn ensure_finite(&self) -> Result<(), PredictError> {
        match self.names.iter().zip(&self.values).find(|(_, v)| !v.is_finite()) {
            Some((name, _)) => Err(PredictError::InferenceFailure(format!(
                "input contains NaN or infinity (column '{}')",
                name
            ))),
            None => Ok(()),
        }
    }
}

/// Outcome of [`align`]
#[derive(Debug, Clone)]
pub struct Alignment {
    pub row: FeatureRow,
    /// Schema columns that were absent and filled with 0
    pub filled: Vec<String>,
    /// Submitted fields that are not part of the schema
    pub dropped: Vec<String>,
}

/// Parse every submitted value as a float.
///
/// Surrounding whitespace is ignored. The first occurrence of a repeated
/// name wins. No range checks are applied.
pub fn coerce<K, V>(fields: &[(K, V)]) -> Result<RawRow, PredictError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut row = RawRow::new();

    for (name, raw) in fields {
        let (name, raw) = (name.as_ref(), raw.as_ref());
        if row.contains(name) {
            continue;
        }

        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| PredictError::InvalidInput {
                field: name.to_string(),
                value: raw.to_string(),
            })?;

        row.insert(name, value);
    }

    Ok(row)
}

/// Single-row one-hot encoding with the first category dropped.
///
/// A one-row frame has exactly one observed category per field and that
/// category is the dropped baseline, so each raw categorical field is
/// consumed without emitting indicator columns. Already-expanded dummy
/// fields (`SEX_2`, ...) are untouched. Returns the consumed names.
pub fn encode_categoricals<S: AsRef<str>>(row: &mut RawRow, categorical: &[S]) -> Vec<String> {
    let mut consumed = Vec::new();

    for field in categorical {
        let field = field.as_ref();
        if row.remove(field).is_some() {
            consumed.push(field.to_string());
        }
    }

    consumed
}

/// Fill missing columns with 0, drop unknown fields, reorder to the schema.
pub fn align(row: &RawRow, schema: &ColumnSchema) -> Alignment {
    let mut values = Vec::with_capacity(schema.len());
    let mut filled = Vec::new();

    for name in schema.names() {
        match row.get(name) {
            Some(v) => values.push(v),
            None => {
                values.push(0.0);
                filled.push(name.clone());
            }
        }
    }

    let dropped = row
        .iter()
        .filter(|(name, _)| !schema.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    Alignment {
        row: FeatureRow {
            names: schema.names().to_vec(),
            values,
        },
        filled,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> ColumnSchema {
        ColumnSchema::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_coerce_numbers() {
        let row = coerce(&form(&[("AGE", "30"), ("LIMIT_BAL", "20000.5")])).unwrap();
        assert_eq!(row.get("AGE"), Some(30.0));
        assert_eq!(row.get("LIMIT_BAL"), Some(20000.5));
    }

    #[test]
    fn test_coerce_trims_whitespace() {
        let row = coerce(&form(&[("AGE", " 41 ")])).unwrap();
        assert_eq!(row.get("AGE"), Some(41.0));
    }

    #[test]
    fn test_coerce_rejects_text() {
        let err = coerce(&form(&[("AGE", "30"), ("LIMIT_BAL", "abc")])).unwrap_err();
        assert_eq!(
            err,
            PredictError::InvalidInput {
                field: "LIMIT_BAL".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_coerce_rejects_empty() {
        assert!(coerce(&form(&[("AGE", "")])).is_err());
    }

    #[test]
    fn test_coerce_is_permissive_about_ranges() {
        let row = coerce(&form(&[("AGE", "-5")])).unwrap();
        assert_eq!(row.get("AGE"), Some(-5.0));
    }

    #[test]
    fn test_coerce_first_duplicate_wins() {
        let row = coerce(&form(&[("AGE", "30"), ("AGE", "99")])).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("AGE"), Some(30.0));
    }

    #[test]
    fn test_encode_consumes_raw_categoricals() {
        let mut row = coerce(&form(&[("SEX", "2"), ("SEX_2", "1"), ("AGE", "30")])).unwrap();
        let consumed = encode_categoricals(&mut row, &["SEX", "EDUCATION", "MARRIAGE"]);

        assert_eq!(consumed, vec!["SEX"]);
        assert!(!row.contains("SEX"));
        assert_eq!(row.get("SEX_2"), Some(1.0));
        assert_eq!(row.get("AGE"), Some(30.0));
    }

    #[test]
    fn test_align_fills_and_orders() {
        let row = coerce(&form(&[("LIMIT_BAL", "20000"), ("AGE", "30")])).unwrap();
        let aligned = align(&row, &schema(&["AGE", "LIMIT_BAL", "SEX_2"]));

        assert_eq!(aligned.row.names(), &["AGE", "LIMIT_BAL", "SEX_2"]);
        assert_eq!(aligned.row.values(), &[30.0, 20000.0, 0.0]);
        assert_eq!(aligned.filled, vec!["SEX_2"]);
        assert!(aligned.dropped.is_empty());
    }

    #[test]
    fn test_align_drops_unknown_fields() {
        let row = coerce(&form(&[("AGE", "30"), ("FAVOURITE_COLOR", "7")])).unwrap();
        let aligned = align(&row, &schema(&["AGE"]));

        assert_eq!(aligned.row.values(), &[30.0]);
        assert_eq!(aligned.dropped, vec!["FAVOURITE_COLOR"]);
    }

    #[test]
    fn test_align_empty_input_is_all_zero() {
        let aligned = align(&RawRow::new(), &schema(&["AGE", "LIMIT_BAL"]));
        assert_eq!(aligned.row.values(), &[0.0, 0.0]);
        assert_eq!(aligned.filled.len(), 2);
    }

    #[test]
    fn test_ensure_finite() {
        let row = coerce(&form(&[("AGE", "inf")])).unwrap();
        let aligned = align(&row, &schema(&["AGE"]));
        assert!(matches!(
            aligned.row.ensure_finite(),
            Err(PredictError::InferenceFailure(_))
        ));
    }
}
