use crate::spreadsheet::CellValue;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

/// One table row keyed by column name.
///
/// Fields keep the order in which their names were first inserted, which is the
/// source column order. Inserting a column that is already present overwrites
/// the value in place, so when a source repeats a header name the last field
/// with that name wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn insert(&mut self, column: String, value: CellValue) {
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks if every field is empty (true for a record without fields).
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    /// Fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(column, value)| (column.as_str(), value))
    }
}

impl Serialize for Record {
    /// Serializes as a JSON object whose keys follow the column order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column.into(), value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_insert_wins() {
        let record: Record = [
            ("k", CellValue::from_text("first")),
            ("other", CellValue::Empty),
            ("k", CellValue::from_text("second")),
        ]
        .into_iter()
        .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("k"), Some(&CellValue::from_text("second")));
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["k", "other"]);
    }

    #[test]
    fn serializes_in_column_order() {
        let record: Record = [("zeta", CellValue::from_text("1")), ("alpha", CellValue::from_text("2"))]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn blank_detection() {
        let blank: Record = [("a", CellValue::Empty), ("b", CellValue::Empty)].into_iter().collect();
        assert!(blank.is_blank());
        assert!(Record::new().is_blank());

        let zero: Record = [("a", CellValue::Number(0.0))].into_iter().collect();
        assert!(!zero.is_blank());
    }
}
