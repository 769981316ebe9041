use serde::Serialize;

/// Role a column plays in the keys of its table
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum KeyType {
    #[default]
    NotKey,
    PrimaryKey,
    UniqueKey,
    ForeignKey,
}

impl KeyType {
    /// Classify the key indicator reported for a column (`PRI`, `UNI`, `MUL` or blank)
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator.trim() {
            "PRI" => Self::PrimaryKey,
            "UNI" => Self::UniqueKey,
            "MUL" => Self::ForeignKey,
            _ => Self::NotKey,
        }
    }
}

/// Generic data type of a field, independent of the database dialect
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    #[default]
    String,
    Long,
    Integer,
    Short,
    Byte,
    Boolean,
    Double,
    Float,
    Date,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    pub column_name: String,
    pub field_name: String,
    pub field_name_first_upper: String,
    pub key_type: KeyType,
    pub field_type: FieldType,
    pub length: Option<u32>,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub comment: String,
}

impl Field {
    pub fn is_date(&self) -> bool {
        self.field_type == FieldType::Date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_indicator() {
        assert_eq!(KeyType::from_indicator(""), KeyType::NotKey);
        assert_eq!(KeyType::from_indicator("  "), KeyType::NotKey);
        assert_eq!(KeyType::from_indicator("PRI"), KeyType::PrimaryKey);
        assert_eq!(KeyType::from_indicator("UNI"), KeyType::UniqueKey);
        assert_eq!(KeyType::from_indicator("MUL"), KeyType::ForeignKey);
        assert_eq!(KeyType::from_indicator("FUL"), KeyType::NotKey);
    }
}
