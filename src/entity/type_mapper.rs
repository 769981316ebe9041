use crate::FieldType;

/// Maximum length of a MySQL `TEXT` column
pub const TEXT_LENGTH: u32 = 65535;

/// Map a native column type, as reported by `information_schema.columns.column_type`,
/// to a generic [`FieldType`] and an optional display length.
///
/// Rules are tried in order and the first match wins. Types that match no rule
/// fall back to `String` with no length.
pub fn map_type(native: &str) -> (FieldType, Option<u32>) {
    if native.contains("varchar") {
        (FieldType::String, parse_length(native))
    } else if native.contains("text") {
        (FieldType::String, Some(TEXT_LENGTH))
    } else if native == "bigint" || native.contains("bigint(20)") {
        (FieldType::Long, None)
    } else if native == "int" || native.contains("int(11)") {
        (FieldType::Integer, None)
    } else if native.contains("smallint(6)") {
        (FieldType::Short, None)
    } else if native.contains("tinyint(4)") {
        (FieldType::Byte, None)
    } else if native.contains("tinyint(1)") {
        (FieldType::Boolean, None)
    } else if native.contains("double") || native.contains("decimal") {
        (FieldType::Double, None)
    } else if native.contains("float") {
        (FieldType::Float, None)
    } else if native == "datetime" || native.contains("timestamp") {
        (FieldType::Date, Some(19))
    } else if native == "date" {
        (FieldType::Date, Some(10))
    } else if native == "time" {
        (FieldType::Date, Some(8))
    } else {
        (FieldType::String, None)
    }
}

fn parse_length(native: &str) -> Option<u32> {
    let start = native.find('(')? + 1;
    let end = start + native[start..].find(')')?;
    native[start..end].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_type() {
        let cases = [
            ("varchar(255)", FieldType::String, Some(255)),
            ("varchar(32)", FieldType::String, Some(32)),
            ("longtext", FieldType::String, Some(TEXT_LENGTH)),
            ("bigint(20)", FieldType::Long, None),
            ("bigint", FieldType::Long, None),
            ("bigint(20) unsigned", FieldType::Long, None),
            ("int", FieldType::Integer, None),
            ("int(11)", FieldType::Integer, None),
            ("smallint(6)", FieldType::Short, None),
            ("tinyint(4)", FieldType::Byte, None),
            ("tinyint(1)", FieldType::Boolean, None),
            ("double", FieldType::Double, None),
            ("decimal(10,2)", FieldType::Double, None),
            ("float", FieldType::Float, None),
            ("datetime", FieldType::Date, Some(19)),
            ("timestamp", FieldType::Date, Some(19)),
            ("date", FieldType::Date, Some(10)),
            ("time", FieldType::Date, Some(8)),
            ("geometry", FieldType::String, None),
        ];
        for (native, field_type, length) in cases {
            assert_eq!(map_type(native), (field_type, length), "{native}");
        }
    }

    #[test]
    fn test_rule_order() {
        // `int unsigned` is neither exactly `int` nor `int(11)`
        assert_eq!(map_type("int unsigned"), (FieldType::String, None));
        assert_eq!(map_type("mediumint(9)"), (FieldType::String, None));
        // Only plain `bigint` and `bigint(20)` are Long, other widths fall through
        assert_eq!(map_type("bigint(11)"), (FieldType::Integer, None));
        assert_eq!(map_type("bigint unsigned"), (FieldType::String, None));
        // Fractional-second precision is not a plain `datetime`
        assert_eq!(map_type("datetime(6)"), (FieldType::String, None));
        assert_eq!(map_type("timestamp(3)"), (FieldType::Date, Some(19)));
    }

    #[test]
    fn test_unparsable_varchar_length() {
        assert_eq!(map_type("varchar"), (FieldType::String, None));
        assert_eq!(map_type("varchar(abc)"), (FieldType::String, None));
    }
}
