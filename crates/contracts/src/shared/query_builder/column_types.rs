//! Column type classification
//!
//! Node schemas report free-form type names (`timestamp without time zone`,
//! `int`, `double precision`, ...). Classification is a case-insensitive
//! substring match.

use super::query_spec::AggregateFunction;

const DATE_TIME_MARKERS: &[&str] = &["date", "time", "timestamp"];

const NUMERIC_MARKERS: &[&str] = &[
    "int", "float", "double", "decimal", "numeric", "real", "bigint", "smallint", "tinyint",
];

/// Coarse kind of a column, derived from its declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    DateTime,
    Numeric,
    Other,
}

impl ColumnKind {
    /// Date/time wins when a type name matches both families
    pub fn classify(data_type: &str) -> Self {
        if is_date_time_type(data_type) {
            ColumnKind::DateTime
        } else if is_numeric_type(data_type) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Other
        }
    }

    /// Aggregate functions a column of this kind accepts
    pub fn allowed_functions(&self) -> &'static [AggregateFunction] {
        match self {
            ColumnKind::DateTime => &[AggregateFunction::Min, AggregateFunction::Max],
            ColumnKind::Numeric => &AggregateFunction::ALL,
            ColumnKind::Other => &[],
        }
    }

    pub fn accepts(&self, function: AggregateFunction) -> bool {
        self.allowed_functions().contains(&function)
    }
}

fn contains_any(data_type: &str, markers: &[&str]) -> bool {
    let lowered = data_type.to_lowercase();
    markers.iter().any(|m| lowered.contains(m))
}

pub fn is_date_time_type(data_type: &str) -> bool {
    contains_any(data_type, DATE_TIME_MARKERS)
}

pub fn is_numeric_type(data_type: &str) -> bool {
    contains_any(data_type, NUMERIC_MARKERS)
}

pub fn is_aggregatable_type(data_type: &str) -> bool {
    is_date_time_type(data_type) || is_numeric_type(data_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_detection() {
        assert!(is_date_time_type("timestamp without time zone"));
        assert!(is_date_time_type("DATE"));
        assert!(is_date_time_type("DateTime"));
        assert!(!is_date_time_type("varchar"));
    }

    #[test]
    fn test_numeric_detection() {
        for t in ["int", "BIGINT", "float8", "double precision", "decimal(10,2)", "real"] {
            assert!(is_numeric_type(t), "{} should be numeric", t);
        }
        assert!(!is_numeric_type("varchar"));
        assert!(!is_numeric_type("text"));
    }

    #[test]
    fn test_aggregatable_is_union() {
        assert!(is_aggregatable_type("timestamp"));
        assert!(is_aggregatable_type("float"));
        assert!(!is_aggregatable_type("char(32)"));
        assert!(!is_aggregatable_type("uuid"));
    }

    #[test]
    fn test_classify_prefers_date_time() {
        assert_eq!(ColumnKind::classify("timestamp"), ColumnKind::DateTime);
        assert_eq!(ColumnKind::classify("int"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::classify("varchar"), ColumnKind::Other);
        assert!(ColumnKind::DateTime.accepts(AggregateFunction::Max));
        assert!(!ColumnKind::DateTime.accepts(AggregateFunction::Avg));
        assert!(!ColumnKind::Other.accepts(AggregateFunction::Count));
    }
}
