use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Dialect-agnostic logical type of an attribute.
///
/// Every backend owns a total mapping from these to its native type names;
/// a logical type a backend cannot map is a defect in that backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    Integer,
    BigInt,
    Text,
    Decimal,
    Date,
    DateTime,
    Boolean,
}

impl LogicalType {
    /// Whether attributes of this type must carry a positive `size`.
    pub fn requires_size(self) -> bool {
        matches!(self, LogicalType::Text | LogicalType::Decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::LogicalType;

    #[test]
    fn only_text_and_decimal_require_a_size() {
        assert!(LogicalType::Text.requires_size());
        assert!(LogicalType::Decimal.requires_size());
        assert!(!LogicalType::Integer.requires_size());
        assert!(!LogicalType::BigInt.requires_size());
        assert!(!LogicalType::Date.requires_size());
        assert!(!LogicalType::DateTime.requires_size());
        assert!(!LogicalType::Boolean.requires_size());
    }
}
