use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier for one output dialect or data-access-layer language.
///
/// The set is fixed; whether a backend exists for a given target is the
/// registry's business, not the identifier's.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Tsql,
    MySql,
    Oracle,
    Cpp,
    CSharp,
    Java,
    Python,
    Php,
}

/// Error for unrecognized target identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown target '{0}'")]
pub struct UnknownTarget(pub String);

impl Target {
    /// Every known target, SQL dialects first.
    pub const ALL: [Target; 8] = [
        Target::Tsql,
        Target::MySql,
        Target::Oracle,
        Target::Cpp,
        Target::CSharp,
        Target::Java,
        Target::Python,
        Target::Php,
    ];

    /// Short identifier used in CLI flags and reports.
    pub fn label(self) -> &'static str {
        match self {
            Target::Tsql => "tsql",
            Target::MySql => "mysql",
            Target::Oracle => "oracle",
            Target::Cpp => "cpp",
            Target::CSharp => "csharp",
            Target::Java => "java",
            Target::Python => "python",
            Target::Php => "php",
        }
    }

    /// Whether the target is a SQL dialect rather than a DAL language.
    pub fn is_sql_dialect(self) -> bool {
        matches!(self, Target::Tsql | Target::MySql | Target::Oracle)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .iter()
            .copied()
            .find(|target| target.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownTarget(value.to_string()))
    }
}
