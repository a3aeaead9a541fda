#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported programming language.
///
/// This is the single registry used for request validation, starter
/// templates, and execution-engine ids. It must stay in sync with whatever
/// frontend consumes the API, so everything about a language lives here.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in
/// SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "c"))]
    C,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cpp"))]
    Cpp,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "python"))]
    Python,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "java"))]
    Java,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "javascript"))]
    JavaScript,
}

impl Language {
    /// All supported languages.
    pub const ALL: &'static [Language] = &[
        Self::C,
        Self::Cpp,
        Self::Python,
        Self::Java,
        Self::JavaScript,
    ];

    /// Wire/identifier form (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Python => "python",
            Self::Java => "java",
            Self::JavaScript => "javascript",
        }
    }

    /// Human-readable name, as used in prompts and UIs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
        }
    }

    /// Numeric execution-engine id recorded on each submission.
    pub fn engine_id(&self) -> i32 {
        match self {
            Self::C => 50,
            Self::Cpp => 54,
            Self::Python => 71,
            Self::Java => 62,
            Self::JavaScript => 63,
        }
    }

    /// Default starter snippet shown in a fresh editor.
    pub fn template(&self) -> &'static str {
        match self {
            Self::C => {
                r#"#include <stdio.h>

int main() {
    printf("Hello, World!\n");
    return 0;
}"#
            }
            Self::Cpp => {
                r#"#include <iostream>
using namespace std;

int main() {
    cout << "Hello, World!" << endl;
    return 0;
}"#
            }
            Self::Python => r#"print("Hello, World!")"#,
            Self::Java => {
                r#"public class Main {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}"#
            }
            Self::JavaScript => r#"console.log("Hello, World!");"#,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unsupported language identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError {
    invalid: String,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid language '{}'. Supported: {}",
            self.invalid,
            Language::ALL
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(Self::C),
            "cpp" => Ok(Self::Cpp),
            "python" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "javascript" => Ok(Self::JavaScript),
            _ => Err(ParseLanguageError {
                invalid: s.to_string(),
            }),
        }
    }
}
