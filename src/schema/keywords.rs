//! Validation keywords allowed per JSON type and schema version
//!
//! The table is plain data: adding a schema version means adding rows, not
//! code paths. Every type also accepts the `common` keywords of its version.

use crate::error::{Error, Result};
use crate::types::{JsonType, SchemaVersion};

/// Kind of argument a validation keyword takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Any JSON number
    Number,
    /// Non-negative integer
    Count,
    /// true/false
    Boolean,
    /// String
    Text,
    /// Array of strings
    TextList,
    /// Array of arbitrary values
    List,
    /// Schema object
    Schema,
    /// Schema object or boolean
    SchemaOrBool,
    /// Any JSON value
    Any,
}

/// A validation keyword and the argument it expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    /// Keyword name as written in the schema
    pub name: &'static str,
    /// Expected argument kind
    pub arg: ArgKind,
}

const fn kw(name: &'static str, arg: ArgKind) -> Keyword {
    Keyword { name, arg }
}

/// Rows of the keyword table
struct Row {
    /// `None` marks the common row applied to every type
    json_type: Option<JsonType>,
    version: SchemaVersion,
    keywords: &'static [Keyword],
}

const NUMERIC_DRAFT04: &[Keyword] = &[
    kw("multipleOf", ArgKind::Number),
    kw("maximum", ArgKind::Number),
    kw("exclusiveMaximum", ArgKind::Boolean),
    kw("minimum", ArgKind::Number),
    kw("exclusiveMinimum", ArgKind::Boolean),
];

static KEYWORD_TABLE: &[Row] = &[
    Row {
        json_type: None,
        version: SchemaVersion::Draft04,
        keywords: &[
            kw("title", ArgKind::Text),
            kw("description", ArgKind::Text),
            kw("default", ArgKind::Any),
            kw("example", ArgKind::Any),
            kw("enum", ArgKind::List),
            kw("allOf", ArgKind::List),
            kw("anyOf", ArgKind::List),
            kw("oneOf", ArgKind::List),
            kw("not", ArgKind::Schema),
            kw("definitions", ArgKind::Schema),
        ],
    },
    Row {
        json_type: Some(JsonType::Integer),
        version: SchemaVersion::Draft04,
        keywords: NUMERIC_DRAFT04,
    },
    Row {
        json_type: Some(JsonType::Number),
        version: SchemaVersion::Draft04,
        keywords: NUMERIC_DRAFT04,
    },
    Row {
        json_type: Some(JsonType::String),
        version: SchemaVersion::Draft04,
        keywords: &[
            kw("maxLength", ArgKind::Count),
            kw("minLength", ArgKind::Count),
            kw("pattern", ArgKind::Text),
            kw("format", ArgKind::Text),
        ],
    },
    Row {
        json_type: Some(JsonType::Array),
        version: SchemaVersion::Draft04,
        keywords: &[
            kw("items", ArgKind::Any),
            kw("additionalItems", ArgKind::SchemaOrBool),
            kw("maxItems", ArgKind::Count),
            kw("minItems", ArgKind::Count),
            kw("uniqueItems", ArgKind::Boolean),
        ],
    },
    Row {
        json_type: Some(JsonType::Object),
        version: SchemaVersion::Draft04,
        keywords: &[
            kw("maxProperties", ArgKind::Count),
            kw("minProperties", ArgKind::Count),
            kw("required", ArgKind::TextList),
            kw("additionalProperties", ArgKind::SchemaOrBool),
            kw("properties", ArgKind::Schema),
            kw("patternProperties", ArgKind::Schema),
            kw("dependencies", ArgKind::Schema),
        ],
    },
    Row {
        json_type: Some(JsonType::Boolean),
        version: SchemaVersion::Draft04,
        keywords: &[],
    },
    Row {
        json_type: Some(JsonType::Null),
        version: SchemaVersion::Draft04,
        keywords: &[],
    },
];

/// All keywords allowed for a type under a schema version, common ones first
pub fn allowed_keywords(
    json_type: JsonType,
    version: SchemaVersion,
) -> impl Iterator<Item = &'static Keyword> {
    KEYWORD_TABLE
        .iter()
        .filter(move |row| {
            row.version == version && (row.json_type.is_none() || row.json_type == Some(json_type))
        })
        .flat_map(|row| row.keywords.iter())
}

/// Look up a keyword, failing if it is not allowed for the type
pub fn lookup_keyword(
    json_type: JsonType,
    version: SchemaVersion,
    name: &str,
) -> Result<&'static Keyword> {
    allowed_keywords(json_type, version)
        .find(|keyword| keyword.name == name)
        .ok_or_else(|| Error::UnknownValidationKeyword {
            keyword: name.to_string(),
            json_type: json_type.to_string(),
            version: version.to_string(),
        })
}
