//! Column type model
//!
//! Catalog columns carry Hive-style type strings such as `int`,
//! `decimal(10,2)`, `array<struct<a:int,b:string>>` or `map<string,int>`.
//! [`ColumnType`] is the parsed form used to answer nested field lookups.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeParseError;

/// Wildcard type accepted wherever any type is acceptable
pub const ANY_TYPE: &str = "T";

/// Deepest `array`/`map`/`struct` nesting accepted in a type string
const MAX_TYPE_DEPTH: usize = 64;

/// Internal representation of a column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Scalar type, lower-cased, including any parameters (e.g. `varchar(20)`)
    Primitive(String),
    Array(Box<ColumnType>),
    Map {
        key: Box<ColumnType>,
        value: Box<ColumnType>,
    },
    Struct(Vec<StructField>),
}

/// Named member of a struct type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub data_type: ColumnType,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl ColumnType {
    pub fn primitive(name: impl Into<String>) -> Self {
        ColumnType::Primitive(name.into().to_lowercase())
    }

    /// Parse a type string like `map<string,array<int>>`
    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let mut parser = TypeParser {
            input,
            pos: 0,
            depth: 0,
        };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }

    /// Short kind name: `array`, `map`, `struct`, or the scalar base name
    pub fn kind_name(&self) -> &str {
        match self {
            ColumnType::Primitive(name) => base_name(name),
            ColumnType::Array(_) => "array",
            ColumnType::Map { .. } => "map",
            ColumnType::Struct(_) => "struct",
        }
    }

    /// Full type string, e.g. `array<struct<a:int>>`
    pub fn display_name(&self) -> String {
        match self {
            ColumnType::Primitive(name) => name.clone(),
            ColumnType::Array(item) => format!("array<{}>", item.display_name()),
            ColumnType::Map { key, value } => {
                format!("map<{},{}>", key.display_name(), value.display_name())
            }
            ColumnType::Struct(fields) => {
                let members = fields
                    .iter()
                    .map(|f| format!("{}:{}", f.name, f.data_type.display_name()))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("struct<{members}>")
            }
        }
    }

    pub fn is_complex(&self) -> bool {
        !matches!(self, ColumnType::Primitive(_))
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_name())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ColumnType::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Base name of a type string without parameters or type arguments
fn base_name(type_name: &str) -> &str {
    let end = type_name
        .find(|c: char| c == '(' || c == '<')
        .unwrap_or(type_name.len());
    type_name[..end].trim()
}

/// Normalize a type name for compatibility checks: `decimal(10,2)` → `DECIMAL`,
/// `array<int>` → `ARRAY`
pub fn normalize_type_name(type_name: &str) -> String {
    base_name(type_name).to_uppercase()
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> TypeParser<'a> {
    fn error(&self, reason: &str) -> TypeParseError {
        TypeParseError {
            input: self.input.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{expected}'")))
        }
    }

    fn read_word(&mut self) -> &'a str {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn parse_type(&mut self) -> Result<ColumnType, TypeParseError> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(self.error("type nested too deeply"));
        }
        self.depth += 1;
        let parsed = self.parse_type_name();
        self.depth -= 1;
        parsed
    }

    fn parse_type_name(&mut self) -> Result<ColumnType, TypeParseError> {
        let word = self.read_word();
        if word.is_empty() {
            return Err(self.error("expected type name"));
        }

        match word.to_lowercase().as_str() {
            "array" => {
                self.expect('<')?;
                let item = self.parse_type()?;
                self.expect('>')?;
                Ok(ColumnType::Array(Box::new(item)))
            }
            "map" => {
                self.expect('<')?;
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                self.expect('>')?;
                Ok(ColumnType::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            "struct" => {
                self.expect('<')?;
                let mut fields = Vec::new();
                if self.eat('>') {
                    return Ok(ColumnType::Struct(fields));
                }
                loop {
                    let name = self.read_word();
                    if name.is_empty() {
                        return Err(self.error("expected field name"));
                    }
                    self.expect(':')?;
                    let data_type = self.parse_type()?;
                    fields.push(StructField::new(name, data_type));
                    if self.eat(',') {
                        continue;
                    }
                    self.expect('>')?;
                    break;
                }
                Ok(ColumnType::Struct(fields))
            }
            scalar => {
                let mut name = scalar.to_string();
                if self.eat('(') {
                    let start = self.pos;
                    let Some(offset) = self.input[start..].find(')') else {
                        return Err(self.error("unclosed type parameters"));
                    };
                    let params: String = self.input[start..start + offset]
                        .chars()
                        .filter(|c| !c.is_whitespace())
                        .collect();
                    self.pos = start + offset + 1;
                    name = format!("{name}({params})");
                }
                Ok(ColumnType::Primitive(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_types() {
        assert_eq!(ColumnType::parse("INT").unwrap(), ColumnType::primitive("int"));
        assert_eq!(
            ColumnType::parse("decimal(10, 2)").unwrap(),
            ColumnType::primitive("decimal(10,2)")
        );
        assert_eq!(ColumnType::parse("decimal(10,2)").unwrap().kind_name(), "decimal");
    }

    #[test]
    fn test_parse_nested_types() {
        let parsed = ColumnType::parse("array<struct<a:int, b:map<string,bigint>>>").unwrap();
        let ColumnType::Array(item) = &parsed else {
            panic!("expected array, got {parsed:?}");
        };
        let ColumnType::Struct(fields) = item.as_ref() else {
            panic!("expected struct item, got {item:?}");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "a");
        assert_eq!(fields[1].data_type.kind_name(), "map");
        assert_eq!(
            parsed.display_name(),
            "array<struct<a:int,b:map<string,bigint>>>"
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = ColumnType::parse("map<string>").unwrap_err();
        assert!(err.reason.contains("','"));
        assert!(ColumnType::parse("array<int").is_err());
        assert!(ColumnType::parse("int extra").is_err());
        assert!(ColumnType::parse("").is_err());
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |levels: usize| format!("{}int{}", "array<".repeat(levels), ">".repeat(levels));

        let parsed = ColumnType::parse(&nested(MAX_TYPE_DEPTH - 1)).unwrap();
        assert_eq!(parsed.kind_name(), "array");

        let err = ColumnType::parse(&nested(10_000)).unwrap_err();
        assert_eq!(err.reason, "type nested too deeply");
    }

    #[test]
    fn test_normalize_type_name() {
        assert_eq!(normalize_type_name("decimal(10,2)"), "DECIMAL");
        assert_eq!(normalize_type_name("array<int>"), "ARRAY");
        assert_eq!(normalize_type_name("string"), "STRING");
    }
}
