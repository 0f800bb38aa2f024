use super::*;
use std::fmt;

/// Prefix every document table name carries.
pub const TABLE_PREFIX: &str = "tab";

/// Stand in for datetimes that are missing in sortable columns.
pub const FALLBACK_DATETIME_STR: &str = "0001-01-01 00:00:00.000000";

/// Whether the first keyword of `query` starts with one of `keywords`.
///
/// Both sides are compared case insensitively. A blank query matches nothing.
pub fn is_query_type<'k>(query: &str, keywords: impl IntoIterator<Item = &'k str>) -> bool {
    let Some(first) = query.split_whitespace().next() else {
        return false;
    };
    let first = first.to_lowercase();
    keywords
        .into_iter()
        .any(|keyword| first.starts_with(&keyword.to_lowercase()))
}

/// The document type a table stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocType {
    name: String,
}

impl DocType {
    pub fn new(name: impl Into<String>) -> Self {
        DocType { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> String {
        format!("{TABLE_PREFIX}{}", self.name)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{TABLE_PREFIX}{}`", self.name)
    }
}

/// Extracts the document type from a quoted table reference such as
/// `` `tabToDo`.`name` `` or `` `tabToDo` ``.
///
/// The text after the first backtick is cut at the first dot, the
/// [`TABLE_PREFIX`] is stripped and leftover backticks are removed.
pub fn table_from_string(table: &str) -> Result<DocType, LazyError> {
    let malformed = |reason| LazyError::MalformedTable {
        table: table.to_owned(),
        reason,
    };

    let (_, quoted) = table
        .split_once('`')
        .ok_or_else(|| malformed("no backtick quoted identifier"))?;
    let segment = quoted.split('.').next().unwrap_or(quoted);
    let name = segment
        .strip_prefix(TABLE_PREFIX)
        .ok_or_else(|| malformed("table name does not start with the table prefix"))?;
    let name = name.replace('`', "");
    if name.is_empty() {
        return Err(malformed("empty table name"));
    }
    Ok(DocType::new(name))
}
