use super::*;
use std::collections::BTreeMap;
use thiserror::Error;

/// Literal quoting rules of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MariaDb,
    Postgres,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("unsupported placeholder `%{0}` at byte {1}")]
    UnsupportedPlaceholder(char, usize),
    #[error("unterminated placeholder at byte {0}")]
    UnterminatedPlaceholder(usize),
    #[error("not enough values: template needs more than {0}")]
    NotEnoughValues(usize),
    #[error("{0} values left unused by the template")]
    TooManyValues(usize),
    #[error("no value named `{0}`")]
    MissingNamedValue(String),
    #[error("template mixes positional and named placeholders")]
    MixedPlaceholders,
    #[error("cannot render non finite float {0}")]
    NonFiniteFloat(f64),
}

/// Interpolates `%s` and `%(name)s` placeholders with quoted literals.
///
/// The output is meant for logs. It is never sent to a database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlRenderer {
    dialect: Dialect,
}

enum Values<'v> {
    Positional(std::slice::Iter<'v, SqlValue>),
    Named(&'v BTreeMap<String, SqlValue>),
}

impl SqlRenderer {
    pub fn new(dialect: Dialect) -> Self {
        SqlRenderer { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn render(&self, template: &str, values: &QueryValues) -> Result<String, RenderError> {
        let mut values = match values {
            QueryValues::Empty => return Ok(template.to_owned()),
            QueryValues::Positional(v) => Values::Positional(v.iter()),
            QueryValues::Named(v) => Values::Named(v),
        };

        let mut out = String::with_capacity(template.len());
        let mut used = 0usize;
        let mut chars = template.char_indices();
        while let Some((_, c)) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => out.push('%'),
                Some((_, 's')) => {
                    let Values::Positional(ref mut it) = values else {
                        return Err(RenderError::MixedPlaceholders);
                    };
                    let value = it.next().ok_or(RenderError::NotEnoughValues(used))?;
                    used += 1;
                    self.literal(value, &mut out)?;
                }
                Some((start, '(')) => {
                    let Values::Named(named) = &values else {
                        return Err(RenderError::MixedPlaceholders);
                    };
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ')')) => break,
                            Some((_, ch)) => name.push(ch),
                            None => return Err(RenderError::UnterminatedPlaceholder(start - 1)),
                        }
                    }
                    match chars.next() {
                        Some((_, 's')) => {}
                        Some((at, ch)) => return Err(RenderError::UnsupportedPlaceholder(ch, at)),
                        None => return Err(RenderError::UnterminatedPlaceholder(start - 1)),
                    }
                    let value = named
                        .get(&name)
                        .ok_or_else(|| RenderError::MissingNamedValue(name.clone()))?;
                    self.literal(value, &mut out)?;
                }
                Some((at, ch)) => return Err(RenderError::UnsupportedPlaceholder(ch, at)),
                None => return Err(RenderError::UnterminatedPlaceholder(template.len() - 1)),
            }
        }

        if let Values::Positional(it) = values {
            let left = it.len();
            if left > 0 {
                return Err(RenderError::TooManyValues(left));
            }
        }
        tracing::debug!(dialect = ?self.dialect, "rendered query for display");
        Ok(out)
    }

    fn literal(&self, value: &SqlValue, out: &mut String) -> Result<(), RenderError> {
        match value {
            SqlValue::Null => out.push_str("NULL"),
            SqlValue::Bool(b) => out.push_str(match (self.dialect, *b) {
                (Dialect::MariaDb, true) => "1",
                (Dialect::MariaDb, false) => "0",
                (Dialect::Postgres, true) => "true",
                (Dialect::Postgres, false) => "false",
            }),
            SqlValue::Int(i) => out.push_str(&i.to_string()),
            SqlValue::Float(f) if !f.is_finite() => return Err(RenderError::NonFiniteFloat(*f)),
            SqlValue::Float(f) => out.push_str(&format!("{f:?}")),
            SqlValue::Text(s) => self.quote(s, out),
            SqlValue::List(items) => {
                let sep = match self.dialect {
                    Dialect::MariaDb => ",",
                    Dialect::Postgres => ", ",
                };
                out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(sep);
                    }
                    self.literal(item, out)?;
                }
                out.push(')');
            }
        }
        Ok(())
    }

    fn quote(&self, s: &str, out: &mut String) {
        out.push('\'');
        for c in s.chars() {
            match (self.dialect, c) {
                (Dialect::MariaDb, '\0') => out.push_str("\\0"),
                (Dialect::MariaDb, '\n') => out.push_str("\\n"),
                (Dialect::MariaDb, '\r') => out.push_str("\\r"),
                (Dialect::MariaDb, '\x1a') => out.push_str("\\Z"),
                (Dialect::MariaDb, '\'' | '"' | '\\') => {
                    out.push('\\');
                    out.push(c);
                }
                (Dialect::Postgres, '\'') => out.push_str("''"),
                _ => out.push(c),
            }
        }
        out.push('\'');
    }
}

impl Renderer for SqlRenderer {
    type Error = RenderError;

    fn render(&self, template: &str, values: &QueryValues) -> Result<String, RenderError> {
        SqlRenderer::render(self, template, values)
    }
}
