//! Positional parameter buffer.

use jiff::Timestamp;

/// A value bound to a positional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlValue {
    /// A 32-bit integer (`INTEGER`).
    Integer(i32),
    /// A 64-bit integer (`BIGINT`).
    BigInt(i64),
    /// A point in time (`TIMESTAMPTZ`).
    Timestamp(Timestamp),
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::BigInt(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<Timestamp> for SqlValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

/// Collects bound values while a query renders.
///
/// Placeholders are numbered here and nowhere else: every fragment that
/// needs a value pushes it and writes the returned placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<SqlValue>,
}

impl Params {
    /// Creates an empty buffer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value and returns its placeholder (`$1`, `$2`, ...).
    pub fn push(&mut self, value: impl Into<SqlValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    /// Returns the bound values in placeholder order.
    #[inline]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Returns the number of bound values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no value is bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rendered SQL text with its bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text with `$n` placeholders.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub params: Params,
}

impl Statement {
    /// Returns the bound values in placeholder order.
    #[inline]
    pub fn values(&self) -> &[SqlValue] {
        self.params.values()
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)?;
        if !self.params.is_empty() {
            f.write_str(" -- [")?;
            for (i, value) in self.params.values().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_sequential() {
        let mut params = Params::new();
        assert_eq!(params.push(100), "$1");
        assert_eq!(params.push(7_i64), "$2");
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.values(),
            &[SqlValue::Integer(100), SqlValue::BigInt(7)]
        );
    }

    #[test]
    fn statement_display_lists_values() {
        let mut params = Params::new();
        let placeholder = params.push(42);
        let statement = Statement {
            sql: format!("SELECT {placeholder}"),
            params,
        };
        assert_eq!(statement.to_string(), "SELECT $1 -- [42]");
    }
}
