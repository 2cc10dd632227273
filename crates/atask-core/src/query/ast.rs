//! Abstract Syntax Tree (AST) for query expressions.

use std::fmt;

use super::fields::Field;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `:` - match (equality, or a sentinel predicate).
    Colon,
    /// `=` - equality.
    Eq,
    /// `!=` - inequality.
    NotEq,
    /// `>` - greater than (integer fields only).
    Gt,
    /// `<` - less than (integer fields only).
    Lt,
}

impl Operator {
    /// Returns the operator's source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Colon => ":",
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    /// Returns true for `:` and `=`.
    pub fn is_equality(self) -> bool {
        matches!(self, Operator::Colon | Operator::Eq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `field operator value` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Field name as written in the query.
    pub field: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Literal value as written in the query.
    pub value: String,
}

impl Comparison {
    /// Creates a comparison.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Resolves the field name, or `None` if the evaluator does not know it.
    pub fn resolve_field(&self) -> Option<Field> {
        Field::from_name(&self.field)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)
    }
}

/// Represents a parsed query expression.
///
/// A query is either a [`Comparison`] leaf or a boolean combination of
/// sub-queries. The tree is immutable once built and can be evaluated against
/// any number of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A field comparison.
    Comparison(Comparison),

    /// Logical AND of two queries.
    And(Box<Query>, Box<Query>),

    /// Logical OR of two queries.
    Or(Box<Query>, Box<Query>),

    /// Logical NOT of a query.
    Not(Box<Query>),
}

impl Query {
    /// Creates a comparison query.
    ///
    /// # Example
    ///
    /// ```
    /// use atask_core_rs::query::{Operator, Query};
    ///
    /// let query = Query::compare("status", Operator::Colon, "open");
    /// assert_eq!(query.to_string(), "status:open");
    /// ```
    pub fn compare(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Query::Comparison(Comparison::new(field, operator, value))
    }

    /// Creates an AND query from two queries.
    pub fn and(left: Query, right: Query) -> Self {
        Query::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR query from two queries.
    pub fn or(left: Query, right: Query) -> Self {
        Query::Or(Box::new(left), Box::new(right))
    }

    /// Creates a NOT query from another query.
    pub fn negate(inner: Query) -> Self {
        Query::Not(Box::new(inner))
    }

    /// Returns the comparisons in this query, left to right.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Query::Comparison(comparison) => out.push(comparison),
            Query::And(left, right) | Query::Or(left, right) => {
                left.collect_comparisons(out);
                right.collect_comparisons(out);
            }
            Query::Not(inner) => inner.collect_comparisons(out),
        }
    }

    /// Returns the field names that the evaluator does not recognize.
    ///
    /// Comparisons on these fields always evaluate to false.
    pub fn unknown_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for comparison in self.comparisons() {
            if comparison.resolve_field().is_none() && !fields.contains(&comparison.field.as_str())
            {
                fields.push(&comparison.field);
            }
        }
        fields
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Comparison(comparison) => write!(f, "{comparison}"),
            Query::And(left, right) => write!(f, "({left} AND {right})"),
            Query::Or(left, right) => write!(f, "({left} OR {right})"),
            Query::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}
