//! Typed SELECT query specification.
//!
//! A [`SelectQuery`] records the parts of a read query (columns, source
//! table, joins, predicates, grouping, ordering, limit) together with its
//! named parameters. Conditions reference parameters as `:name`;
//! [`SelectQuery::build`] renders the statement and rewrites the names to
//! PostgreSQL's positional `$n` placeholders, returning the values in bind
//! order.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use storefront_core::error::CoreError;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// A value bound to a named query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Int(i64),
    Text(String),
}

impl From<i64> for QueryParam {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for QueryParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ---------------------------------------------------------------------------
// Query parts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum SelectExpr {
    Column(String),
    SubQuery { query: Box<SelectQuery>, alias: String },
}

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Join {
    kind: JoinKind,
    table: String,
    alias: String,
    condition: String,
}

// ---------------------------------------------------------------------------
// SelectQuery
// ---------------------------------------------------------------------------

/// Description of a single SELECT statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    select: Vec<SelectExpr>,
    from: Option<(String, String)>,
    joins: Vec<Join>,
    predicates: Vec<String>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u64>,
    params: BTreeMap<String, QueryParam>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a select expression, e.g. `"image.media_id"` or `"x.id AS x_id"`.
    pub fn select(&mut self, expr: impl Into<String>) -> &mut Self {
        self.select.push(SelectExpr::Column(expr.into()));
        self
    }

    /// Add several select expressions at once.
    pub fn select_all<I, S>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select
            .extend(exprs.into_iter().map(|e| SelectExpr::Column(e.into())));
        self
    }

    /// Add a scalar sub-select as a column.
    ///
    /// The sub-select keeps its own parameters; they share this query's
    /// namespace when built, and a name bound to two different values is
    /// rejected by [`SelectQuery::build`].
    pub fn select_sub_query(&mut self, query: SelectQuery, alias: impl Into<String>) -> &mut Self {
        self.select.push(SelectExpr::SubQuery {
            query: Box::new(query),
            alias: alias.into(),
        });
        self
    }

    pub fn from(&mut self, table: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.from = Some((table.into(), alias.into()));
        self
    }

    pub fn inner_join(
        &mut self,
        table: impl Into<String>,
        alias: impl Into<String>,
        condition: impl Into<String>,
    ) -> &mut Self {
        self.join(JoinKind::Inner, table, alias, condition)
    }

    pub fn left_join(
        &mut self,
        table: impl Into<String>,
        alias: impl Into<String>,
        condition: impl Into<String>,
    ) -> &mut Self {
        self.join(JoinKind::Left, table, alias, condition)
    }

    fn join(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        alias: impl Into<String>,
        condition: impl Into<String>,
    ) -> &mut Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            alias: alias.into(),
            condition: condition.into(),
        });
        self
    }

    /// Add a predicate; all predicates are combined with `AND`.
    pub fn and_where(&mut self, condition: impl Into<String>) -> &mut Self {
        self.predicates.push(condition.into());
        self
    }

    pub fn group_by(&mut self, expr: impl Into<String>) -> &mut Self {
        self.group_by.push(expr.into());
        self
    }

    /// Add a sort key, e.g. `"image.position"` or `"image.position DESC"`.
    pub fn order_by(&mut self, expr: impl Into<String>) -> &mut Self {
        self.order_by.push(expr.into());
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Bind a value to the `:name` placeholder. Re-binding replaces the value.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<QueryParam>) -> &mut Self {
        self.params
            .insert(name.trim_start_matches(':').to_string(), value.into());
        self
    }

    /// Render the statement with named placeholders left in place.
    pub fn to_sql(&self) -> Result<String, CoreError> {
        let Some((table, alias)) = &self.from else {
            return Err(CoreError::Validation("query has no FROM table".into()));
        };
        if self.select.is_empty() {
            return Err(CoreError::Validation(format!(
                "query on {table} selects no columns"
            )));
        }

        let mut columns = Vec::with_capacity(self.select.len());
        for expr in &self.select {
            match expr {
                SelectExpr::Column(column) => columns.push(column.clone()),
                SelectExpr::SubQuery { query, alias } => {
                    columns.push(format!("({}) AS {alias}", query.to_sql()?));
                }
            }
        }

        let mut sql = format!("SELECT {} FROM {table} {alias}", columns.join(", "));

        for join in &self.joins {
            let _ = write!(
                sql,
                " {} {} {} ON {}",
                join.kind.keyword(),
                join.table,
                join.alias,
                join.condition
            );
        }

        match self.predicates.as_slice() {
            [] => {}
            [single] => {
                let _ = write!(sql, " WHERE {single}");
            }
            many => {
                let joined = many
                    .iter()
                    .map(|p| format!("({p})"))
                    .collect::<Vec<_>>()
                    .join(" AND ");
                let _ = write!(sql, " WHERE {joined}");
            }
        }

        if !self.group_by.is_empty() {
            let _ = write!(sql, " GROUP BY {}", self.group_by.join(", "));
        }

        if !self.order_by.is_empty() {
            let _ = write!(sql, " ORDER BY {}", self.order_by.join(", "));
        }

        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }

        Ok(sql)
    }

    /// Render the statement with positional placeholders and collect the
    /// bind values in placeholder order.
    pub fn build(&self) -> Result<BuiltQuery, CoreError> {
        let named = self.to_sql()?;
        let (sql, names) = number_placeholders(&named);

        let mut bound = BTreeMap::new();
        self.collect_params(&mut bound)?;

        let params = names
            .iter()
            .map(|name| {
                bound.get(name).cloned().ok_or_else(|| {
                    CoreError::Validation(format!("unbound query parameter :{name}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuiltQuery { sql, params })
    }

    /// Gather the parameters of this query and all of its sub-selects.
    fn collect_params(&self, into: &mut BTreeMap<String, QueryParam>) -> Result<(), CoreError> {
        for expr in &self.select {
            if let SelectExpr::SubQuery { query, .. } = expr {
                query.collect_params(into)?;
            }
        }

        for (name, value) in &self.params {
            match into.get(name) {
                Some(existing) if existing != value => {
                    return Err(CoreError::Validation(format!(
                        "query parameter :{name} is bound to conflicting values \
                         {existing:?} and {value:?}"
                    )));
                }
                Some(_) => {}
                None => {
                    into.insert(name.clone(), value.clone());
                }
            }
        }

        Ok(())
    }
}

/// Rewrite `:name` placeholders to `$n`, numbering names by first
/// appearance. `::` casts, single-quoted literals and double-quoted
/// identifiers pass through untouched.
fn number_placeholders(sql: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(sql.len());
    let mut names: Vec<String> = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            out.push(c);
            if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.push_str("::");
            }
            ':' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if name.is_empty() {
                    out.push(':');
                    continue;
                }

                let index = match names.iter().position(|n| *n == name) {
                    Some(pos) => pos + 1,
                    None => {
                        names.push(name);
                        names.len()
                    }
                };
                let _ = write!(out, "${index}");
            }
            _ => out.push(c),
        }
    }

    (out, names)
}

// ---------------------------------------------------------------------------
// BuiltQuery
// ---------------------------------------------------------------------------

/// A rendered statement ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl BuiltQuery {
    /// Prepare a `query_as` with every parameter bound in order.
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        let mut query = sqlx::query_as::<_, O>(&self.sql);
        for param in &self.params {
            query = match param {
                QueryParam::Int(value) => query.bind(*value),
                QueryParam::Text(value) => query.bind(value.as_str()),
            };
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
