//! Parameterized SELECT builder.
//!
//! Queries are data: a table, a list of equality predicates and an optional
//! ordering. Column names only ever come from code; every value is emitted as
//! a `?` placeholder and returned separately from [`SelectQuery::params`] in
//! clause order.

/// Tables this service reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Restaurants,
    Dishes,
}

impl Table {
    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Restaurants => "restaurants",
            Table::Dishes => "dishes",
        }
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Integer(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Integer(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

/// `column = ?` with its bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: BindValue,
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl Into<BindValue>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Descending sort on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
}

/// How the WHERE clause is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WhereStyle {
    /// `WHERE a = ? AND b = ?`, omitted when there are no predicates.
    Plain,
    /// `WHERE 1=1 AND a = ? ...`, always present.
    AlwaysTrue,
}

/// A `SELECT *` against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: Table,
    predicates: Vec<Predicate>,
    order_by: Option<OrderBy>,
    style: WhereStyle,
}

impl SelectQuery {
    /// Every row of `table`.
    pub fn all(table: Table) -> Self {
        Self {
            table,
            predicates: Vec::new(),
            order_by: None,
            style: WhereStyle::Plain,
        }
    }

    /// The row of `table` with primary key `id`.
    pub fn by_id(table: Table, id: i64) -> Self {
        Self::where_eq(table, "id", id)
    }

    /// Rows of `table` where `column` equals `value`.
    pub fn where_eq(table: Table, column: &'static str, value: impl Into<BindValue>) -> Self {
        let mut query = Self::all(table);
        query.predicates.push(Predicate::eq(column, value));
        query
    }

    /// Rows matching every predicate, rendered as `WHERE 1=1 AND ...`.
    ///
    /// An empty predicate list matches every row.
    pub fn filtered(table: Table, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            table,
            predicates: predicates.into_iter().collect(),
            order_by: None,
            style: WhereStyle::AlwaysTrue,
        }
    }

    /// Sorts the result by `column`, highest first.
    pub fn order_by_desc(mut self, column: &'static str) -> Self {
        self.order_by = Some(OrderBy { column });
        self
    }

    /// Renders the statement with `?` placeholders.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT * FROM {}", self.table.name());

        match self.style {
            WhereStyle::AlwaysTrue => {
                sql.push_str(" WHERE 1=1");
                for predicate in &self.predicates {
                    sql.push_str(" AND ");
                    sql.push_str(predicate.column);
                    sql.push_str(" = ?");
                }
            }
            WhereStyle::Plain if !self.predicates.is_empty() => {
                let clauses: Vec<String> = self
                    .predicates
                    .iter()
                    .map(|p| format!("{} = ?", p.column))
                    .collect();
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            WhereStyle::Plain => {}
        }

        if let Some(order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order.column);
            sql.push_str(" DESC");
        }

        sql
    }

    /// Bound values, in placeholder order.
    pub fn params(&self) -> Vec<&BindValue> {
        self.predicates.iter().map(|p| &p.value).collect()
    }
}
