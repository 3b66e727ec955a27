//! Shared fixtures: a fleet hierarchy and an in-memory table that executes
//! the builder's INSERT and SELECT queries.

#![allow(dead_code)]

use elif_sti::query::{QueryOperator, WhereCondition};
use elif_sti::{has_parent_overrides, Attributes, HasParent, Model, QueryBuilder, StiResult};
use serde_json::Value;

macro_rules! model_base {
    ($type_name:expr) => {
        fn type_name() -> &'static str {
            $type_name
        }

        fn new_instance() -> StiResult<Self> {
            Ok(Self::default())
        }

        fn attributes(&self) -> &Attributes {
            &self.attributes
        }

        fn attributes_mut(&mut self) -> &mut Attributes {
            &mut self.attributes
        }
    };
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// STI root stored in `vehicles`
#[derive(Debug, Default)]
pub struct Vehicle {
    pub attributes: Attributes,
}

impl Model for Vehicle {
    model_base!("App\\Models\\Vehicle");

    fn has_children() -> bool {
        true
    }

    fn fillable(&self) -> Vec<String> {
        strings(&["make", "model", "type"])
    }
}

#[derive(Debug, Default)]
pub struct Car {
    pub attributes: Attributes,
}

impl Model for Car {
    model_base!("App\\Models\\Car");
    has_parent_overrides!();

    fn fillable(&self) -> Vec<String> {
        strings(&["doors", "make"])
    }
}

impl HasParent for Car {
    type Parent = Vehicle;

    fn relationship_class_name() -> StiResult<String> {
        Ok("car".to_string())
    }
}

#[derive(Debug, Default)]
pub struct Truck {
    pub attributes: Attributes,
}

impl Model for Truck {
    model_base!("App\\Models\\Truck");
    has_parent_overrides!();

    fn fillable(&self) -> Vec<String> {
        strings(&["payload"])
    }
}

impl HasParent for Truck {
    type Parent = Vehicle;
}

/// Plain model on the other side of a many-to-many relation with `Car`
#[derive(Debug, Default)]
pub struct Owner {
    pub attributes: Attributes,
}

impl Model for Owner {
    model_base!("App\\Models\\Owner");

    fn class_name_for_relationships() -> StiResult<String> {
        Ok("owner".to_string())
    }
}

/// Parent without the STI root flag
#[derive(Debug, Default)]
pub struct Person {
    pub attributes: Attributes,
}

impl Model for Person {
    model_base!("App\\Models\\Person");

    fn declared_table() -> Option<&'static str> {
        Some("people")
    }

    fn fillable(&self) -> Vec<String> {
        strings(&["name"])
    }
}

#[derive(Debug, Default)]
pub struct Employee {
    pub attributes: Attributes,
}

impl Model for Employee {
    model_base!("App\\Models\\Employee");
    has_parent_overrides!();

    fn declared_table() -> Option<&'static str> {
        Some("people")
    }

    fn fillable(&self) -> Vec<String> {
        strings(&["name"])
    }
}

impl HasParent for Employee {
    type Parent = Person;
}

#[derive(Debug, Default)]
pub struct Shape {
    pub attributes: Attributes,
}

impl Model for Shape {
    model_base!("App\\Models\\Shape");

    fn is_abstract() -> bool {
        true
    }

    fn has_children() -> bool {
        true
    }
}

/// Child of an abstract parent
#[derive(Debug, Default)]
pub struct Circle {
    pub attributes: Attributes,
}

impl Model for Circle {
    model_base!("App\\Models\\Circle");
    has_parent_overrides!();

    fn fillable(&self) -> Vec<String> {
        strings(&["radius"])
    }
}

impl HasParent for Circle {
    type Parent = Shape;
}

/// Rows of one physical table
#[derive(Debug, Default)]
pub struct MemoryTable {
    name: String,
    rows: Vec<Attributes>,
}

impl MemoryTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Execute an INSERT built for this table
    pub fn insert<M>(&mut self, query: &QueryBuilder<M>) {
        assert_eq!(query.insert_table(), Some(self.name.as_str()));
        let row = query
            .set_clauses()
            .iter()
            .map(|clause| {
                (
                    clause.column.clone(),
                    clause.value.clone().unwrap_or(Value::Null),
                )
            })
            .collect();
        self.rows.push(row);
    }

    /// Execute a SELECT built for this table
    pub fn select<M>(&self, query: &QueryBuilder<M>) -> Vec<Attributes> {
        assert_eq!(query.tables(), &[self.name.clone()]);
        self.rows
            .iter()
            .filter(|row| {
                query
                    .where_conditions()
                    .iter()
                    .all(|condition| self.matches(row, condition))
            })
            .cloned()
            .collect()
    }

    fn matches(&self, row: &Attributes, condition: &WhereCondition) -> bool {
        let column = condition
            .column
            .strip_prefix(&format!("{}.", self.name))
            .unwrap_or(condition.column.as_str());
        let value = row.get(column).filter(|value| !value.is_null());

        match condition.operator {
            QueryOperator::Equal => value.is_some() && value == condition.value.as_ref(),
            QueryOperator::NotEqual => value.is_some() && value != condition.value.as_ref(),
            QueryOperator::In => value.is_some_and(|v| condition.values.contains(v)),
            QueryOperator::NotIn => value.is_some_and(|v| !condition.values.contains(v)),
            QueryOperator::IsNull => value.is_none(),
            QueryOperator::IsNotNull => value.is_some(),
        }
    }
}
