//! Record masking dispatcher
//!
//! [`MaskEngine`] is built once from the input schema and the compiled
//! rules, computes the output schema at construction, and then processes
//! records one at a time. It holds no per-record state, so independent
//! engines can run in parallel across partitions.

use crate::projector;
use crate::rules::MaskRule;
use crate::tree;
use rowmask_core::{Error, Record, Result, Schema, Value};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug)]
pub struct MaskEngine {
    input_schema: Schema,
    output_schema: Schema,
    rules: HashMap<String, MaskRule>,
}

impl MaskEngine {
    /// Build an engine from an input schema and compiled rules.
    ///
    /// # Errors
    /// - `Error::ConfigValidation` if the rule list is empty or two rules
    ///   target the same column.
    pub fn new(input_schema: Schema, rules: Vec<MaskRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::ConfigValidation(
                "at least one column rule is required".to_string(),
            ));
        }

        let mut rule_map = HashMap::with_capacity(rules.len());
        for rule in rules {
            let column = rule.column.clone();
            if rule_map.insert(column.clone(), rule).is_some() {
                return Err(Error::ConfigValidation(format!(
                    "duplicate rules target column '{column}'"
                )));
            }
        }

        let output_schema = projector::project(&input_schema, &rule_map);
        debug!(
            columns = input_schema.len(),
            rules = rule_map.len(),
            "mask engine initialized"
        );

        Ok(Self {
            input_schema,
            output_schema,
            rules: rule_map,
        })
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    /// The projected output schema, computed once at construction
    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    /// Transform one record. Strictly 1:1 with the input stream; columns
    /// with no rule pass through, nulls stay null.
    ///
    /// # Errors
    /// - `Error::SchemaMismatch` if the record's arity differs from the
    ///   schema or a value's type differs from its column's declared type.
    ///   These signal an upstream defect and are not recoverable.
    pub fn process_record(&self, record: &Record) -> Result<Record> {
        if record.len() != self.input_schema.len() {
            return Err(Error::SchemaMismatch(format!(
                "record has {} values but the schema has {} columns",
                record.len(),
                self.input_schema.len()
            )));
        }

        let mut output = Vec::with_capacity(record.len());
        for (column, slot) in self.input_schema.columns().iter().zip(record.values()) {
            let Some(value) = slot else {
                output.push(None);
                continue;
            };
            if value.column_type() != column.column_type {
                return Err(Error::SchemaMismatch(format!(
                    "column '{}' is declared {} but holds a {} value",
                    column.name,
                    column.column_type,
                    value.column_type()
                )));
            }

            let masked = match self.rules.get(&column.name) {
                None => value.clone(),
                Some(rule) => match value {
                    Value::Json(node) => {
                        let mut node = node.clone();
                        tree::apply_path_rules(&mut node, &rule.paths);
                        Value::Json(node)
                    }
                    scalar => Value::Text(rule.kind.apply(&scalar.render_text())),
                },
            };
            output.push(Some(masked));
        }

        Ok(Record::new(output))
    }
}

#[cfg(test)]
mod tests;
