//! Output-schema projection
//!
//! Masking a scalar column always produces text, so the output schema
//! widens masked non-JSON columns to `text`. JSON columns keep their type:
//! masking happens inside the tree, not by replacing the column. Column
//! count, names and order are preserved.

use crate::rules::MaskRule;
use rowmask_core::{Column, ColumnType, Schema};
use std::collections::HashMap;

pub fn project(input: &Schema, rules: &HashMap<String, MaskRule>) -> Schema {
    let columns = input
        .columns()
        .iter()
        .map(|column| {
            let column_type =
                if rules.contains_key(&column.name) && column.column_type != ColumnType::Json {
                    ColumnType::Text
                } else {
                    column.column_type
                };
            Column::new(column.name.clone(), column_type)
        })
        .collect();
    Schema::new(columns)
}
