//! Serializable description of a vector's configuration.
//!
//! Metadata is what downstream tooling sees of a strategy: argument order,
//! value kinds, generator descriptors and the named tuples. Predicates are
//! opaque and exported only as a presence flag plus description.

use crate::argument::{Argument, ArgumentMode};
use crate::rng_type::RngKind;
use crate::vector::{NamedVector, Vector};
use serde::Serialize;
use strategy_core::{Value, ValueKind};

/// Argument generation mode as exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentModeTag {
    Static,
    Random,
    Mixed,
}

/// Exported description of one argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub value_kind: ValueKind,
    pub mode: ArgumentModeTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_type: Option<RngKind>,
    pub has_predicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    pub has_validator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directed_values: Vec<Value>,
    pub max_retries: usize,
}

/// Exported description of a vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorMetadata {
    pub arguments: Vec<ArgumentMetadata>,
    pub directed_vectors: Vec<NamedVector>,
    pub test_vectors: Vec<NamedVector>,
    pub constraint_count: usize,
    /// Constraint descriptions, with positional fallbacks
    pub constraints: Vec<String>,
    pub always_include_directed: bool,
    pub max_vector_retries: usize,
}

impl ArgumentMetadata {
    pub fn from_argument(arg: &Argument) -> Self {
        let mode = match arg.mode() {
            ArgumentMode::Static(_) => ArgumentModeTag::Static,
            ArgumentMode::Random(_) => ArgumentModeTag::Random,
            ArgumentMode::Mixed { .. } => ArgumentModeTag::Mixed,
        };
        let predicate = arg.rng_type().and_then(|t| t.predicate());

        Self {
            name: arg.name().to_string(),
            description: arg.description().to_string(),
            value_kind: arg.value_kind(),
            mode,
            value: arg.static_value().cloned(),
            rng_type: arg.rng_type().map(|t| t.kind().clone()),
            has_predicate: predicate.is_some(),
            predicate: predicate.and_then(|p| p.description()).map(str::to_string),
            has_validator: arg.validator().is_some(),
            validator: arg
                .validator()
                .and_then(|p| p.description())
                .map(str::to_string),
            directed_values: arg.directed_values().to_vec(),
            max_retries: arg.max_retries(),
        }
    }
}

impl Vector {
    /// Export this vector's configuration.
    pub fn to_metadata(&self) -> VectorMetadata {
        VectorMetadata {
            arguments: self
                .arguments()
                .iter()
                .map(ArgumentMetadata::from_argument)
                .collect(),
            directed_vectors: self.directed_vectors().to_vec(),
            test_vectors: self.test_vectors().to_vec(),
            constraint_count: self.constraints().len(),
            constraints: self
                .constraints()
                .iter()
                .enumerate()
                .map(|(i, c)| c.label("constraint", i))
                .collect(),
            always_include_directed: self.always_include_directed(),
            max_vector_retries: self.max_vector_retries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{ValuePredicate, VectorConstraint};
    use crate::rng_type::RngType;
    use serde_json::json;
    use strategy_core::tuple;

    #[test]
    fn test_export_shape() {
        let vector = Vector::new(vec![
            Argument::fixed("mode", "fast").with_description("Run mode"),
            Argument::random(
                "n",
                RngType::integer(1, 100)
                    .unwrap()
                    .with_predicate(ValuePredicate::described("even", |v| {
                        v.as_i64().is_some_and(|i| i % 2 == 0)
                    }))
                    .unwrap(),
            ),
            Argument::mixed(
                "ratio",
                RngType::float(0.0, 1.0).unwrap(),
                tuple![0.0, 1.0],
            )
            .with_validator(ValuePredicate::new(|_| true)),
        ])
        .unwrap()
        .with_directed_vector("edge", tuple!["fast", 2, 0.0])
        .unwrap()
        .with_test_vector("t", tuple!["slow", 4, 0.5])
        .unwrap()
        .with_constraint(VectorConstraint::new(|_: &[Value]| true));

        let meta = vector.to_metadata();
        assert_eq!(meta.arguments.len(), 3);
        assert_eq!(meta.constraint_count, 1);
        assert_eq!(meta.constraints, vec!["constraint #0"]);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["arguments"][0]["mode"], json!("static"));
        assert_eq!(json["arguments"][0]["value"], json!("fast"));
        assert_eq!(json["arguments"][0]["value_kind"], json!("string"));
        assert_eq!(json["arguments"][1]["rng_type"]["variant"], json!("integer"));
        assert_eq!(json["arguments"][1]["rng_type"]["min"], json!(1));
        assert_eq!(json["arguments"][1]["has_predicate"], json!(true));
        assert_eq!(json["arguments"][1]["predicate"], json!("even"));
        assert_eq!(json["arguments"][2]["mode"], json!("mixed"));
        assert_eq!(json["arguments"][2]["directed_values"], json!([0.0, 1.0]));
        assert_eq!(json["arguments"][2]["has_validator"], json!(true));
        assert!(json["arguments"][2].get("validator").is_none());
        assert_eq!(json["directed_vectors"][0]["name"], json!("edge"));
        assert_eq!(json["test_vectors"][0]["values"], json!(["slow", 4, 0.5]));
    }

    #[test]
    fn test_enum_and_weighted_descriptors() {
        let vector = Vector::new(vec![
            Argument::random(
                "color",
                RngType::weighted_enumeration(["red", "green"], [("red", 3.0)]).unwrap(),
            ),
            Argument::random(
                "size",
                RngType::weighted_integer([((0, 10), 0.9), ((11, 100), 0.1)]).unwrap(),
            ),
        ])
        .unwrap();

        let json = serde_json::to_value(vector.to_metadata()).unwrap();
        let color = &json["arguments"][0];
        assert_eq!(color["value_kind"], json!("enum"));
        assert_eq!(color["rng_type"]["members"], json!(["red", "green"]));
        assert_eq!(color["rng_type"]["weights"], json!([3.0, 0.0]));
        let size = &json["arguments"][1];
        assert_eq!(size["rng_type"]["variant"], json!("weighted_integer"));
        assert_eq!(size["rng_type"]["ranges"][1]["weight"], json!(0.1));
    }
}
