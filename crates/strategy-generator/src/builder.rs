//! Compile declarative strategy definitions into runnable vectors.
//!
//! Predicates and constraints built here carry a generated description, so
//! metadata export and exhaustion errors can name them.

use crate::argument::Argument;
use crate::error::GenerationError;
use crate::predicate::{ValuePredicate, VectorConstraint};
use crate::rng_type::RngType;
use crate::vector::Vector;
use strategy_core::{
    ArgumentDefinition, ConstraintConfig, PredicateConfig, RngTypeConfig, Value,
    VectorDefinition,
};

fn list(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a value predicate from its declarative form.
pub fn build_predicate(config: &PredicateConfig) -> Result<ValuePredicate, GenerationError> {
    let predicate = match config {
        PredicateConfig::Range { min, max } => {
            let (min, max) = (*min, *max);
            let description = match (min, max) {
                (Some(lo), Some(hi)) => format!("in [{lo}, {hi}]"),
                (Some(lo), None) => format!(">= {lo}"),
                (None, Some(hi)) => format!("<= {hi}"),
                (None, None) => "numeric".to_string(),
            };
            ValuePredicate::described(description, move |v| {
                v.as_f64().is_some_and(|x| {
                    min.map_or(true, |lo| x >= lo) && max.map_or(true, |hi| x <= hi)
                })
            })
        }

        PredicateConfig::NotIn { values } => {
            let values = values.clone();
            ValuePredicate::described(format!("not in [{}]", list(&values)), move |v| {
                !values.contains(v)
            })
        }

        PredicateConfig::OneOf { values } => {
            let values = values.clone();
            ValuePredicate::described(format!("one of [{}]", list(&values)), move |v| {
                values.contains(v)
            })
        }

        PredicateConfig::MultipleOf { divisor } => {
            let divisor = *divisor;
            if divisor == 0 {
                return Err(GenerationError::InvalidRange(
                    "multiple_of divisor must not be zero".into(),
                ));
            }
            ValuePredicate::described(format!("multiple of {divisor}"), move |v| {
                v.as_i64().is_some_and(|i| i.wrapping_rem(divisor) == 0)
            })
        }

        PredicateConfig::Length { min, max } => {
            let (min, max) = (*min, *max);
            let description = match (min, max) {
                (Some(lo), Some(hi)) => format!("length in [{lo}, {hi}]"),
                (Some(lo), None) => format!("length >= {lo}"),
                (None, Some(hi)) => format!("length <= {hi}"),
                (None, None) => "has length".to_string(),
            };
            ValuePredicate::described(description, move |v| {
                v.len().is_some_and(|n| {
                    min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
                })
            })
        }

        PredicateConfig::Not { predicate } => {
            let inner = build_predicate(predicate)?;
            let description = format!("not ({})", inner.description().unwrap_or("predicate"));
            ValuePredicate::described(description, move |v| !inner.test(v))
        }

        PredicateConfig::All { predicates } => {
            let inner = predicates
                .iter()
                .map(build_predicate)
                .collect::<Result<Vec<_>, _>>()?;
            let description = inner
                .iter()
                .map(|p| p.description().unwrap_or("predicate").to_string())
                .collect::<Vec<_>>()
                .join(" and ");
            ValuePredicate::described(description, move |v| inner.iter().all(|p| p.test(v)))
        }
    };
    Ok(predicate)
}

/// Build a random value type from its declarative form.
pub fn build_rng_type(config: &RngTypeConfig) -> Result<RngType, GenerationError> {
    let rng_type = match config {
        RngTypeConfig::Integer { min, max, .. } => RngType::integer(*min, *max)?,
        RngTypeConfig::Float { min, max, .. } => RngType::float(*min, *max)?,
        RngTypeConfig::Boolean { true_prob, .. } => RngType::boolean(*true_prob)?,
        RngTypeConfig::String {
            length,
            min_len,
            max_len,
            charset,
            ..
        } => match length {
            Some(len) => RngType::string(*len, *len, charset.as_str())?,
            None => RngType::string(*min_len, *max_len, charset.as_str())?,
        },
        RngTypeConfig::Choice { items, .. } => RngType::choice(items.clone())?,
        RngTypeConfig::Sequence { items, .. } => RngType::sequence(items.clone())?,
        RngTypeConfig::Enum {
            members, weights, ..
        } => match weights {
            Some(weights) => RngType::weighted_enumeration(
                members.iter().map(String::as_str),
                weights.iter().map(|(name, w)| (name.as_str(), *w)),
            )?,
            None => RngType::enumeration(members.iter().map(String::as_str))?,
        },
        RngTypeConfig::WeightedInteger { ranges, .. } => {
            RngType::weighted_integer(ranges.iter().map(|r| ((r.min, r.max), r.weight)))?
        }
        RngTypeConfig::WeightedFloat { ranges, .. } => {
            RngType::weighted_float(ranges.iter().map(|r| ((r.min, r.max), r.weight)))?
        }
    };

    match config.predicate() {
        Some(predicate) => rng_type.with_predicate(build_predicate(predicate)?),
        None => Ok(rng_type),
    }
}

/// Build an argument. A literal `value` takes precedence over a generator.
pub fn build_argument(def: &ArgumentDefinition) -> Result<Argument, GenerationError> {
    let mut argument = match (&def.value, &def.generator) {
        (Some(value), _) => Argument::fixed(def.name.as_str(), value.clone()),
        (None, Some(generator)) => {
            let rng_type = build_rng_type(generator)?;
            if def.directed_values.is_empty() {
                Argument::random(def.name.as_str(), rng_type)
            } else {
                Argument::mixed(def.name.as_str(), rng_type, def.directed_values.clone())
            }
        }
        (None, None) => return Err(GenerationError::MissingGenerator(def.name.clone())),
    };

    argument = argument.with_description(def.description.as_str());
    if let Some(validator) = &def.validator {
        argument = argument.with_validator(build_predicate(validator)?);
    }
    if let Some(max_retries) = def.max_retries {
        argument = argument.with_max_retries(max_retries);
    }
    Ok(argument)
}

fn position(arg_names: &[String], name: &str) -> Result<usize, GenerationError> {
    arg_names.iter().position(|n| n == name).ok_or_else(|| {
        GenerationError::unknown_name("argument", name, arg_names.iter().map(String::as_str))
    })
}

/// Build a vector constraint, resolving argument names to positions.
pub fn build_constraint(
    config: &ConstraintConfig,
    arg_names: &[String],
) -> Result<VectorConstraint, GenerationError> {
    let constraint = match config {
        ConstraintConfig::Compare { left, op, right } => {
            let (l, r, op) = (position(arg_names, left)?, position(arg_names, right)?, *op);
            VectorConstraint::described(format!("{left} {op} {right}"), move |v: &[Value]| {
                op.apply(&v[l], &v[r])
            })
        }

        ConstraintConfig::CompareValue { arg, op, value } => {
            let (idx, op, value) = (position(arg_names, arg)?, *op, value.clone());
            VectorConstraint::described(format!("{arg} {op} {value}"), move |v: &[Value]| {
                op.apply(&v[idx], &value)
            })
        }

        ConstraintConfig::Distinct { args } => {
            let indices = args
                .iter()
                .map(|a| position(arg_names, a))
                .collect::<Result<Vec<_>, _>>()?;
            VectorConstraint::described(
                format!("distinct({})", args.join(", ")),
                move |v: &[Value]| {
                    indices.iter().enumerate().all(|(i, &a)| {
                        indices[i + 1..].iter().all(|&b| v[a] != v[b])
                    })
                },
            )
        }

        ConstraintConfig::SumAtMost { args, max } => {
            let indices = args
                .iter()
                .map(|a| position(arg_names, a))
                .collect::<Result<Vec<_>, _>>()?;
            let max = *max;
            VectorConstraint::described(
                format!("sum({}) <= {max}", args.join(", ")),
                move |v: &[Value]| {
                    indices
                        .iter()
                        .map(|&i| v[i].as_f64())
                        .sum::<Option<f64>>()
                        .is_some_and(|total| total <= max)
                },
            )
        }
    };
    Ok(constraint)
}

/// Build a complete vector from a strategy definition.
pub fn build_vector(def: &VectorDefinition) -> Result<Vector, GenerationError> {
    let arguments = def
        .arguments
        .iter()
        .map(build_argument)
        .collect::<Result<Vec<_>, _>>()?;

    let mut vector =
        Vector::new(arguments)?.with_always_include_directed(def.always_include_directed);
    if let Some(max) = def.max_vector_retries {
        vector = vector.with_max_vector_retries(max);
    }

    let arg_names = vector.arg_names();
    for constraint in &def.constraints {
        vector.add_constraint(build_constraint(constraint, &arg_names)?);
    }
    for directed in &def.directed_vectors {
        vector.add_directed_vector(directed.name.as_str(), directed.values.clone())?;
    }
    for test in &def.test_vectors {
        vector.add_test_vector(test.name.as_str(), test.values.clone())?;
    }

    tracing::debug!(
        strategy = %def.name,
        arguments = vector.num_args(),
        directed = vector.directed_vectors().len(),
        constraints = vector.constraints().len(),
        "Built vector"
    );
    Ok(vector)
}
