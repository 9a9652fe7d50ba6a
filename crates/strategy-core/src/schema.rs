//! Strategy file definitions.
//!
//! A strategy file declares one or more named vectors: their arguments,
//! generators, filters, constraints and the directed/test tuples that are
//! always available by name. The file is plain data; the generator crate
//! compiles it into executable vectors.
//!
//! ```yaml
//! version: 1
//! seed: 42
//! strategies:
//!   - name: ranges
//!     arguments:
//!       - name: x
//!         generator: { type: integer, min: 0, max: 10 }
//!       - name: y
//!         generator: { type: integer, min: 0, max: 10 }
//!     constraints:
//!       - { type: compare, left: x, op: lt, right: y }
//!     directed_vectors:
//!       - { name: eq, values: [5, 5] }
//! ```

use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for strategy file operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading strategy file
    #[error("Failed to read strategy file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Strategy not found in file
    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    /// Two strategies share a name
    #[error("Duplicate strategy name: {0}")]
    DuplicateStrategy(String),
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// One weighted range of a weighted integer/float generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRangeConfig<T> {
    /// Lower bound (inclusive)
    pub min: T,
    /// Upper bound (inclusive)
    pub max: T,
    /// Relative weight; weights need not sum to 1
    pub weight: f64,
}

fn default_string_min_len() -> usize {
    1
}

fn default_string_max_len() -> usize {
    20
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

fn default_true_prob() -> f64 {
    0.5
}

/// Default character set for random strings.
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Random value generator configuration for an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RngTypeConfig {
    /// Uniform integer in `[min, max]`
    Integer {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Uniform float in `[min, max]`
    Float {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Bernoulli draw
    Boolean {
        /// Probability of `true` (0.0 to 1.0)
        #[serde(default = "default_true_prob")]
        true_prob: f64,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Random string
    String {
        /// Fixed length; overrides `min_len`/`max_len` when set
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
        /// Minimum length (inclusive)
        #[serde(default = "default_string_min_len")]
        min_len: usize,
        /// Maximum length (inclusive)
        #[serde(default = "default_string_max_len")]
        max_len: usize,
        /// Characters to draw from
        #[serde(default = "default_charset")]
        charset: String,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Uniform pick from a list
    Choice {
        /// Items to choose from
        items: Vec<Value>,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Ordered items, enumerated in exhaustive runs
    Sequence {
        /// Items in enumeration order
        items: Vec<Value>,
        /// Optional filter applied to the items up front
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Enum member names, optionally weighted
    Enum {
        /// Member names
        members: Vec<String>,
        /// Member name to relative weight; unlisted members are never drawn
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<BTreeMap<String, f64>>,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Integer drawn from a weighted set of ranges
    WeightedInteger {
        /// Ranges and their weights
        ranges: Vec<WeightedRangeConfig<i64>>,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },

    /// Float drawn from a weighted set of ranges
    WeightedFloat {
        /// Ranges and their weights
        ranges: Vec<WeightedRangeConfig<f64>>,
        /// Optional acceptance filter
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<PredicateConfig>,
    },
}

impl RngTypeConfig {
    /// The predicate attached to this generator, if any.
    pub fn predicate(&self) -> Option<&PredicateConfig> {
        match self {
            RngTypeConfig::Integer { predicate, .. }
            | RngTypeConfig::Float { predicate, .. }
            | RngTypeConfig::Boolean { predicate, .. }
            | RngTypeConfig::String { predicate, .. }
            | RngTypeConfig::Choice { predicate, .. }
            | RngTypeConfig::Sequence { predicate, .. }
            | RngTypeConfig::Enum { predicate, .. }
            | RngTypeConfig::WeightedInteger { predicate, .. }
            | RngTypeConfig::WeightedFloat { predicate, .. } => predicate.as_ref(),
        }
    }
}

// ============================================================================
// Predicates and Constraints
// ============================================================================

/// Declarative single-value filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateConfig {
    /// Numeric value within `[min, max]`; either bound may be omitted
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Value is not one of `values`
    NotIn { values: Vec<Value> },

    /// Value is one of `values`
    OneOf { values: Vec<Value> },

    /// Integer divisible by `divisor`
    MultipleOf { divisor: i64 },

    /// String or list length within `[min, max]`
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },

    /// Negation of another predicate
    Not { predicate: Box<PredicateConfig> },

    /// Conjunction of predicates
    All { predicates: Vec<PredicateConfig> },
}

/// Comparison operator used by tuple constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    /// Operator symbol, as used in constraint descriptions.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    /// Apply the operator to two values.
    ///
    /// Incomparable values only satisfy `Ne`.
    pub fn apply(&self, left: &Value, right: &Value) -> bool {
        use std::cmp::Ordering;
        match left.partial_cmp(right) {
            Some(ord) => match self {
                CompareOp::Lt => ord == Ordering::Less,
                CompareOp::Le => ord != Ordering::Greater,
                CompareOp::Gt => ord == Ordering::Greater,
                CompareOp::Ge => ord != Ordering::Less,
                CompareOp::Eq => ord == Ordering::Equal,
                CompareOp::Ne => ord != Ordering::Equal,
            },
            None => *self == CompareOp::Ne,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Declarative constraint over a whole vector.
///
/// Arguments are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    /// `left <op> right`, both argument names
    Compare {
        left: String,
        op: CompareOp,
        right: String,
    },

    /// `arg <op> value`
    CompareValue { arg: String, op: CompareOp, value: Value },

    /// All listed arguments hold pairwise different values
    Distinct { args: Vec<String> },

    /// Sum of the listed numeric arguments is at most `max`
    SumAtMost { args: Vec<String>, max: f64 },
}

// ============================================================================
// Strategy Definitions
// ============================================================================

/// A named literal tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValues {
    /// Name, unique within its collection
    pub name: String,
    /// One value per argument, in argument order
    pub values: Vec<Value>,
}

/// Argument definition.
///
/// Exactly one of the three modes applies: `value` makes a static argument,
/// `generator` alone a random one, and `generator` plus `directed_values`
/// a mixed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Argument name
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Static literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Random generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<RngTypeConfig>,

    /// Literals always emitted in directed passes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directed_values: Vec<Value>,

    /// Extra filter applied after the generator's own predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<PredicateConfig>,

    /// Per-argument retry ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
}

fn default_true() -> bool {
    true
}

/// Vector (strategy) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDefinition {
    /// Strategy name
    pub name: String,

    /// Arguments in declared order
    pub arguments: Vec<ArgumentDefinition>,

    /// Named directed tuples
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directed_vectors: Vec<NamedValues>,

    /// Named test tuples
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_vectors: Vec<NamedValues>,

    /// Whole-vector constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintConfig>,

    /// Include directed tuples in `mixed` mode
    #[serde(default = "default_true")]
    pub always_include_directed: bool,

    /// Vector-level retry ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vector_retries: Option<usize>,
}

impl VectorDefinition {
    /// Get all argument names in declared order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }
}

fn default_version() -> u32 {
    1
}

/// A strategy file: a set of named vector definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyFile {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default seed for runs that do not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Strategy definitions
    pub strategies: Vec<VectorDefinition>,
}

impl StrategyFile {
    /// Load a strategy file. `.toml` files are parsed as TOML, anything
    /// else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// Parse a strategy file from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: StrategyFile = serde_yaml::from_str(yaml)?;
        file.check_unique_names()?;
        Ok(file)
    }

    /// Parse a strategy file from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, SchemaError> {
        let file: StrategyFile = toml::from_str(content)?;
        file.check_unique_names()?;
        Ok(file)
    }

    fn check_unique_names(&self) -> Result<(), SchemaError> {
        let mut seen = std::collections::HashSet::new();
        for strategy in &self.strategies {
            if !seen.insert(strategy.name.as_str()) {
                return Err(SchemaError::DuplicateStrategy(strategy.name.clone()));
            }
        }
        Ok(())
    }

    /// Get a strategy definition by name.
    pub fn get_strategy(&self, name: &str) -> Result<&VectorDefinition, SchemaError> {
        self.strategies
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SchemaError::StrategyNotFound(name.to_string()))
    }

    /// Get all strategy names in file order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
