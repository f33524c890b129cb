use std::fmt;

use crate::model::ScenarioVariable;

/// Errors for out-of-range or missing input values
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Project size must be strictly positive (KLOC)
    NonPositiveSize(f64),
    /// Expert judgment needs at least one estimate
    EmptyEstimates,
    /// Regression needs a minimum number of historical points
    InsufficientHistory { required: usize, actual: usize },
    /// Cash flow series must contain at least one period flow
    EmptyCashFlows,
    NegativeDiscountRate(f64),
    NegativeInvestment(f64),
    /// Return on investment is undefined for a non-positive investment
    NonPositiveInvestment(f64),
    /// Comparison needs at least one result
    EmptyComparison,
    IterationsOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },
    ConfidenceLevelOutOfRange(f64),
    /// A sensitivity sweep needs at least two sample points
    TooFewSteps(usize),
    /// Sweep bounds must satisfy min < max
    InvertedRange { min: f64, max: f64 },
    /// Histogram needs at least one bin
    NoHistogramBins,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonPositiveSize(kloc) => {
                write!(f, "project size must be positive, got {kloc} KLOC")
            }
            InputError::EmptyEstimates => write!(f, "estimate list is empty"),
            InputError::InsufficientHistory { required, actual } => {
                write!(f, "need at least {required} historical points, got {actual}")
            }
            InputError::EmptyCashFlows => write!(f, "cash flow series has no period flows"),
            InputError::NegativeDiscountRate(rate) => {
                write!(f, "discount rate must be non-negative, got {rate}")
            }
            InputError::NegativeInvestment(amount) => {
                write!(f, "initial investment must be non-negative, got {amount}")
            }
            InputError::NonPositiveInvestment(amount) => {
                write!(f, "total investment must be positive, got {amount}")
            }
            InputError::EmptyComparison => write!(f, "result list is empty"),
            InputError::IterationsOutOfRange {
                requested,
                min,
                max,
            } => {
                write!(
                    f,
                    "iteration count {requested} outside allowed range {min}..={max}"
                )
            }
            InputError::ConfidenceLevelOutOfRange(level) => {
                write!(f, "confidence level must be in (0, 1), got {level}")
            }
            InputError::TooFewSteps(steps) => {
                write!(f, "sweep needs at least 2 steps, got {steps}")
            }
            InputError::InvertedRange { min, max } => {
                write!(f, "sweep range must satisfy min < max, got {min}..{max}")
            }
            InputError::NoHistogramBins => write!(f, "histogram bin count must be at least 1"),
        }
    }
}

impl std::error::Error for InputError {}

/// Errors specific to the regression estimation model
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    Input(InputError),
    /// All historical sizes are identical, so the slope is undefined
    ZeroSizeVariance,
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::Input(e) => write!(f, "{e}"),
            RegressionError::ZeroSizeVariance => {
                write!(f, "historical sizes have zero variance, slope is undefined")
            }
        }
    }
}

impl std::error::Error for RegressionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegressionError::Input(e) => Some(e),
            RegressionError::ZeroSizeVariance => None,
        }
    }
}

impl From<InputError> for RegressionError {
    fn from(e: InputError) -> Self {
        RegressionError::Input(e)
    }
}

/// Errors from invalid random-variable parameters
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    InvalidParameters {
        distribution: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::InvalidParameters {
                distribution,
                reason,
            } => {
                write!(f, "invalid {distribution} parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for DistributionError {}

/// Structural violations of the decision-tree invariants
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    EmptyTree,
    /// A child reference points outside the arena
    NodeOutOfBounds { node: usize, len: usize },
    /// Children must be appended before their parent; a forward reference
    /// would permit cycles
    ForwardReference { node: usize, child: usize },
    /// Decision and chance nodes must have at least one child
    EmptyBranch(usize),
    NegativeProbability { node: usize, probability: f64 },
    /// Chance-node probabilities must sum to 1
    UnnormalizedProbabilities { node: usize, sum: f64 },
    /// Each node may be owned by at most one parent
    SharedChild(usize),
    /// A non-root node that no parent references
    OrphanNode(usize),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyTree => write!(f, "decision tree has no nodes"),
            TreeError::NodeOutOfBounds { node, len } => {
                write!(f, "node index {node} out of bounds for arena of {len}")
            }
            TreeError::ForwardReference { node, child } => {
                write!(f, "node {node} references later node {child}")
            }
            TreeError::EmptyBranch(node) => {
                write!(f, "branch node {node} has no children")
            }
            TreeError::NegativeProbability { node, probability } => {
                write!(f, "chance node {node} has negative probability {probability}")
            }
            TreeError::UnnormalizedProbabilities { node, sum } => {
                write!(f, "chance node {node} probabilities sum to {sum}, expected 1")
            }
            TreeError::SharedChild(node) => {
                write!(f, "node {node} is referenced by more than one parent")
            }
            TreeError::OrphanNode(node) => {
                write!(f, "node {node} is not reachable from the root")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Errors from parsing or evaluating a Monte Carlo outcome formula
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    EmptyFormula,
    UnexpectedCharacter { position: usize, character: char },
    UnexpectedToken { position: usize },
    UnexpectedEnd,
    UnknownVariable(String),
    /// The formula produced NaN or an infinity
    NonFiniteResult,
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::EmptyFormula => write!(f, "formula is empty"),
            FormulaError::UnexpectedCharacter {
                position,
                character,
            } => {
                write!(f, "unexpected character {character:?} at offset {position}")
            }
            FormulaError::UnexpectedToken { position } => {
                write!(f, "unexpected token at offset {position}")
            }
            FormulaError::UnexpectedEnd => write!(f, "formula ended unexpectedly"),
            FormulaError::UnknownVariable(name) => {
                write!(f, "formula references undeclared variable {name:?}")
            }
            FormulaError::NonFiniteResult => write!(f, "formula produced a non-finite value"),
        }
    }
}

impl std::error::Error for FormulaError {}

/// Composite error for the Monte Carlo simulation path
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Input(InputError),
    Distribution(DistributionError),
    Formula {
        /// Trial at which evaluation failed; `None` for pre-run binding errors
        trial: Option<usize>,
        error: FormulaError,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Input(e) => write!(f, "{e}"),
            SimulationError::Distribution(e) => write!(f, "{e}"),
            SimulationError::Formula { trial: Some(t), error } => {
                write!(f, "trial {t}: {error}")
            }
            SimulationError::Formula { trial: None, error } => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Input(e) => Some(e),
            SimulationError::Distribution(e) => Some(e),
            SimulationError::Formula { error, .. } => Some(error),
        }
    }
}

impl From<InputError> for SimulationError {
    fn from(e: InputError) -> Self {
        SimulationError::Input(e)
    }
}

impl From<DistributionError> for SimulationError {
    fn from(e: DistributionError) -> Self {
        SimulationError::Distribution(e)
    }
}

/// Errors from sensitivity analysis
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityError {
    Input(InputError),
    /// Percent change from a zero base value is undefined
    ZeroBaseValue(ScenarioVariable),
}

impl fmt::Display for SensitivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityError::Input(e) => write!(f, "{e}"),
            SensitivityError::ZeroBaseValue(var) => {
                write!(f, "base value of {var:?} is zero, percent change is undefined")
            }
        }
    }
}

impl std::error::Error for SensitivityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SensitivityError::Input(e) => Some(e),
            SensitivityError::ZeroBaseValue(_) => None,
        }
    }
}

impl From<InputError> for SensitivityError {
    fn from(e: InputError) -> Self {
        SensitivityError::Input(e)
    }
}
