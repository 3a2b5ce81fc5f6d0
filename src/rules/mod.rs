//! The closed set of row rules and their shared contract
//!
//! Rules transform panels along a row: unary rules map one panel to the
//! next column, the binary arithmetic rule combines the first two columns
//! into the third. The set is closed by design; configuration reaches it
//! only through string-tagged [`RuleSpec`] records and the
//! [`build_rule`] factory, and unknown tags fail hard.
//!
//! Stateful rules (distribute-three) follow an explicit reset contract:
//! [`Rule::reset_row`] runs at the start of every row and [`Rule::reset`]
//! restores the freshly built state, so no rule state can leak across
//! rows or puzzles.

pub mod arithmetic;
pub mod composite;
pub mod constant;
pub mod distribute;
pub mod factory;
pub mod progression;
pub mod spatial;

pub use arithmetic::{ArithmeticOp, ArithmeticRule};
pub use composite::CompositeRule;
pub use constant::ConstantRule;
pub use distribute::DistributeThreeRule;
pub use factory::{RuleParameters, RuleSpec, build_rule};
pub use progression::ProgressionRule;
pub use spatial::{RotationRule, ShiftDirection, ShiftRule};

use crate::generator::RandomSelector;
use crate::io::error::Result;
use crate::panel::Panel;
use crate::schema::Attribute;
use std::fmt;

/// What a value rule operates on: one entity attribute, or the entity
/// count of the whole panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A per-entity attribute slot (type, size, angle, or color)
    Attribute(Attribute),
    /// The number of entities in the panel
    Number,
}

impl Target {
    /// Parse a target from its configuration name
    ///
    /// Accepts `number` and the four targetable attribute names; `exists`
    /// is not a legal target.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "number" {
            return Some(Self::Number);
        }
        Attribute::from_name(name)
            .filter(|attr| *attr != Attribute::Exists)
            .map(Self::Attribute)
    }

    /// Canonical name of this target
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attribute(attr) => attr.name(),
            Self::Number => "number",
        }
    }
}

/// Human-readable record of one configured rule
///
/// Carried on generated puzzles so downstream consumers can see which
/// rules shaped each grid without holding the rules themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Rule kind name
    pub name: &'static str,
    /// Target attribute name, when the rule has one
    pub target: Option<String>,
    /// Parameter summary (step, operation, direction)
    pub detail: String,
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.target, self.detail.is_empty()) {
            (Some(target), false) => write!(f, "{}({target}, {})", self.name, self.detail),
            (Some(target), true) => write!(f, "{}({target})", self.name),
            (None, false) => write!(f, "{}({})", self.name, self.detail),
            (None, true) => write!(f, "{}", self.name),
        }
    }
}

/// One rule from the closed set
///
/// Constructed through [`build_rule`]; every variant shares the apply,
/// seed-preparation, and reset contract documented on the methods below.
#[derive(Clone, Debug)]
pub enum Rule {
    /// Modular attribute or entity-count progression
    Progression(ProgressionRule),
    /// Deep-copy no-op
    Constant(ConstantRule),
    /// Binary add/subtract over the occupancy intersection
    Arithmetic(ArithmeticRule),
    /// Three values cyclically permuted across rows and columns
    DistributeThree(DistributeThreeRule),
    /// Whole-panel rotation in 90-degree steps
    Rotation(RotationRule),
    /// Toroidal entity shift
    Shift(ShiftRule),
    /// Sequential composition of sub-rules
    Composite(CompositeRule),
}

impl Rule {
    /// Number of input panels one application consumes
    pub fn required_panels(&self) -> usize {
        match self {
            Self::Arithmetic(_) => 2,
            Self::Composite(rule) => rule.required_panels(),
            _ => 1,
        }
    }

    /// Apply the rule to produce a new panel
    ///
    /// Inputs are never mutated; the result is freshly allocated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::InsufficientSeedPanels`] when
    /// fewer panels arrive than [`Self::required_panels`] demands, and
    /// forwards rule-specific constraint violations such as
    /// [`crate::GenerationError::EntityBound`].
    pub fn apply(&mut self, panels: &[Panel], selector: &mut RandomSelector) -> Result<Panel> {
        match self {
            Self::Progression(rule) => rule.apply(panels, selector),
            Self::Constant(rule) => rule.apply(panels),
            Self::Arithmetic(rule) => rule.apply(panels, selector),
            Self::DistributeThree(rule) => rule.apply(panels, selector),
            Self::Rotation(rule) => rule.apply(panels),
            Self::Shift(rule) => rule.apply(panels),
            Self::Composite(rule) => rule.apply(panels, selector),
        }
    }

    /// Give the rule a chance to rewrite a row's first panel
    ///
    /// Stateful rules align the seed with their row pattern here;
    /// stateless rules return an unchanged clone. The row generator calls
    /// this once per unary rule before filling the remaining columns.
    ///
    /// # Errors
    ///
    /// Forwards attribute validation failures from the rewrite.
    pub fn prepare_seed(&mut self, seed: &Panel, selector: &mut RandomSelector) -> Result<Panel> {
        match self {
            Self::DistributeThree(rule) => rule.prepare_seed(seed, selector),
            Self::Composite(rule) => rule.prepare_seed(seed, selector),
            _ => Ok(seed.clone()),
        }
    }

    /// Clear row-scoped state at a row boundary
    pub fn reset_row(&mut self) {
        match self {
            Self::DistributeThree(rule) => rule.reset_row(),
            Self::Composite(rule) => rule.reset_row(),
            _ => {}
        }
    }

    /// Restore the freshly constructed state
    pub fn reset(&mut self) {
        match self {
            Self::DistributeThree(rule) => rule.reset(),
            Self::Composite(rule) => rule.reset(),
            _ => {}
        }
    }

    /// Metadata record describing this rule
    pub fn descriptor(&self) -> RuleDescriptor {
        match self {
            Self::Progression(rule) => rule.descriptor(),
            Self::Constant(rule) => rule.descriptor(),
            Self::Arithmetic(rule) => rule.descriptor(),
            Self::DistributeThree(rule) => rule.descriptor(),
            Self::Rotation(rule) => rule.descriptor(),
            Self::Shift(rule) => rule.descriptor(),
            Self::Composite(rule) => rule.descriptor(),
        }
    }
}

/// Fetch the first panel of an input slice, or the arity error
pub(crate) fn first_panel(panels: &[Panel], required: usize) -> Result<&Panel> {
    panels
        .first()
        .ok_or(crate::io::error::GenerationError::InsufficientSeedPanels {
            required,
            supplied: panels.len(),
        })
}
