//! String-tagged rule specifications and the closed factory

use crate::generator::RandomSelector;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::rules::{
    ArithmeticOp, ArithmeticRule, CompositeRule, ConstantRule, DistributeThreeRule,
    ProgressionRule, RotationRule, Rule, ShiftDirection, ShiftRule, Target,
};
use crate::schema::Attribute;

/// Parameters accompanying a rule specification
#[derive(Clone, Debug)]
pub struct RuleParameters {
    /// Step count for progressions, rotations, and shifts
    pub step: i32,
    /// Arithmetic operation name (`add` or `subtract`)
    pub operation: Option<String>,
    /// Shift direction name
    pub direction: Option<String>,
    /// Rotation direction
    pub clockwise: bool,
}

impl Default for RuleParameters {
    fn default() -> Self {
        Self {
            step: 1,
            operation: None,
            direction: None,
            clockwise: true,
        }
    }
}

/// One string-tagged rule record, as configuration supplies it
///
/// Kind tags accept both the short form (`progression`) and the dotted
/// form (`attribute.progression`, `spatial.rotation`). The factory is
/// the only path from a spec to a [`Rule`], and unknown tags fail hard.
#[derive(Clone, Debug)]
pub struct RuleSpec {
    /// Kind tag selecting the rule variant
    pub kind: String,
    /// Target attribute name, for rules that take one
    pub attribute: Option<String>,
    /// Variant-specific parameters
    pub parameters: RuleParameters,
    /// Sub-rule specifications, for composite rules
    pub rules: Vec<RuleSpec>,
}

impl RuleSpec {
    /// Progression spec over an attribute or `number`
    pub fn progression(attribute: &str, step: i32) -> Self {
        Self {
            kind: "progression".to_string(),
            attribute: Some(attribute.to_string()),
            parameters: RuleParameters {
                step,
                ..RuleParameters::default()
            },
            rules: Vec::new(),
        }
    }

    /// Constant spec
    pub fn constant() -> Self {
        Self {
            kind: "constant".to_string(),
            attribute: None,
            parameters: RuleParameters::default(),
            rules: Vec::new(),
        }
    }

    /// Arithmetic spec over `size` or `color`
    pub fn arithmetic(attribute: &str, operation: &str) -> Self {
        Self {
            kind: "arithmetic".to_string(),
            attribute: Some(attribute.to_string()),
            parameters: RuleParameters {
                operation: Some(operation.to_string()),
                ..RuleParameters::default()
            },
            rules: Vec::new(),
        }
    }

    /// Distribute-three spec over a per-entity attribute
    pub fn distribute_three(attribute: &str) -> Self {
        Self {
            kind: "distribute_three".to_string(),
            attribute: Some(attribute.to_string()),
            parameters: RuleParameters::default(),
            rules: Vec::new(),
        }
    }

    /// Rotation spec
    pub fn rotation(step: i32, clockwise: bool) -> Self {
        Self {
            kind: "rotation".to_string(),
            attribute: None,
            parameters: RuleParameters {
                step,
                clockwise,
                ..RuleParameters::default()
            },
            rules: Vec::new(),
        }
    }

    /// Shift spec
    pub fn shift(direction: &str, step: i32) -> Self {
        Self {
            kind: "shift".to_string(),
            attribute: None,
            parameters: RuleParameters {
                step,
                direction: Some(direction.to_string()),
                ..RuleParameters::default()
            },
            rules: Vec::new(),
        }
    }

    /// Composite spec from an ordered sub-spec sequence
    pub fn composite(rules: Vec<Self>) -> Self {
        Self {
            kind: "composite".to_string(),
            attribute: None,
            parameters: RuleParameters::default(),
            rules,
        }
    }

    /// Draw a random well-formed specification
    ///
    /// Used when a configuration pins no rules: each puzzle gets one
    /// freshly sampled rule. Every returned spec builds successfully.
    pub fn sample(selector: &mut RandomSelector) -> Self {
        match selector.index(6) {
            0 => {
                let targets = ["type", "size", "angle", "color", "number"];
                let target = targets
                    .get(selector.index(targets.len()))
                    .copied()
                    .unwrap_or("size");
                let steps = [-2, -1, 1, 2];
                let step = steps.get(selector.index(steps.len())).copied().unwrap_or(1);
                Self::progression(target, step)
            }
            1 => Self::constant(),
            2 => {
                let attribute = if selector.coin() { "size" } else { "color" };
                let operation = if selector.coin() { "add" } else { "subtract" };
                Self::arithmetic(attribute, operation)
            }
            3 => {
                let attributes = ["type", "size", "angle", "color"];
                let attribute = attributes
                    .get(selector.index(attributes.len()))
                    .copied()
                    .unwrap_or("color");
                Self::distribute_three(attribute)
            }
            4 => Self::rotation(selector.range_value(1, 3), selector.coin()),
            _ => {
                let direction = ShiftDirection::ALL
                    .get(selector.index(ShiftDirection::ALL.len()))
                    .copied()
                    .unwrap_or(ShiftDirection::Right);
                Self::shift(direction.name(), selector.range_value(1, 2))
            }
        }
    }
}

/// Build a rule from its specification
///
/// The single dispatch point from configuration records to the closed
/// rule set.
///
/// # Errors
///
/// Returns [`GenerationError::UnknownRuleType`] for unrecognized kind
/// tags and forwards each variant's construction errors (unsupported
/// attributes, bad parameters, arity violations).
pub fn build_rule(spec: &RuleSpec) -> Result<Rule> {
    match spec.kind.as_str() {
        "progression" | "attribute.progression" => {
            let target = parse_target(spec, "progression")?;
            Ok(Rule::Progression(ProgressionRule::new(
                target,
                spec.parameters.step,
            )?))
        }
        "constant" | "attribute.constant" => Ok(Rule::Constant(ConstantRule::new())),
        "arithmetic" | "attribute.arithmetic" => {
            let attribute = parse_attribute(spec, "arithmetic")?;
            let op = parse_operation(&spec.parameters)?;
            Ok(Rule::Arithmetic(ArithmeticRule::new(attribute, op)?))
        }
        "distribute_three" | "attribute.distribute_three" => {
            let attribute = parse_attribute(spec, "distribute_three")?;
            Ok(Rule::DistributeThree(DistributeThreeRule::new(attribute)?))
        }
        "rotation" | "spatial.rotation" => Ok(Rule::Rotation(RotationRule::new(
            spec.parameters.step,
            spec.parameters.clockwise,
        ))),
        "shift" | "spatial.shift" => {
            let direction = parse_direction(&spec.parameters)?;
            Ok(Rule::Shift(ShiftRule::new(direction, spec.parameters.step)))
        }
        "composite" => {
            let sub_rules: Vec<Rule> = spec.rules.iter().map(build_rule).collect::<Result<_>>()?;
            Ok(Rule::Composite(CompositeRule::new(sub_rules)?))
        }
        other => Err(GenerationError::UnknownRuleType {
            name: other.to_string(),
        }),
    }
}

fn parse_target(spec: &RuleSpec, rule: &'static str) -> Result<Target> {
    let name = required_attribute(spec, rule)?;
    Target::from_name(name).ok_or_else(|| GenerationError::UnsupportedAttribute {
        rule,
        attribute: name.to_string(),
    })
}

fn parse_attribute(spec: &RuleSpec, rule: &'static str) -> Result<Attribute> {
    let name = required_attribute(spec, rule)?;
    Attribute::from_name(name).ok_or_else(|| GenerationError::UnsupportedAttribute {
        rule,
        attribute: name.to_string(),
    })
}

fn required_attribute<'a>(spec: &'a RuleSpec, rule: &'static str) -> Result<&'a str> {
    spec.attribute
        .as_deref()
        .ok_or_else(|| invalid_parameter("attribute", &"", &format!("{rule} requires an attribute")))
}

fn parse_operation(parameters: &RuleParameters) -> Result<ArithmeticOp> {
    match parameters.operation.as_deref() {
        Some("add") => Ok(ArithmeticOp::Add),
        Some("subtract") => Ok(ArithmeticOp::Subtract),
        Some(other) => Err(invalid_parameter(
            "operation",
            &other,
            &"arithmetic supports add and subtract",
        )),
        None => Err(invalid_parameter(
            "operation",
            &"",
            &"arithmetic requires an operation",
        )),
    }
}

fn parse_direction(parameters: &RuleParameters) -> Result<ShiftDirection> {
    match parameters.direction.as_deref() {
        Some(name) => ShiftDirection::from_name(name)
            .ok_or_else(|| invalid_parameter("direction", &name, &"not a shift direction")),
        None => Err(invalid_parameter(
            "direction",
            &"",
            &"shift requires a direction",
        )),
    }
}
