use crate::error::distinct_quantifiers;
use crate::{
    make_evidence, split_pred_type, Evidence, Flavor, Kind, Mapping, Range, Supply, Transform,
    Type, TypeData, TypeVar,
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use std::fmt;
use tracing::{debug, trace};

/// What an instantiation produced.
#[derive(Debug, Clone)]
pub struct Instantiated<D: TypeData> {
    /// The fresh variables, in the order of the quantifiers they replaced
    pub vars: Vec<TypeVar>,
    /// One per predicate, in order
    pub evidence: Vec<Evidence<D>>,
    pub rho: Type<D>,
    pub transform: Transform<D>,
}

impl<D: TypeData> Instantiated<D> {
    fn unchanged(rho: Type<D>) -> Self {
        Self {
            vars: vec![],
            evidence: vec![],
            rho,
            transform: Transform::identity(),
        }
    }
}

/// How a scheme gets instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub flavor: Flavor,
    /// Reopen a closed effect row on the resulting function type.
    ///
    /// Ignored for skolems.
    pub extend_effects: bool,
}

impl Policy {
    pub const INSTANTIATE: Policy = Policy {
        flavor: Flavor::Meta,
        extend_effects: true,
    };

    pub const INSTANTIATE_NO_EX: Policy = Policy {
        flavor: Flavor::Meta,
        extend_effects: false,
    };

    pub const SKOLEMIZE: Policy = Policy {
        flavor: Flavor::Skolem,
        extend_effects: false,
    };

    pub fn extends_effects(&self) -> bool {
        self.extend_effects && self.flavor != Flavor::Skolem
    }
}

/// Replace the leading quantifiers of a scheme with fresh variables of the given flavor.
///
/// Each predicate becomes a piece of evidence. A scheme with neither quantifiers nor predicates
/// comes back unchanged, with an identity transform and nothing drawn from the supply.
pub fn instantiate_with_flavor<D: TypeData>(
    supply: &Supply,
    flavor: Flavor,
    range: Range,
    scheme: &Type<D>,
) -> Instantiated<D> {
    let split = split_pred_type(scheme);
    if split.is_mono() {
        return Instantiated::unchanged(split.rho.clone());
    }

    if let Err(err) = distinct_quantifiers(&split.vars) {
        err.raise();
    }

    debug!(
        flavor = flavor.describe(),
        %range,
        vars = split.vars.len(),
        predicates = split.predicates.len(),
        "instantiating scheme"
    );

    let (vars, mapping) = Mapping::fresh(supply, &split.vars, flavor);
    let rho = mapping.apply_type(split.rho);

    let evidence = split
        .predicates
        .iter()
        .map(|p| make_evidence(supply, mapping.apply(p), range))
        .collect::<Vec<_>>();

    let transform = Transform::type_app(vars.iter().cloned().map(Type::Var).collect())
        .with_evidence_args(&evidence);

    Instantiated {
        vars,
        evidence,
        rho,
        transform,
    }
}

/// Reopen the effect row of a function type if it's closed.
///
/// The returned transform coerces the expression from the closed to the opened type. Anything
/// other than a function with a closed row is returned as is.
pub fn extend_open_effect<D: TypeData>(supply: &Supply, rho: Type<D>) -> (Type<D>, Transform<D>) {
    let opened = match rho.expand_head() {
        Type::Function {
            params,
            effect,
            result,
        } if effect.is_closed() => {
            let tail = supply.fresh_type_var(Kind::Effect, Flavor::Meta);
            trace!(tail = %tail, effect = %effect, "reopening closed effect row");
            Some(Type::Function {
                params: params.clone(),
                effect: Box::new(effect.as_ref().clone().reopen(tail)),
                result: result.clone(),
            })
        }
        _ => None,
    };

    match opened {
        Some(opened) => {
            let coercion = Transform::open_effect(rho, opened.clone());
            (opened, coercion)
        }
        None => (rho, Transform::identity()),
    }
}

pub fn instantiate_with_policy<D: TypeData>(
    supply: &Supply,
    policy: Policy,
    range: Range,
    scheme: &Type<D>,
) -> Instantiated<D> {
    let inst = instantiate_with_flavor(supply, policy.flavor, range, scheme);
    if !policy.extends_effects() {
        return inst;
    }

    let Instantiated {
        vars,
        evidence,
        rho,
        transform,
    } = inst;
    let (rho, coercion) = extend_open_effect(supply, rho);

    Instantiated {
        vars,
        evidence,
        rho,
        transform: transform.then(coercion),
    }
}

/// Instantiate with fresh meta variables, reopening a closed effect row.
pub fn instantiate<D: TypeData>(supply: &Supply, range: Range, scheme: &Type<D>) -> Type<D> {
    instantiate_ex(supply, range, scheme).rho
}

pub fn instantiate_ex<D: TypeData>(
    supply: &Supply,
    range: Range,
    scheme: &Type<D>,
) -> Instantiated<D> {
    instantiate_with_policy(supply, Policy::INSTANTIATE, range, scheme)
}

/// Instantiate with fresh meta variables, leaving effect rows as written.
pub fn instantiate_no_ex<D: TypeData>(
    supply: &Supply,
    range: Range,
    scheme: &Type<D>,
) -> Instantiated<D> {
    instantiate_with_policy(supply, Policy::INSTANTIATE_NO_EX, range, scheme)
}

/// Replace the quantifiers by skolems. The declared shape, effect rows included, is kept exactly.
pub fn skolemize<D: TypeData>(supply: &Supply, range: Range, scheme: &Type<D>) -> Type<D> {
    skolemize_ex(supply, range, scheme).rho
}

pub fn skolemize_ex<D: TypeData>(
    supply: &Supply,
    range: Range,
    scheme: &Type<D>,
) -> Instantiated<D> {
    instantiate_with_policy(supply, Policy::SKOLEMIZE, range, scheme)
}

impl<D: TypeData> fmt::Display for Instantiated<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.rho)?;
        if !self.vars.is_empty() {
            write!(
                f,
                "\n  {} {}",
                "fresh".green(),
                self.vars.iter().format(", ")
            )?;
        }
        for evidence in &self.evidence {
            write!(f, "\n  {} {}", "evidence".green(), evidence)?;
        }
        write!(f, "\n  {} {}", "transform".green(), self.transform)
    }
}
