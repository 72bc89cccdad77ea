use crate::{split_pred_type, EffectRow, Predicate, Type, TypeData, TypeVar};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Param<D: TypeData> {
    /// Empty for anonymous parameters
    pub name: String,
    pub ty: Type<D>,
}

impl<D: TypeData> Param<D> {
    pub fn new(name: impl Into<String>, ty: Type<D>) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn anon(ty: Type<D>) -> Self {
        Self::new(String::new(), ty)
    }

    pub fn is_implicit(&self) -> bool {
        D::is_implicit_name(&self.name)
    }

    pub fn is_optional_or_implicit(&self) -> bool {
        is_optional_or_implicit(&self.name, &self.ty)
    }
}

pub fn is_optional_or_implicit<D: TypeData>(name: &str, ty: &Type<D>) -> bool {
    D::is_implicit_name(name) || ty.is_optional()
}

/// A parameter list cut into its three groups
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSplit<'p, D: TypeData> {
    pub fixed: &'p [Param<D>],
    pub optional: &'p [Param<D>],
    pub implicit: &'p [Param<D>],
}

/// Cut at the first optional-or-implicit parameter and then at the first one that isn't optional.
///
/// Parameters aren't reordered, so a list that doesn't already follow the
/// fixed/optional/implicit grouping splits at wherever the classification first changes.
pub fn split_optional_implicit<D: TypeData>(params: &[Param<D>]) -> ParamSplit<'_, D> {
    let at = params
        .iter()
        .position(Param::is_optional_or_implicit)
        .unwrap_or(params.len());
    let (fixed, rest) = params.split_at(at);

    let at = rest
        .iter()
        .position(|p| !p.ty.is_optional())
        .unwrap_or(rest.len());
    let (optional, implicit) = rest.split_at(at);

    ParamSplit {
        fixed,
        optional,
        implicit,
    }
}

pub fn has_optional_or_implicits<D: TypeData>(params: &[Param<D>]) -> bool {
    params.iter().any(Param::is_optional_or_implicit)
}

/// A function scheme taken apart
#[derive(Debug, Clone)]
pub struct FunScheme<'t, D: TypeData> {
    pub vars: Vec<TypeVar>,
    pub predicates: Vec<Predicate<D>>,
    pub params: &'t [Param<D>],
    pub effect: &'t EffectRow<D>,
    pub result: &'t Type<D>,
}

/// `None` if the scheme isn't a function once quantifiers are stripped and synonyms expanded
pub fn split_fun_scheme<D: TypeData>(scheme: &Type<D>) -> Option<FunScheme<'_, D>> {
    let split = split_pred_type(scheme);
    match split.rho.expand_head() {
        Type::Function {
            params,
            effect,
            result,
        } => Some(FunScheme {
            vars: split.vars,
            predicates: split.predicates,
            params,
            effect: &**effect,
            result,
        }),
        _ => None,
    }
}

/// The implicit parameters a function scheme expects to be supplied at the call site
pub fn requires_implicits<D: TypeData>(scheme: &Type<D>) -> Vec<Param<D>> {
    match split_fun_scheme(scheme) {
        Some(fun) => fun
            .params
            .iter()
            .filter(|p| p.is_implicit())
            .cloned()
            .collect(),
        None => vec![],
    }
}

impl<D: TypeData> fmt::Display for Param<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            self.ty.fmt(f)
        } else {
            write!(f, "{} : {}", self.name, self.ty)
        }
    }
}
