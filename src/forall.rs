use crate::{EffectRow, Type, TypeData, TypeVar, TypesBuf};
use itertools::Itertools;
use std::fmt;

/// A proof obligation attached to a quantified type
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<D: TypeData> {
    /// The first type must be at least as general as the second
    Subsumption(Type<D>, Type<D>),
    Interface(D::Interface, TypesBuf<D>),
}

impl<D: TypeData> Predicate<D> {
    pub fn subsumption(general: Type<D>, specific: Type<D>) -> Self {
        Predicate::Subsumption(general, specific)
    }

    pub fn interface(name: D::Interface, args: TypesBuf<D>) -> Self {
        Predicate::Interface(name, args)
    }

    /// The type evidence for this predicate has.
    ///
    /// A subsumption is witnessed by a total coercion function and an interface by a dictionary.
    pub fn to_type(&self) -> Type<D> {
        match self {
            Predicate::Subsumption(general, specific) => {
                Type::function(vec![general.clone()], EffectRow::total(), specific.clone())
            }
            Predicate::Interface(name, args) => {
                Type::concrete(D::interface_constr(name), args.clone())
            }
        }
    }

    pub fn visit<F: FnMut(&Type<D>)>(&self, f: &mut F) {
        match self {
            Predicate::Subsumption(general, specific) => {
                general.visit(f);
                specific.visit(f);
            }
            Predicate::Interface(_, args) => args.iter().for_each(|t| t.visit(f)),
        }
    }

    pub(crate) fn collect_free_vars(&self, bound: &mut Vec<TypeVar>, out: &mut Vec<TypeVar>) {
        match self {
            Predicate::Subsumption(general, specific) => {
                general.collect_free_vars(bound, out);
                specific.collect_free_vars(bound, out);
            }
            Predicate::Interface(_, args) => {
                args.iter().for_each(|t| t.collect_free_vars(bound, out))
            }
        }
    }
}

/// A type scheme taken apart into its quantifiers, its predicates and the rho type beneath them.
#[derive(Debug, Clone)]
pub struct SplitScheme<'t, D: TypeData> {
    pub vars: Vec<TypeVar>,
    pub predicates: Vec<Predicate<D>>,
    pub rho: &'t Type<D>,
}

impl<'t, D: TypeData> SplitScheme<'t, D> {
    pub fn is_mono(&self) -> bool {
        self.vars.is_empty() && self.predicates.is_empty()
    }
}

/// Strip every leading quantifier layer, gathering the variables and predicates in order.
///
/// Synonyms are looked through to find a quantifier, but a rho that isn't quantified is returned
/// as written.
pub fn split_pred_type<D: TypeData>(scheme: &Type<D>) -> SplitScheme<'_, D> {
    let mut split = SplitScheme {
        vars: vec![],
        predicates: vec![],
        rho: scheme,
    };

    let mut rho = scheme;
    while let Type::Quantified {
        vars,
        predicates,
        body,
    } = rho.expand_head()
    {
        split.vars.extend(vars.iter().cloned());
        split.predicates.extend(predicates.iter().cloned());
        rho = body.as_ref();
    }

    split.rho = rho;
    split
}

impl<D: TypeData> fmt::Display for Predicate<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Subsumption(general, specific) => write!(f, "{} ⊑ {}", general, specific),
            Predicate::Interface(name, args) if args.is_empty() => name.fmt(f),
            Predicate::Interface(name, args) => {
                write!(f, "{} {}", name, args.iter().format(" "))
            }
        }
    }
}

impl<'t, D: TypeData> fmt::Display for SplitScheme<'t, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.vars.is_empty() {
            write!(f, "forall<{}> ", self.vars.iter().format(", "))?;
        }
        if !self.predicates.is_empty() {
            write!(f, "{} => ", self.predicates.iter().format(", "))?;
        }
        self.rho.fmt(f)
    }
}
