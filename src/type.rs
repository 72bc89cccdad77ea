use crate::{EffectRow, Param, Predicate, UniqueId};
use itertools::Itertools;
use std::fmt;
use std::hash::{Hash, Hasher};

pub trait TypeData: Sized + fmt::Debug + Clone + PartialEq {
    type Concrete: Key;
    type Interface: Key;
    type Alias: Key;

    /// Gets instantiated during formatting so that fancy containers like tuples can be pretty printed
    fn fmt_specific(
        constr: &Self::Concrete,
        args: &[Type<Self>],
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        Type::fmt_with_args(constr, args, f)
    }

    /// The type constructor an interface predicate is encoded as when attached to evidence.
    fn interface_constr(name: &Self::Interface) -> Self::Concrete;

    /// Whether `constr` is the wrapper marking a parameter as optional
    fn is_optional_constr(_constr: &Self::Concrete) -> bool {
        false
    }

    fn is_implicit_name(name: &str) -> bool {
        name.starts_with('?')
    }
}

pub trait Key: PartialEq + Eq + fmt::Debug + Clone + Hash + fmt::Display {}

impl<'a> Key for &'a str {}
impl Key for usize {}
impl Key for u32 {}
impl Key for u16 {}
impl Key for u8 {}
impl Key for char {}
impl Key for String {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Star,
    Effect,
    Label,
    Arrow(Box<Kind>, Box<Kind>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Solvable unification variable
    Meta,
    /// Rigid constant, never unified with anything but itself
    Skolem,
    /// Placeholder bound by a quantifier
    Bound,
}

/// A type variable. Identity is the `id` alone; kind, flavor and name are carried along but never
/// compared.
#[derive(Debug, Clone)]
pub struct TypeVar {
    pub id: UniqueId,
    pub kind: Kind,
    pub flavor: Flavor,
    pub name: Option<String>,
}

impl TypeVar {
    pub fn new(id: UniqueId, kind: Kind, flavor: Flavor) -> Self {
        Self { id, kind, flavor, name: None }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeVar {}

impl Hash for TypeVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type<D: TypeData> {
    Var(TypeVar),
    Const(D::Concrete),
    App {
        head: Box<Self>,
        args: Vec<Self>,
    },
    /// `forall vars. predicates => body`
    ///
    /// The body may itself contain quantifiers in parameter or result position.
    Quantified {
        vars: Vec<TypeVar>,
        predicates: Vec<Predicate<D>>,
        body: Box<Self>,
    },
    Function {
        params: Vec<Param<D>>,
        effect: Box<EffectRow<D>>,
        result: Box<Self>,
    },
    /// A type alias kept around for display. `expansion` is what it stands for.
    Synonym {
        alias: D::Alias,
        args: Vec<Self>,
        expansion: Box<Self>,
    },
    /// An effect row in type position, as the argument of an effect-kinded variable.
    Row(Box<EffectRow<D>>),
}

impl<D: TypeData> Type<D> {
    pub fn var(tv: TypeVar) -> Self {
        Type::Var(tv)
    }

    pub fn constant(constr: D::Concrete) -> Self {
        Type::Const(constr)
    }

    pub fn app(head: Self, args: Vec<Self>) -> Self {
        Type::App { head: Box::new(head), args }
    }

    pub fn concrete(constr: D::Concrete, args: Vec<Self>) -> Self {
        if args.is_empty() {
            Type::Const(constr)
        } else {
            Type::app(Type::Const(constr), args)
        }
    }

    /// Function with anonymous parameters
    pub fn function(params: Vec<Self>, effect: EffectRow<D>, result: Self) -> Self {
        Type::function_named(params.into_iter().map(Param::anon).collect(), effect, result)
    }

    pub fn function_named(params: Vec<Param<D>>, effect: EffectRow<D>, result: Self) -> Self {
        Type::Function {
            params,
            effect: Box::new(effect),
            result: Box::new(result),
        }
    }

    pub fn forall(vars: Vec<TypeVar>, predicates: Vec<Predicate<D>>, body: Self) -> Self {
        Type::Quantified {
            vars,
            predicates,
            body: Box::new(body),
        }
    }

    pub fn synonym(alias: D::Alias, args: Vec<Self>, expansion: Self) -> Self {
        Type::Synonym {
            alias,
            args,
            expansion: Box::new(expansion),
        }
    }

    pub fn row(row: EffectRow<D>) -> Self {
        Type::Row(Box::new(row))
    }

    /// Peel exactly one synonym layer
    pub fn expand_synonym(&self) -> Option<&Self> {
        match self {
            Type::Synonym { expansion, .. } => Some(expansion),
            _ => None,
        }
    }

    /// Peel synonym layers until the head is a structural type
    pub fn expand_head(&self) -> &Self {
        let mut t = self;
        while let Some(expanded) = t.expand_synonym() {
            t = expanded;
        }
        t
    }

    pub fn as_var(&self) -> Option<&TypeVar> {
        match self.expand_head() {
            Type::Var(tv) => Some(tv),
            _ => None,
        }
    }

    /// No quantifier at the outermost layer
    pub fn is_rho(&self) -> bool {
        !matches!(self.expand_head(), Type::Quantified { .. })
    }

    /// No quantifier anywhere
    pub fn is_tau(&self) -> bool {
        let mut tau = true;
        self.visit(&mut |t| {
            if let Type::Quantified { .. } = t {
                tau = false;
            }
        });
        tau
    }

    pub fn is_optional(&self) -> bool {
        match self.expand_head() {
            Type::App { head, args } if args.len() == 1 => {
                matches!(head.expand_head(), Type::Const(c) if D::is_optional_constr(c))
            }
            _ => false,
        }
    }

    /// Pre-order walk over every type node, including types held by nested predicates and the
    /// labels of effect rows.
    pub fn visit<F: FnMut(&Self)>(&self, f: &mut F) {
        f(self);
        match self {
            Type::Var(_) | Type::Const(_) => {}
            Type::App { head, args } => {
                head.visit(f);
                args.iter().for_each(|t| t.visit(f));
            }
            Type::Quantified { predicates, body, .. } => {
                predicates.iter().for_each(|p| p.visit(f));
                body.visit(f);
            }
            Type::Function {
                params,
                effect,
                result,
            } => {
                params.iter().for_each(|p| p.ty.visit(f));
                effect.visit(f);
                result.visit(f);
            }
            Type::Synonym {
                args, expansion, ..
            } => {
                args.iter().for_each(|t| t.visit(f));
                expansion.visit(f);
            }
            Type::Row(row) => row.visit(f),
        }
    }

    /// Collect the variables not bound by an enclosing quantifier, in first-occurrence order.
    pub(crate) fn collect_free_vars(&self, bound: &mut Vec<TypeVar>, out: &mut Vec<TypeVar>) {
        match self {
            Type::Var(tv) => push_free(tv, bound, out),
            Type::Const(_) => {}
            Type::App { head, args } => {
                head.collect_free_vars(bound, out);
                args.iter().for_each(|t| t.collect_free_vars(bound, out));
            }
            Type::Quantified {
                vars,
                predicates,
                body,
            } => {
                let depth = bound.len();
                bound.extend(vars.iter().cloned());
                predicates
                    .iter()
                    .for_each(|p| p.collect_free_vars(bound, out));
                body.collect_free_vars(bound, out);
                bound.truncate(depth);
            }
            Type::Function {
                params,
                effect,
                result,
            } => {
                params
                    .iter()
                    .for_each(|p| p.ty.collect_free_vars(bound, out));
                effect.collect_free_vars(bound, out);
                result.collect_free_vars(bound, out);
            }
            Type::Synonym {
                args, expansion, ..
            } => {
                args.iter().for_each(|t| t.collect_free_vars(bound, out));
                expansion.collect_free_vars(bound, out);
            }
            Type::Row(row) => row.collect_free_vars(bound, out),
        }
    }

    pub fn fmt_with_args(
        v: impl fmt::Display,
        args: &[Self],
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        if args.is_empty() {
            v.fmt(f)
        } else {
            write!(f, "{}<{}>", v, args.iter().format(", "))
        }
    }
}

pub(crate) fn push_free(tv: &TypeVar, bound: &[TypeVar], out: &mut Vec<TypeVar>) {
    if !bound.contains(tv) && !out.contains(tv) {
        out.push(tv.clone());
    }
}

impl Flavor {
    pub fn describe(&self) -> &'static str {
        match self {
            Flavor::Meta => "meta",
            Flavor::Skolem => "skolem",
            Flavor::Bound => "bound",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Flavor::Meta => "_",
            Flavor::Skolem => "$",
            Flavor::Bound => "'",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Star => "V".fmt(f),
            Kind::Effect => "E".fmt(f),
            Kind::Label => "X".fmt(f),
            Kind::Arrow(from, to) => write!(f, "({} -> {})", from, to),
        }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => name.fmt(f),
            None => write!(f, "{}{}", self.flavor.prefix(), self.id),
        }
    }
}

impl<D: TypeData> fmt::Display for Type<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Var(tv) => tv.fmt(f),
            Type::Const(c) => D::fmt_specific(c, &[], f),
            Type::App { head, args } => match head.as_ref() {
                Type::Const(c) => D::fmt_specific(c, args, f),
                other => Type::fmt_with_args(other, args, f),
            },
            Type::Quantified {
                vars,
                predicates,
                body,
            } => {
                if !vars.is_empty() {
                    write!(f, "forall<{}> ", vars.iter().format(", "))?;
                }
                if !predicates.is_empty() {
                    write!(f, "{} => ", predicates.iter().format(", "))?;
                }
                body.fmt(f)
            }
            Type::Function {
                params,
                effect,
                result,
            } => write!(f, "({}) -> {} {}", params.iter().format(", "), effect, result),
            Type::Synonym { alias, args, .. } => Type::fmt_with_args(alias, args, f),
            Type::Row(row) => row.fmt(f),
        }
    }
}
