use crate::{Evidence, Type, TypeData, TypesBuf};
use itertools::Itertools;
use std::fmt;
use tracing::trace;

/// The constructors instantiation needs from the expression representation.
///
/// Neither inspects `self`, they only wrap it.
pub trait ExprBuilder<D: TypeData>: Sized {
    /// Explicit type application
    fn type_app(self, args: TypesBuf<D>) -> Self;

    /// Coerce a function with a closed effect row to the same function with the row reopened.
    /// Has no runtime effect.
    fn open_effect(self, from: Type<D>, to: Type<D>) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step<D: TypeData> {
    TypeApp(TypesBuf<D>),
    OpenEffect { from: Type<D>, to: Type<D> },
}

/// A deferred adjustment of the expression whose type was instantiated.
///
/// Steps run in order, each wrapping the result of the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform<D: TypeData> {
    steps: Vec<Step<D>>,
}

impl<D: TypeData> Default for Transform<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<D: TypeData> Transform<D> {
    pub fn identity() -> Self {
        Self { steps: vec![] }
    }

    pub fn type_app(args: TypesBuf<D>) -> Self {
        if args.is_empty() {
            Self::identity()
        } else {
            Self {
                steps: vec![Step::TypeApp(args)],
            }
        }
    }

    pub fn open_effect(from: Type<D>, to: Type<D>) -> Self {
        Self {
            steps: vec![Step::OpenEffect { from, to }],
        }
    }

    /// Apply `self` and then `after`
    #[must_use]
    pub fn then(mut self, after: Self) -> Self {
        self.steps.extend(after.steps);
        self
    }

    /// Where evidence arguments would be passed to the instantiated expression.
    ///
    /// Evidence isn't wired into expressions yet, so this leaves the transform as it is.
    #[must_use]
    pub fn with_evidence_args(self, evidence: &[Evidence<D>]) -> Self {
        if !evidence.is_empty() {
            trace!(count = evidence.len(), "evidence arguments left unapplied");
        }
        self
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step<D>] {
        &self.steps
    }

    pub fn apply<E: ExprBuilder<D>>(&self, expr: E) -> E {
        self.steps.iter().fold(expr, |expr, step| match step {
            Step::TypeApp(args) => expr.type_app(args.clone()),
            Step::OpenEffect { from, to } => expr.open_effect(from.clone(), to.clone()),
        })
    }
}

/// Minimal expression tree, enough to observe what a [`Transform`] does.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<D: TypeData> {
    Var(String),
    TypeApp(Box<Self>, TypesBuf<D>),
    OpenEffect {
        from: Type<D>,
        to: Type<D>,
        expr: Box<Self>,
    },
}

impl<D: TypeData> Expr<D> {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }
}

impl<D: TypeData> ExprBuilder<D> for Expr<D> {
    fn type_app(self, args: TypesBuf<D>) -> Self {
        Expr::TypeApp(Box::new(self), args)
    }

    fn open_effect(self, from: Type<D>, to: Type<D>) -> Self {
        Expr::OpenEffect {
            from,
            to,
            expr: Box::new(self),
        }
    }
}

impl<D: TypeData> fmt::Display for Expr<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => name.fmt(f),
            Expr::TypeApp(expr, args) => write!(f, "{}[{}]", expr, args.iter().format(", ")),
            Expr::OpenEffect { to, expr, .. } => write!(f, "open({} : {})", expr, to),
        }
    }
}

impl<D: TypeData> fmt::Display for Step<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::TypeApp(args) => write!(f, "[{}]", args.iter().format(", ")),
            Step::OpenEffect { from, to } => write!(f, "open {} ~> {}", from, to),
        }
    }
}

impl<D: TypeData> fmt::Display for Transform<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_identity() {
            "id".fmt(f)
        } else {
            self.steps.iter().format(" ; ").fmt(f)
        }
    }
}
