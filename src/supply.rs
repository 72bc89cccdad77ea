use crate::{Flavor, InternalError, Kind, Type, TypeData, TypeVar};
use owo_colors::OwoColorize;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::trace;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct UniqueId(u32);

impl From<u32> for UniqueId {
    fn from(i: u32) -> UniqueId {
        UniqueId(i)
    }
}

impl UniqueId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Source of fresh identifiers for type variables and evidence.
///
/// Clones share one counter, so every worker checking units in parallel can hold its own handle
/// and still never observe an id twice.
#[derive(Clone, Debug, Default)]
pub struct Supply {
    next: Arc<AtomicU32>,
}

impl Supply {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u32) -> Self {
        Self {
            next: Arc::new(AtomicU32::new(first)),
        }
    }

    /// Panics with an internal compiler error once the id space is used up.
    pub fn next(&self) -> UniqueId {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(id) => UniqueId(id),
            Err(last) => InternalError::SupplyExhausted(last).raise(),
        }
    }

    /// The id the next allocation will receive
    pub fn peek(&self) -> UniqueId {
        UniqueId(self.next.load(Ordering::Relaxed))
    }

    pub fn fresh_type_var(&self, kind: Kind, flavor: Flavor) -> TypeVar {
        let tv = TypeVar::new(self.next(), kind, flavor);
        trace!(id = tv.id.0, kind = %tv.kind, flavor = flavor.describe(), "fresh type variable");
        tv
    }

    pub fn fresh_type_var_as_type<D: TypeData>(&self, kind: Kind, flavor: Flavor) -> Type<D> {
        Type::Var(self.fresh_type_var(kind, flavor))
    }

    pub fn fresh_type_vars(&self, kind: &Kind, flavor: Flavor, count: usize) -> Vec<TypeVar> {
        (0..count)
            .map(|_| self.fresh_type_var(kind.clone(), flavor))
            .collect()
    }

    pub fn fresh_skolems(&self, kind: &Kind, count: usize) -> Vec<TypeVar> {
        self.fresh_type_vars(kind, Flavor::Skolem, count)
    }

    /// A solvable effect variable, as used for reopened row tails
    pub fn fresh_effect<D: TypeData>(&self) -> Type<D> {
        self.fresh_type_var_as_type(Kind::Effect, Flavor::Meta)
    }

    /// An unconstrained placeholder of value kind
    pub fn fresh_star<D: TypeData>(&self) -> Type<D> {
        self.fresh_type_var_as_type(Kind::Star, Flavor::Meta)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", "next id".green(), self.peek())
    }
}
