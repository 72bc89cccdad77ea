use crate::{Predicate, Range, Supply, Type, TypeData, UniqueId};
use std::fmt;
use tracing::trace;

/// A globally unique name carrying the type of the value it will be bound to
#[derive(Debug, Clone, PartialEq)]
pub struct Name<D: TypeData> {
    pub id: UniqueId,
    pub root: String,
    pub ty: Type<D>,
}

/// An unresolved proof of `predicate`.
///
/// Constraint resolution is expected to bind `name` to a witness later on.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence<D: TypeData> {
    pub name: Name<D>,
    pub predicate: Predicate<D>,
    pub range: Range,
}

impl Supply {
    pub fn fresh_name<D: TypeData>(&self, root: impl Into<String>, ty: Type<D>) -> Name<D> {
        Name {
            id: self.next(),
            root: root.into(),
            ty,
        }
    }
}

/// Readable root for the evidence name of `predicate`
pub fn name_for_predicate<D: TypeData>(predicate: &Predicate<D>) -> String {
    match predicate {
        Predicate::Subsumption(..) => String::from("sub"),
        Predicate::Interface(name, _) => name.to_string(),
    }
}

pub fn make_evidence<D: TypeData>(
    supply: &Supply,
    predicate: Predicate<D>,
    range: Range,
) -> Evidence<D> {
    let name = supply.fresh_name(name_for_predicate(&predicate), predicate.to_type());
    trace!(name = %name, predicate = %predicate, %range, "evidence");
    Evidence {
        name,
        predicate,
        range,
    }
}

impl<D: TypeData> fmt::Display for Name<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.root, self.id)
    }
}

impl<D: TypeData> fmt::Display for Evidence<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} : {} @ {}", self.name, self.predicate, self.range)
    }
}
