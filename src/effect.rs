use crate::{InternalError, Type, TypeData, TypeVar};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

pub type Labels<D> = SmallVec<[Type<D>; 2]>;

/// An ordered row of effect labels
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRow<D: TypeData> {
    pub labels: Labels<D>,
    pub tail: RowTail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowTail {
    /// Fully enumerated; no label may ever be added
    Closed,
    /// Extensible at the given effect variable
    Open(TypeVar),
}

impl<D: TypeData> EffectRow<D> {
    pub fn closed(labels: impl IntoIterator<Item = Type<D>>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
            tail: RowTail::Closed,
        }
    }

    pub fn open(labels: impl IntoIterator<Item = Type<D>>, tail: TypeVar) -> Self {
        Self {
            labels: labels.into_iter().collect(),
            tail: RowTail::Open(tail),
        }
    }

    /// The empty closed row
    pub fn total() -> Self {
        Self::closed(std::iter::empty())
    }

    pub fn is_closed(&self) -> bool {
        self.tail == RowTail::Closed
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    pub fn tail_var(&self) -> Option<&TypeVar> {
        match &self.tail {
            RowTail::Open(tv) => Some(tv),
            RowTail::Closed => None,
        }
    }

    /// Same labels, extensible at `tail`
    #[must_use]
    pub fn reopen(mut self, tail: TypeVar) -> Self {
        self.tail = RowTail::Open(tail);
        self
    }

    /// Build a row from `labels` followed by whatever the tail variable was bound to.
    ///
    /// A bound variable reopens the row at that variable and a bound row has its labels spliced
    /// in after ours. Anything else can not stand in for a row.
    pub fn with_tail_type(mut labels: Labels<D>, old: &TypeVar, bound: &Type<D>) -> Self {
        match bound.expand_head() {
            Type::Var(tv) => Self {
                labels,
                tail: RowTail::Open(tv.clone()),
            },
            Type::Row(row) => {
                labels.extend(row.labels.iter().cloned());
                Self {
                    labels,
                    tail: row.tail.clone(),
                }
            }
            other => InternalError::UnexpectedTailBinding {
                var: old.to_string(),
                bound: other.to_string(),
            }
            .raise(),
        }
    }

    pub fn visit<F: FnMut(&Type<D>)>(&self, f: &mut F) {
        self.labels.iter().for_each(|l| l.visit(f));
    }

    pub(crate) fn collect_free_vars(&self, bound: &mut Vec<TypeVar>, out: &mut Vec<TypeVar>) {
        self.labels
            .iter()
            .for_each(|l| l.collect_free_vars(bound, out));
        if let RowTail::Open(tv) = &self.tail {
            crate::r#type::push_free(tv, bound, out);
        }
    }
}

impl<D: TypeData> fmt::Display for EffectRow<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.tail {
            RowTail::Closed => write!(f, "<{}>", self.labels.iter().format(", ")),
            RowTail::Open(tv) if self.labels.is_empty() => tv.fmt(f),
            RowTail::Open(tv) => write!(f, "<{} | {}>", self.labels.iter().format(", "), tv),
        }
    }
}
