use super::{EffectRow, Evidence, Param, Predicate, RowTail, Type, TypeData, TypeVar};

/// Anything that holds types and can have them rewritten or inspected.
///
/// `map_types` hands each outermost type to `f`; the callee decides how deep to go.
pub trait TypeVisitor<D: TypeData> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, f: F) -> Self
    where
        Self: Sized;

    fn walk_types<F: FnMut(&Type<D>)>(&self, f: F);

    /// Type variables not bound by a quantifier within, in first-occurrence order
    fn free_vars(&self) -> Vec<TypeVar> {
        let mut out = vec![];
        self.walk_types(|t| t.collect_free_vars(&mut vec![], &mut out));
        out
    }

    fn free_constructors(&self) -> Vec<D::Concrete> {
        let mut out: Vec<D::Concrete> = vec![];
        self.walk_types(|t| {
            t.visit(&mut |t| {
                if let Type::Const(c) = t {
                    if !out.contains(c) {
                        out.push(c.clone());
                    }
                }
            })
        });
        out
    }
}

impl<D: TypeData> TypeVisitor<D> for Type<D> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, mut f: F) -> Self {
        f(self)
    }

    fn walk_types<F: FnMut(&Type<D>)>(&self, mut f: F) {
        f(self)
    }
}

impl<D: TypeData> TypeVisitor<D> for EffectRow<D> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, mut f: F) -> Self {
        let labels = self.labels.iter().map(&mut f).collect();
        match &self.tail {
            RowTail::Closed => EffectRow {
                labels,
                tail: RowTail::Closed,
            },
            RowTail::Open(tv) => EffectRow::with_tail_type(labels, tv, &f(&Type::Var(tv.clone()))),
        }
    }

    fn walk_types<F: FnMut(&Type<D>)>(&self, mut f: F) {
        self.labels.iter().for_each(&mut f);
        if let RowTail::Open(tv) = &self.tail {
            f(&Type::Var(tv.clone()));
        }
    }
}

impl<D: TypeData> TypeVisitor<D> for Predicate<D> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, mut f: F) -> Self {
        match self {
            Predicate::Subsumption(general, specific) => {
                Predicate::Subsumption(f(general), f(specific))
            }
            Predicate::Interface(name, args) => {
                Predicate::Interface(name.clone(), args.iter().map(f).collect())
            }
        }
    }

    fn walk_types<F: FnMut(&Type<D>)>(&self, mut f: F) {
        match self {
            Predicate::Subsumption(general, specific) => {
                f(general);
                f(specific);
            }
            Predicate::Interface(_, args) => args.iter().for_each(f),
        }
    }
}

impl<D: TypeData> TypeVisitor<D> for Param<D> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, mut f: F) -> Self {
        Param {
            name: self.name.clone(),
            ty: f(&self.ty),
        }
    }

    fn walk_types<F: FnMut(&Type<D>)>(&self, mut f: F) {
        f(&self.ty)
    }
}

impl<D: TypeData> TypeVisitor<D> for Evidence<D> {
    fn map_types<F: FnMut(&Type<D>) -> Type<D>>(&self, mut f: F) -> Self {
        let mut name = self.name.clone();
        name.ty = f(&self.name.ty);
        Evidence {
            name,
            predicate: self.predicate.map_types(f),
            range: self.range,
        }
    }

    fn walk_types<F: FnMut(&Type<D>)>(&self, mut f: F) {
        f(&self.name.ty);
        self.predicate.walk_types(f);
    }
}
