use crate::{
    EffectRow, Flavor, Predicate, Supply, Type, TypeData, TypeVar, TypeVisitor, Types, TypesBuf,
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use std::fmt;

/// A substitution from type variables to types
#[derive(Debug, Clone)]
pub struct Mapping<D: TypeData> {
    conversion: Vec<(TypeVar, Type<D>)>,
}

impl<D: TypeData> Default for Mapping<D> {
    fn default() -> Self {
        Self { conversion: vec![] }
    }
}

fn find<'a, T>(vars: &'a [(TypeVar, T)], tv: &TypeVar) -> Option<&'a T> {
    vars.iter()
        .find_map(|(v, t)| if v == tv { Some(t) } else { None })
}

impl<D: TypeData> Mapping<D> {
    /// Allocate one replacement of the same kind and of `flavor` for each of `vars`.
    ///
    /// `wrap` turns the replacement into the type `vars[n]` gets mapped to. The new variables are
    /// returned in the same order as `vars`.
    pub fn build_fresh(
        supply: &Supply,
        vars: &[TypeVar],
        flavor: Flavor,
        mut wrap: impl FnMut(TypeVar) -> Type<D>,
    ) -> (Vec<TypeVar>, Self) {
        let mut mapping = Mapping::default();
        let fresh = vars
            .iter()
            .map(|old| {
                let new = supply.fresh_type_var(old.kind.clone(), flavor);
                mapping.assign(old.clone(), wrap(new.clone()));
                new
            })
            .collect();
        (fresh, mapping)
    }

    /// [`Mapping::build_fresh`] with every replacement used as a bare variable
    pub fn fresh(supply: &Supply, vars: &[TypeVar], flavor: Flavor) -> (Vec<TypeVar>, Self) {
        Self::build_fresh(supply, vars, flavor, Type::Var)
    }

    pub fn is_empty(&self) -> bool {
        self.conversion.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conversion.len()
    }

    pub fn assign(&mut self, tv: TypeVar, t: Type<D>) {
        self.conversion.push((tv, t))
    }

    pub fn resolve(&self, tv: &TypeVar) -> Option<&Type<D>> {
        find(&self.conversion, tv)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TypeVar, Type<D>)> {
        self.conversion.iter()
    }

    /// The same mapping minus anything `shadowed` rebinds
    fn without(&self, shadowed: &[TypeVar]) -> Self {
        Self {
            conversion: self
                .conversion
                .iter()
                .filter(|(tv, _)| !shadowed.contains(tv))
                .cloned()
                .collect(),
        }
    }

    pub fn apply_type(&self, t: &Type<D>) -> Type<D> {
        if self.is_empty() {
            return t.clone();
        }

        match t {
            Type::Var(tv) => self.resolve(tv).cloned().unwrap_or_else(|| t.clone()),
            Type::Const(_) => t.clone(),
            Type::App { head, args } => Type::App {
                head: Box::new(self.apply_type(head)),
                args: self.apply_types(args),
            },
            Type::Quantified {
                vars,
                predicates,
                body,
            } => {
                let inner = self.without(vars);
                Type::Quantified {
                    vars: vars.clone(),
                    predicates: inner.apply_predicates(predicates),
                    body: Box::new(inner.apply_type(body)),
                }
            }
            Type::Function {
                params,
                effect,
                result,
            } => Type::Function {
                params: params.iter().map(|p| self.apply(p)).collect(),
                effect: Box::new(self.apply_row(effect)),
                result: Box::new(self.apply_type(result)),
            },
            Type::Synonym {
                alias,
                args,
                expansion,
            } => Type::Synonym {
                alias: alias.clone(),
                args: self.apply_types(args),
                expansion: Box::new(self.apply_type(expansion)),
            },
            Type::Row(row) => Type::row(self.apply_row(row)),
        }
    }

    pub fn apply_types(&self, types: &Types<D>) -> TypesBuf<D> {
        types.iter().map(|t| self.apply_type(t)).collect()
    }

    pub fn apply_row(&self, row: &EffectRow<D>) -> EffectRow<D> {
        self.apply(row)
    }

    pub fn apply_predicates(&self, predicates: &[Predicate<D>]) -> Vec<Predicate<D>> {
        predicates.iter().map(|p| self.apply(p)).collect()
    }

    /// Substitute within anything holding types
    pub fn apply<T: TypeVisitor<D>>(&self, value: &T) -> T {
        value.map_types(|t| self.apply_type(t))
    }
}

impl<D: TypeData> fmt::Display for Mapping<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.conversion.is_empty() {
            write!(
                f,
                "{} ({})",
                "converting".green(),
                self.conversion
                    .iter()
                    .format_with(" ", |(tv, t), f| f(&format_args!(
                        "{} {} {}",
                        tv,
                        "->".purple(),
                        t,
                    )))
            )?;
        }

        Ok(())
    }
}
