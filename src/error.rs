use crate::{split_pred_type, Type, TypeData, TypeVar};
use std::collections::HashSet;
use thiserror::Error;

/// A broken precondition. Never a diagnostic for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("type variable `{0}` is quantified more than once in the same scheme")]
    DuplicateQuantifier(String),

    #[error("effect row tail `{var}` was bound to `{bound}` which is not a row")]
    UnexpectedTailBinding { var: String, bound: String },

    #[error("unique id supply exhausted at {0}")]
    SupplyExhausted(u32),
}

impl InternalError {
    pub fn raise(self) -> ! {
        panic!("internal compiler error: {}", self)
    }
}

/// Every quantifier layer, leading or nested, binds distinct variables.
///
/// The leading layers are checked together since instantiation strips them as one.
pub fn validate_scheme<D: TypeData>(scheme: &Type<D>) -> Result<(), InternalError> {
    distinct_quantifiers(&split_pred_type(scheme).vars)?;

    let mut result = Ok(());
    scheme.visit(&mut |t| {
        if let Type::Quantified { vars, .. } = t {
            if result.is_ok() {
                result = distinct_quantifiers(vars);
            }
        }
    });
    result
}

pub(crate) fn distinct_quantifiers(vars: &[TypeVar]) -> Result<(), InternalError> {
    let mut seen = HashSet::with_capacity(vars.len());
    match vars.iter().find(|tv| !seen.insert(tv.id)) {
        Some(dup) => Err(InternalError::DuplicateQuantifier(dup.to_string())),
        None => Ok(()),
    }
}
