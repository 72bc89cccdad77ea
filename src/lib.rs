mod r#type;
pub use r#type::{Flavor, Key, Kind, Type, TypeData, TypeVar};

pub type TypesBuf<D> = Vec<Type<D>>;
pub type Types<D> = [Type<D>];

mod effect;
pub use effect::{EffectRow, Labels, RowTail};

mod forall;
pub use forall::{split_pred_type, Predicate, SplitScheme};

mod supply;
pub use supply::{Supply, UniqueId};

mod range;
pub use range::Range;

mod error;
pub use error::{validate_scheme, InternalError};

mod mapping;
pub use mapping::Mapping;

mod evidence;
pub use evidence::{make_evidence, name_for_predicate, Evidence, Name};

mod transform;
pub use transform::{Expr, ExprBuilder, Step, Transform};

mod params;
pub use params::{
    has_optional_or_implicits, is_optional_or_implicit, requires_implicits, split_fun_scheme,
    split_optional_implicit, FunScheme, Param, ParamSplit,
};

mod instantiate;
pub use instantiate::{
    extend_open_effect, instantiate, instantiate_ex, instantiate_no_ex, instantiate_with_flavor,
    instantiate_with_policy, skolemize, skolemize_ex, Instantiated, Policy,
};

mod visitor;
pub use visitor::TypeVisitor;
