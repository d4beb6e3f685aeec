mod credential_scope;
pub(crate) use credential_scope::*;

mod lookup;
pub(crate) use lookup::*;

mod lookup_executor;
pub(crate) use lookup_executor::*;
