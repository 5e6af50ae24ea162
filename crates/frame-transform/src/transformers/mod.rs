//! Built-in transformers.

mod append;
mod filter_by_name;
mod filter_by_ref_id;
mod organize;
mod reduce;

pub use append::AppendTransformer;
pub use filter_by_name::{FilterFieldsByNameOptions, FilterFieldsByNameTransformer};
pub use filter_by_ref_id::{FilterByRefIdOptions, FilterByRefIdTransformer};
pub use organize::{OrganizeFieldsOptions, OrganizeFieldsTransformer};
pub use reduce::{ReduceOptions, ReduceTransformer};
