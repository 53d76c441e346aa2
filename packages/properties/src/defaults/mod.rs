//! The default-value mini-language.
//!
//! Item default values are written as `TYPE_CODE:payload`:
//!
//! | Type code        | Payload                    | Source                          |
//! |------------------|----------------------------|---------------------------------|
//! | `APP_PARAMETER`  | parameter name             | application parameters          |
//! | `FORM_PARAMETER` | parameter name             | parameters of the owning form   |
//! | `BLOCK_ITEM`     | `block.item`               | focused record of another block |
//! | `CLASS_FIELD`    | `qualified.Class.FIELD`    | registered class constants      |

mod constants;
mod expression;
mod resolver;
mod source;

pub use constants::{ConstantRegistry, ConstantResolver};
pub use expression::{DefaultValue, DefaultValueType};
pub use resolver::DefaultValueResolver;
pub use source::{Block, DefaultValueSource, FormState};
