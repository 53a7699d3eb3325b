pub use contact::*;
pub use errors::{
    json_config,
    query_config,
    FieldError,
    RouteError,
};
pub use health_check::{
    health_check,
    root,
};
pub use newsletter::*;
pub use pagination::Pagination;
pub use status::*;

mod contact;
mod errors;
mod health_check;
mod newsletter;
mod pagination;
mod status;
