pub use crate::{
    db::user::{Id, Role, User},
    validation::NewUser,
};
