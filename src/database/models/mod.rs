pub mod house;
pub mod user;

pub use house::{House, HouseChanges, HouseCreateInput, HouseUpdateInput};
pub use user::{SignInInput, User, UserChanges, UserInput, UserUpdateInput};

use serde::Deserialize;
use uuid::Uuid;

/// Body of the delete endpoints; only the identifier is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteInput {
    pub id: Uuid,
}
