pub mod storage;
pub mod store;
pub mod types;

pub use storage::{load_user_store, save_user_store};
pub use store::UserStore;
pub use types::{User, UserError, UserRepository};
