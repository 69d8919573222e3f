//! Per-resource services: each owns its statements and transaction handling.

mod crud;
mod games;
mod purchases;
mod users;
mod validation;
mod wallets;

pub use crud::CrudService;
pub use games::GameService;
pub use purchases::{PurchaseFilter, PurchaseService};
pub use users::UserService;
pub use validation::RequestValidator;
pub use wallets::WalletService;
