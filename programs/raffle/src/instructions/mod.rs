pub mod admin;
pub mod enter_raffle;
pub mod fulfill_randomness;
pub mod perform_upkeep;
pub mod view;

pub use admin::*;
pub use enter_raffle::*;
pub use fulfill_randomness::*;
pub use perform_upkeep::*;
pub use view::*;
