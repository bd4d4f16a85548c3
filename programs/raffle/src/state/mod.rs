mod clock;
mod gateway;
mod ledger;
mod raffle;

pub use clock::*;
pub use gateway::*;
pub use ledger::*;
pub use raffle::*;
