pub mod balance_calculator;
pub mod consistency_validator;
pub mod settlement_planner;

pub use balance_calculator::BalanceCalculator;
pub use consistency_validator::ConsistencyValidator;
pub use settlement_planner::SettlementPlanner;
