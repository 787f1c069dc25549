pub mod market;
pub mod profiles;

pub use market::MarketQuery;
pub use profiles::ProfileQuery;
