pub mod offer;
pub mod price;
pub mod profile;
pub mod rarity;

pub use offer::*;
pub use price::*;
pub use profile::*;
pub use rarity::*;
