pub mod error;
pub mod params;
pub mod presets;
pub mod settings;
pub mod state;
pub mod store;

pub use error::*;
pub use params::*;
pub use presets::*;
pub use settings::*;
pub use state::*;
pub use store::*;
