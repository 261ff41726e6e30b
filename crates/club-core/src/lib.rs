pub mod audio;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod locomotion;
pub mod mapper;
pub mod resource;
pub mod scene;
pub mod session;
pub mod state;

pub use audio::*;
pub use config::*;
pub use constants::*;
pub use effects::*;
pub use error::*;
pub use locomotion::*;
pub use mapper::*;
pub use resource::*;
pub use scene::*;
pub use session::*;
pub use state::*;
