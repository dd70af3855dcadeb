pub mod drawing;
pub mod effects;
pub mod errors;
pub mod guess;
pub mod questions;
pub mod registry;
pub mod room;
pub mod round;
pub mod scoring;
pub mod sessions;
pub mod settings;

// Re-export main components
pub use drawing::*;
pub use effects::*;
pub use errors::*;
pub use guess::*;
pub use questions::*;
pub use registry::*;
pub use room::*;
pub use scoring::*;
pub use sessions::*;
pub use settings::*;
