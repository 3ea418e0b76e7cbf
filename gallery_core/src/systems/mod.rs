pub mod hit;
pub mod movement;
pub mod spawn;
pub mod sweep;

pub use hit::*;
pub use movement::*;
pub use spawn::*;
pub use sweep::*;
