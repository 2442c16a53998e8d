pub mod kdl;
pub mod settings;

pub use settings::{KmodNaming, PluginConfig};
