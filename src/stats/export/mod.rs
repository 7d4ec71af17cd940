// Composes calculator output into one snapshot per player, plus a flat text
// rendering used as chat context.

mod generate;
mod models;
mod text;

pub use generate::generate_stats_export;
pub use models::*;
pub use text::stats_export_to_string;
