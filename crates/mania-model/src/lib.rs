// Chart data model for N-key (mania-style) charts: notes, validated charts, key modes

mod chart;
mod mode;
mod note;

pub use chart::Chart;
pub use mode::KeyMode;
pub use note::Note;
