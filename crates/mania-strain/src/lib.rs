// N-key strain difficulty core: per-note strain evaluation and density reduction

mod decay;
mod density;
mod params;
mod preprocess;
mod strain;

pub use decay::apply_decay;
pub use density::note_density;
pub use params::StrainParams;
pub use preprocess::{DifficultyNote, preprocess};
pub use strain::{StrainEvaluator, strain_values};
