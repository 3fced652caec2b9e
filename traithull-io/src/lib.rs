//! File formats for traithull.
//!
//! - **Trait matrix** — header of trait names, one species per line
//! - **Plot matrix** — header of plot names, species-by-plot occurrence flags
//! - **Result output** — tab-separated rows via the `csv` writer

pub mod output;
pub mod plot_file;
pub mod trait_file;

pub use output::ResultWriter;
pub use plot_file::{parse_plot_matrix, read_plot_matrix};
pub use trait_file::{parse_trait_matrix, read_trait_matrix, read_trait_matrix_from};
