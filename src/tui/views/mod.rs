mod diagram;
mod panels;

pub use diagram::{draw_diagram, DiagramStyle};
pub use panels::{draw_detail_popup, draw_legend, draw_tabs};
