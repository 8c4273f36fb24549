//! Charts module - dashboard chart drawing

mod plotter;

pub use plotter::ChartPlotter;
