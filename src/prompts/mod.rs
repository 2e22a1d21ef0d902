pub mod calc;

pub use calc::build_calc_prompt;
