//! Form rendering module
//!
//! - `field_renderer`: text, choice and slider inputs
//! - `dish_form`: the dish form and the thank-you screen

mod dish_form;
mod field_renderer;

pub use dish_form::{draw_dish_form, draw_submitted, form_layout};
