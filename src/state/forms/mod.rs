//! Form domain layer
//!
//! Draft values, validation rules conditioned on the dish type, the request
//! payload and the submission lifecycle of the dish form.

mod dish;
mod field;
mod form_state;

pub use dish::{DishType, NewDish, SPICINESS_MAX, SPICINESS_MIN};
pub use field::{Field, InputKind};
pub use form_state::{DishForm, DisplayState, Focus, Form, SubmitAttempt};
