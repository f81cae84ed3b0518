//! The project description form: field state, validation, requirement
//! tags and the submit cycle that turns a form into a generated schema.

pub mod controller;
pub mod examples;
pub mod requirements;
pub mod types;
pub mod validation;

pub use controller::FormController;
pub use examples::{examples_view, find_example, ExampleProject, EXAMPLE_PROJECTS};
pub use requirements::RequirementSet;
pub use types::*;
pub use validation::{format_project_data, validate_field, validate_form};
