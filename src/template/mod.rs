//! `{{path}}` template substitution over the execution context.

pub mod variable_resolver;

pub use variable_resolver::{
    extract_paths, render_str, render_value, substitute, substitute_deep, substitute_str,
    value_to_display,
};
