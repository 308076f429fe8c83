use minijinja::Environment;

// Re-export the case conversion and string manipulation functions
pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        snake::to_snake_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

/// Registers the filters every environment starts with, before any script filters.
///
/// They are handy for anchors and file names derived from class names.
pub fn register_native_filters(env: &mut Environment<'static>) {
    env.add_filter("camel_case", to_camel_case);
    env.add_filter("kebab_case", to_kebab_case);
    env.add_filter("pascal_case", to_pascal_case);
    env.add_filter("snake_case", to_snake_case);
    env.add_filter("plural", to_plural);
    env.add_filter("singular", to_singular);
}
