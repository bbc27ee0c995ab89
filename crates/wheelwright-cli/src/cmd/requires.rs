//! `wheelwright requires` - list extra build requirements.

/// Print each declared extra requirement on its own line. The list is
/// fixed and identical for wheel, sdist, and editable builds.
pub fn requires() {
    for requirement in wheelwright_core::build_requires() {
        println!("{requirement}");
    }
}
