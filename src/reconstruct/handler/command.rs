use crate::reconstruct::option::same_sequence;
use crate::util::quote::{double_quote, quote_arg};

fn changed<'v>(values: &'v [String], image: &[String]) -> Option<&'v [String]> {
    if values.is_empty() || same_sequence(values, image) {
        None
    } else {
        Some(values)
    }
}

/// `--entrypoint="…"` when the entrypoint was overridden.
pub fn entrypoint(values: &[String], image: &[String]) -> Vec<String> {
    changed(values, image)
        .map(|values| format!("--entrypoint={}", double_quote(&values.join(" "))))
        .into_iter()
        .collect()
}

/// The trailing command, each argument quoted on its own so the shell splits it back the same way.
pub fn command(values: &[String], image: &[String]) -> Vec<String> {
    changed(values, image)
        .map(|values| values.iter().map(|value| quote_arg(value)).collect::<Vec<_>>().join(" "))
        .into_iter()
        .collect()
}
