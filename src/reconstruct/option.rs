use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::util::quote::quote_arg;

/// A single comparable setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Bool(bool),
}

impl<'a> From<&'a str> for ScalarValue<'a> {
    fn from(value: &'a str) -> Self {
        ScalarValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for ScalarValue<'a> {
    fn from(value: &'a String) -> Self {
        ScalarValue::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for ScalarValue<'_> {
    fn from(value: String) -> Self {
        ScalarValue::Text(Cow::Owned(value))
    }
}

impl From<i64> for ScalarValue<'_> {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<bool> for ScalarValue<'_> {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl Display for ScalarValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Text(text) => f.write_str(&quote_arg(text)),
            ScalarValue::Int(n) => n.fmt(f),
            ScalarValue::Bool(b) => b.fmt(f),
        }
    }
}

/// Descriptor of one reconstructable setting.
///
/// Every variant is evaluated by [`OptionSpec::tokens`], which is pure and
/// returns zero or more rendered flag tokens.
pub enum OptionSpec<'a> {
    /// One token when `value != default`.
    Scalar {
        value: ScalarValue<'a>,
        default: ScalarValue<'a>,
        flag: &'static str,
    },
    /// Absent means no token; present behaves like [`OptionSpec::Scalar`].
    OptionalScalar {
        value: Option<ScalarValue<'a>>,
        default: ScalarValue<'a>,
        flag: &'static str,
    },
    /// One token per value missing from `defaults`, in source order.
    Collection {
        values: Vec<&'a str>,
        defaults: Vec<&'a str>,
        flag: &'static str,
    },
    /// One `key=value` token per entry, ordered by key.
    Mapping {
        entries: Vec<(&'a str, &'a str)>,
        flag: &'static str,
    },
    /// Rendering is delegated to a field handler.
    Custom {
        render: Box<dyn Fn() -> Vec<String> + 'a>,
    },
}

impl<'a> OptionSpec<'a> {
    pub fn scalar(value: impl Into<ScalarValue<'a>>, default: impl Into<ScalarValue<'a>>, flag: &'static str) -> Self {
        OptionSpec::Scalar {
            value: value.into(),
            default: default.into(),
            flag,
        }
    }

    pub fn optional<V: Into<ScalarValue<'a>>>(
        value: Option<V>,
        default: impl Into<ScalarValue<'a>>,
        flag: &'static str,
    ) -> Self {
        OptionSpec::OptionalScalar {
            value: value.map(Into::into),
            default: default.into(),
            flag,
        }
    }

    pub fn collection<I, D>(values: I, defaults: D, flag: &'static str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        D: IntoIterator<Item = &'a str>,
    {
        OptionSpec::Collection {
            values: values.into_iter().collect(),
            defaults: defaults.into_iter().collect(),
            flag,
        }
    }

    pub fn mapping<I: IntoIterator<Item = (&'a str, &'a str)>>(entries: I, flag: &'static str) -> Self {
        OptionSpec::Mapping {
            entries: entries.into_iter().collect(),
            flag,
        }
    }

    pub fn custom(render: impl Fn() -> Vec<String> + 'a) -> Self {
        OptionSpec::Custom { render: Box::new(render) }
    }

    pub fn tokens(&self) -> Vec<String> {
        match self {
            OptionSpec::Scalar { value, default, flag } => scalar_tokens(value, default, flag),
            OptionSpec::OptionalScalar { value, default, flag } => match value {
                None => Vec::new(),
                Some(value) => scalar_tokens(value, default, flag),
            },
            OptionSpec::Collection { values, defaults, flag } => subtract(values, defaults)
                .map(|value| format!("{}{}", flag, quote_arg(value)))
                .collect(),
            OptionSpec::Mapping { entries, flag } => {
                let mut entries = entries.clone();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                entries
                    .into_iter()
                    .map(|(key, value)| format!("{}{}", flag, quote_arg(&format!("{}={}", key, value))))
                    .collect()
            }
            OptionSpec::Custom { render } => render(),
        }
    }
}

fn scalar_tokens(value: &ScalarValue, default: &ScalarValue, flag: &str) -> Vec<String> {
    if !differs(value, default) {
        return Vec::new();
    }
    if takes_value(flag) {
        vec![format!("{}{}", flag, value)]
    } else {
        vec![flag.to_string()]
    }
}

/// Flags ending in `=` or ` ` carry a value, anything else is a boolean switch.
pub fn takes_value(flag: &str) -> bool {
    flag.ends_with('=') || flag.ends_with(' ')
}

pub fn differs<T: PartialEq + ?Sized>(value: &T, default: &T) -> bool {
    value != default
}

pub fn contains<T: PartialEq>(set: &[T], value: &T) -> bool {
    set.iter().any(|item| item == value)
}

/// Values not present in `baseline`, keeping their original order.
pub fn subtract<'v, T: PartialEq>(values: &'v [T], baseline: &'v [T]) -> impl Iterator<Item = &'v T> + 'v {
    values.iter().filter(move |value| !contains(baseline, *value))
}

/// Element-wise equality, used where order is meaningful.
pub fn same_sequence<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a == b
}
