use crate::Value;

/// Positional and keyword arguments for constructing or looking up a member.
///
/// Positional order is preserved; keywords are kept in the order given so
/// errors name them deterministically. The [`args!`](crate::args) macro is
/// the usual way to build one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self { Self::default() }

    /// Appends a positional argument.
    pub fn positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    pub fn keyword(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    pub fn positionals(&self) -> &[Value] { &self.positional }

    pub fn keywords(&self) -> &[(String, Value)] { &self.keywords }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, Vec<(String, Value)>) {
        (self.positional, self.keywords)
    }
}

/// Removes the first keyword called `name` and returns its value.
pub(crate) fn take_keyword(
    keywords: &mut Vec<(String, Value)>,
    name: &str,
) -> Option<Value> {
    let index = keywords.iter().position(|(key, _)| key == name)?;
    Some(keywords.remove(index).1)
}

/// Builds [`Args`] from a call-like list.
///
/// Bare expressions are positional; `ident = expr` pairs are keywords.
///
/// # Examples
///
/// ```
/// use data_enum::args;
///
/// let args = args!("USD", "$", plural_name = "United States dollars");
/// assert_eq!(args.positionals().len(), 2);
/// assert_eq!(args.keywords()[0].0, "plural_name");
/// assert!(args!().is_empty());
/// ```
#[macro_export]
macro_rules! args {
    (@acc $args:expr ;) => { $args };
    (@acc $args:expr ; $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(
            @acc $args.keyword(stringify!($name), $value) ; $($($rest)*)?
        )
    };
    (@acc $args:expr ; $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@acc $args.positional($value) ; $($($rest)*)?)
    };
    ($($tokens:tt)*) => {
        $crate::args!(@acc $crate::Args::new() ; $($tokens)*)
    };
}
