//! Argument construction for gum invocations.
//!
//! Converts a typed, ordered option list into the flag tokens the gum binary
//! accepts: `--flag`, `--no-flag`, `--flag=value`, `--flag.subkey=value`.
//! Everything here is pure and deterministic; malformed values are stringified
//! permissively and never rejected.

/// A typed option value.
///
/// Gum flags come in a small number of shapes, so options are an explicit
/// enumeration rather than a dynamic map: rendering stays a total function
/// over the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptValue {
    /// Boolean flag: `--flag`, or `--no-flag` when negation is allowlisted.
    Flag(bool),
    /// Integer: `--flag=N`.
    Int(i64),
    /// String: `--flag=value`.
    Text(String),
    /// Repeated flag: one `--flag=element` token per element, in order.
    List(Vec<String>),
    /// Nested map: one `--flag.subkey=value` token per entry, in order.
    Pairs(Vec<(String, String)>),
}

impl From<bool> for OptValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<i64> for OptValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for OptValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for OptValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<&str> for OptValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for OptValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for OptValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<(String, String)>> for OptValue {
    fn from(v: Vec<(String, String)>) -> Self {
        Self::Pairs(v)
    }
}

/// One gum call: subcommand, positionals, ordered options, and how the
/// process should be wired.
///
/// Built per call and consumed once by [`crate::exec::Runner::run`].
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Gum subcommand name (`choose`, `filter`, `style`, ...).
    pub subcommand: String,

    /// Positional arguments, placed directly after the subcommand.
    pub positionals: Vec<String>,

    /// Options in insertion order.
    pub options: Vec<(String, OptValue)>,

    /// Whether the child needs direct terminal control.
    pub interactive: bool,

    /// Payload to stream to the child's stdin.
    pub input: Option<String>,
}

impl Invocation {
    /// Start building an invocation for a subcommand. Interactive by default.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            positionals: Vec::new(),
            options: Vec::new(),
            interactive: true,
            input: None,
        }
    }

    /// Append one positional argument.
    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.positionals.push(value.into());
        self
    }

    /// Append several positional arguments.
    pub fn positionals<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positionals.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append one option. Underscores in `name` are rendered as dashes.
    pub fn opt(mut self, name: impl Into<String>, value: impl Into<OptValue>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Append an option only when a value is present.
    pub fn maybe_opt<V: Into<OptValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.opt(name, v),
            None => self,
        }
    }

    /// Pass a timeout through to the child as `--timeout=Ns`.
    ///
    /// Enforcement is the child's responsibility; this layer never kills on
    /// a deadline.
    pub fn timeout_secs(self, secs: u64) -> Self {
        self.opt("timeout", format!("{secs}s"))
    }

    /// Set whether the child takes over the terminal.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Stream a payload to the child's stdin.
    pub fn input(mut self, payload: impl Into<String>) -> Self {
        self.input = Some(payload.into());
        self
    }
}

/// Per-subcommand allowlist of flags that gum accepts in `--no-X` form.
///
/// A `false` boolean for any flag not listed here is omitted entirely,
/// never emitted negated.
const NEGATABLE: &[(&str, &[&str])] = &[
    ("filter", &["fuzzy", "sort", "strict", "reverse", "indicator"]),
    ("choose", &["limit"]),
    ("input", &["echo-mode"]),
    ("file", &["all", "file", "directory"]),
    ("pager", &["soft-wrap"]),
    ("table", &["border", "print"]),
];

/// Whether `(subcommand, flag)` may be rendered as `--no-{flag}`.
pub fn supports_negation(subcommand: &str, flag: &str) -> bool {
    NEGATABLE
        .iter()
        .find(|(cmd, _)| *cmd == subcommand)
        .is_some_and(|(_, flags)| flags.contains(&flag))
}

/// Render an invocation into the ordered argument token list.
pub fn build_args(invocation: &Invocation) -> Vec<String> {
    let mut args = Vec::with_capacity(1 + invocation.positionals.len() + invocation.options.len());
    args.push(invocation.subcommand.clone());
    args.extend(invocation.positionals.iter().cloned());

    for (name, value) in &invocation.options {
        let flag = name.replace('_', "-");
        match value {
            OptValue::Flag(true) => args.push(format!("--{flag}")),
            OptValue::Flag(false) => {
                if supports_negation(&invocation.subcommand, &flag) {
                    args.push(format!("--no-{flag}"));
                }
            }
            OptValue::Int(n) => args.push(format!("--{flag}={n}")),
            OptValue::Text(s) => args.push(format!("--{flag}={s}")),
            OptValue::List(items) => {
                for item in items {
                    args.push(format!("--{flag}={item}"));
                }
            }
            OptValue::Pairs(pairs) => {
                for (key, val) in pairs {
                    args.push(format!("--{flag}.{key}={val}"));
                }
            }
        }
    }

    args
}

/// Append style sub-flags for a prefixed style map.
///
/// Each entry becomes *two* tokens: `--{prefix}.{key}` then the value.
/// This space-separated convention is distinct from [`OptValue::Pairs`]
/// rendering (`--flag.subkey=value`); gum expects both forms and they must
/// not be unified.
pub fn add_style_args<K, V>(args: &mut Vec<String>, prefix: &str, style: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in style {
        args.push(format!("--{prefix}.{}", key.as_ref()));
        args.push(value.as_ref().to_string());
    }
}
