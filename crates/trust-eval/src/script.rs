//! The boolean expression sandbox.
//!
//! Rules are evaluated by `evalexpr`, an expression interpreter with no I/O
//! and no access to the host. Its vocabulary is the evalexpr built-ins plus
//! whatever helper libraries were loaded when the sandbox was built. Each
//! library is a fixed table of Rust functions; nothing a rule string contains
//! can add to it.
//!
//! The context is only ever borrowed immutably during evaluation, so rules
//! cannot assign variables or otherwise change what the next rule sees.

use evalexpr::{
    eval_boolean_with_context, ContextWithMutableFunctions, EvalexprError, EvalexprResult,
    Function, HashMapContext, Value,
};
use tracing::{debug, warn};

use trust_contracts::verify::ExpressionVerdict;
use trust_core::traits::BooleanEvaluator;

type LibraryFn = fn(&Value) -> EvalexprResult<Value>;

/// A named set of helper functions that can be loaded into the sandbox.
pub struct Library {
    pub name: &'static str,
    functions: &'static [(&'static str, LibraryFn)],
}

impl Library {
    /// The function identifiers this library registers.
    pub fn function_names(&self) -> impl Iterator<Item = &'static str> {
        self.functions.iter().map(|(name, _)| *name)
    }
}

/// Collection helpers in the style of lodash: `_.includes(haystack, needle)`.
pub static LODASH: Library = Library {
    name: "lodash",
    functions: &[
        ("_.includes", lodash::includes),
        ("_.startsWith", lodash::starts_with),
        ("_.endsWith", lodash::ends_with),
        ("_.isEmpty", lodash::is_empty),
        ("_.eq", lodash::eq),
        ("_.toLower", lodash::to_lower),
        ("_.toUpper", lodash::to_upper),
        ("_.trim", lodash::trim),
        ("_.size", lodash::size),
    ],
};

/// Every library the sandbox knows how to load.
pub static LIBRARIES: &[&Library] = &[&LODASH];

/// Resolve a configured library identifier.
///
/// Matches a library name exactly (ignoring case) or any URL/path that
/// contains the name, e.g. `https://cdn.jsdelivr.net/lodash/4.17.4/lodash.min.js`.
pub fn resolve_library(identifier: &str) -> Option<&'static Library> {
    let identifier = identifier.trim().to_ascii_lowercase();
    if identifier.is_empty() {
        return None;
    }
    LIBRARIES
        .iter()
        .copied()
        .find(|library| identifier == library.name || identifier.contains(library.name))
}

/// Evaluates rule expressions to booleans inside an evalexpr context.
pub struct ScriptSandbox {
    context: HashMapContext,
    loaded: Vec<&'static str>,
}

impl ScriptSandbox {
    /// Build a sandbox and load each library in `libraries`.
    ///
    /// Unknown identifiers are logged and skipped; the sandbox still works
    /// with a smaller vocabulary.
    pub fn new<S: AsRef<str>>(libraries: &[S]) -> Self {
        let mut sandbox = Self {
            context: HashMapContext::new(),
            loaded: Vec::new(),
        };

        for identifier in libraries {
            let identifier = identifier.as_ref();
            match resolve_library(identifier) {
                Some(library) => {
                    if let Err(e) = sandbox.load(library) {
                        warn!(
                            library = library.name,
                            error = %e,
                            "could not load library; verification rules vocabulary will be limited"
                        );
                    }
                }
                None => warn!(
                    %identifier,
                    "unknown library; verification rules vocabulary will be limited"
                ),
            }
        }

        sandbox
    }

    /// Names of the libraries that loaded successfully, in load order.
    pub fn loaded_libraries(&self) -> &[&'static str] {
        &self.loaded
    }

    fn load(&mut self, library: &'static Library) -> EvalexprResult<()> {
        if self.loaded.contains(&library.name) {
            return Ok(());
        }
        for (name, function) in library.functions {
            self.context
                .set_function(name.to_string(), Function::new(*function))?;
        }
        self.loaded.push(library.name);
        debug!(library = library.name, "loaded library into sandbox");
        Ok(())
    }
}

impl Default for ScriptSandbox {
    fn default() -> Self {
        Self::new(&[LODASH.name])
    }
}

impl BooleanEvaluator for ScriptSandbox {
    /// Evaluate `expression` with an optional trailing `;`.
    ///
    /// Syntax errors, unknown identifiers, type errors, and non-boolean
    /// results all produce `ExpressionVerdict::Broken`.
    fn evaluate(&self, expression: &str) -> ExpressionVerdict {
        let statement = strip_terminator(expression);
        match eval_boolean_with_context(statement, &self.context) {
            Ok(value) => value.into(),
            Err(e) => {
                warn!(%expression, error = %e, "impossible to evaluate the expression");
                ExpressionVerdict::Broken {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// `expr` and `expr;` are the same statement.
fn strip_terminator(expression: &str) -> &str {
    let trimmed = expression.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed)
}

mod lodash {
    use evalexpr::{EvalexprError, EvalexprResult, Value};

    use super::{args, text};

    pub fn includes(argument: &Value) -> EvalexprResult<Value> {
        let [haystack, needle] = args("_.includes", argument)?;
        let found = match haystack {
            Value::Tuple(items) => items.contains(&needle),
            other => text(&other)?.contains(text(&needle)?.as_str()),
        };
        Ok(Value::Boolean(found))
    }

    pub fn starts_with(argument: &Value) -> EvalexprResult<Value> {
        let [s, prefix] = args("_.startsWith", argument)?;
        Ok(Value::Boolean(text(&s)?.starts_with(text(&prefix)?.as_str())))
    }

    pub fn ends_with(argument: &Value) -> EvalexprResult<Value> {
        let [s, suffix] = args("_.endsWith", argument)?;
        Ok(Value::Boolean(text(&s)?.ends_with(text(&suffix)?.as_str())))
    }

    /// Strings and tuples are empty when they have no elements; scalars
    /// always count as empty.
    pub fn is_empty(argument: &Value) -> EvalexprResult<Value> {
        let empty = match argument {
            Value::String(s) => s.is_empty(),
            Value::Tuple(items) => items.is_empty(),
            _ => true,
        };
        Ok(Value::Boolean(empty))
    }

    pub fn eq(argument: &Value) -> EvalexprResult<Value> {
        let [a, b] = args("_.eq", argument)?;
        Ok(Value::Boolean(a == b))
    }

    pub fn to_lower(argument: &Value) -> EvalexprResult<Value> {
        Ok(Value::String(text(argument)?.to_lowercase()))
    }

    pub fn to_upper(argument: &Value) -> EvalexprResult<Value> {
        Ok(Value::String(text(argument)?.to_uppercase()))
    }

    pub fn trim(argument: &Value) -> EvalexprResult<Value> {
        Ok(Value::String(text(argument)?.trim().to_string()))
    }

    pub fn size(argument: &Value) -> EvalexprResult<Value> {
        let size = match argument {
            Value::String(s) => s.chars().count(),
            Value::Tuple(items) => items.len(),
            Value::Empty => 0,
            other => {
                return Err(EvalexprError::CustomMessage(format!(
                    "_.size expects a string or tuple, got {other:?}"
                )))
            }
        };
        Ok(Value::Int(size as i64))
    }
}

/// Split a function argument into exactly `N` values.
///
/// evalexpr passes several arguments as one tuple, a single argument as
/// itself, and no argument as `Empty`.
fn args<const N: usize>(function: &str, argument: &Value) -> EvalexprResult<[Value; N]> {
    let values = match argument {
        Value::Tuple(values) => values.clone(),
        Value::Empty => Vec::new(),
        other => vec![other.clone()],
    };
    <[Value; N]>::try_from(values).map_err(|values| {
        EvalexprError::CustomMessage(format!(
            "{function} expects {N} argument(s), got {}",
            values.len()
        ))
    })
}

/// The textual form of a scalar value. Tuples have none.
fn text(value: &Value) -> EvalexprResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Empty => Ok(String::new()),
        Value::Tuple(_) => Err(EvalexprError::CustomMessage(
            "expected a string, got a tuple".to_string(),
        )),
    }
}
