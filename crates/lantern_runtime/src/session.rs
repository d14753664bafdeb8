//! Session state and top-level form processing.
//!
//! A [`Session`] owns the global frame, the fact database, and the resolver.
//! Top-level forms reach it through [`Session::process`], which dispatches
//! `fact`, `query`, and `load` and renders query outcomes in the fixed
//! one-line-per-solution format.

use std::fmt;
use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use lantern_foundation::{Error, Result, Term, VARIABLE_MARKER};
use lantern_language::{create_global_env, evaluate, parse, Env, Value};
use lantern_logic::{resolve_fully, variables_in, Bindings, Fact, FactDatabase, Resolver};

/// The extension tried when a `load` path does not name a file literally.
const LOAD_EXTENSION: &str = "logic";

/// Interpreter state shared across REPL lines and loaded files.
pub struct Session {
    /// The global frame for the expression layer.
    env: Env,

    /// The append-only clause store.
    database: FactDatabase,

    /// The resolution engine.
    resolver: Resolver,

    /// Base directory for relative `load` paths.
    load_path: PathBuf,
}

/// What a processed top-level form produced.
#[derive(Debug, PartialEq)]
pub enum Response {
    /// A fact was stored.
    Asserted,
    /// A query ran to completion.
    Query(QueryOutcome),
    /// A file was loaded; responses of its forms, in order.
    Loaded(Vec<Response>),
    /// The form was neither a fact nor a query.
    Usage,
}

/// The rendered result of a query.
#[derive(Debug, PartialEq)]
pub struct QueryOutcome {
    /// One pre-rendered line per solution, in discovery order.
    pub rows: Vec<String>,
}

impl QueryOutcome {
    /// Returns true when at least one solution was found.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Failed.");
        }
        write!(f, "Success!")?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

impl Response {
    /// Renders the lines this response prints, if any.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Asserted => None,
            Self::Query(outcome) => Some(format!("{outcome}")),
            Self::Loaded(responses) => {
                let lines: Vec<String> =
                    responses.iter().filter_map(Response::render).collect();
                if lines.is_empty() {
                    None
                } else {
                    Some(lines.join("\n"))
                }
            }
            Self::Usage => Some("Please provide a fact or query.".to_string()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with an empty database and a stocked global frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: create_global_env(),
            database: FactDatabase::new(),
            resolver: Resolver::new(),
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Returns the fact database.
    #[must_use]
    pub const fn database(&self) -> &FactDatabase {
        &self.database
    }

    /// Returns the global frame.
    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    /// Sets the base directory for relative `load` paths.
    pub fn set_load_path(&mut self, path: PathBuf) {
        self.load_path = path;
    }

    /// Processes one top-level form.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed facts and queries and for `load`
    /// failures; an unrecognized form is not an error but [`Response::Usage`].
    pub fn process(&mut self, form: &Term) -> Result<Response> {
        let Some(pair) = form.as_pair() else {
            return Ok(Response::Usage);
        };
        let Some(head) = pair.first.as_symbol() else {
            return Ok(Response::Usage);
        };
        let body = pair
            .second
            .list_elements()
            .ok_or_else(|| Error::malformed(format!("{form}")))?;

        match head.as_ref() {
            "fact" | "!" => {
                self.database.add(Fact::from_relations(&body)?);
                Ok(Response::Asserted)
            }
            "query" | "?" => Ok(Response::Query(self.run_query(&body)?)),
            "load" => {
                let [path] = body.as_slice() else {
                    return Err(Error::malformed("load takes one path".to_string()));
                };
                Ok(Response::Loaded(self.load(&render_path(path))?))
            }
            _ => Ok(Response::Usage),
        }
    }

    /// Parses source text and processes each form in order.
    ///
    /// # Errors
    ///
    /// Returns the first parse or processing error.
    pub fn process_source(&mut self, source: &str) -> Result<Vec<Response>> {
        let forms = parse(source)?;
        let mut responses = Vec::with_capacity(forms.len());
        for form in &forms {
            responses.push(self.process(form)?);
        }
        Ok(responses)
    }

    /// Evaluates an expression against the session's global frame.
    ///
    /// This is the expression layer under the declarative front end; the REPL
    /// and tests use it directly.
    ///
    /// # Errors
    ///
    /// Returns any evaluation error.
    pub fn eval(&self, expr: &Term) -> Result<Value> {
        evaluate(expr, &self.env)
    }

    /// Runs a query and renders each solution.
    fn run_query(&self, goals: &[Term]) -> Result<QueryOutcome> {
        for goal in goals {
            if goal.as_pair().is_none() || !goal.is_proper_list() {
                return Err(Error::malformed(format!("not a relation: {goal}")));
            }
        }
        let variables = variables_in(goals);
        let mut rows = Vec::new();
        let root = Bindings::root();
        let _ = self
            .resolver
            .search(&self.database, goals, &root, 0, &mut |env| {
                rows.push(render_solution(&variables, env));
                ControlFlow::Continue(())
            });
        Ok(QueryOutcome { rows })
    }

    /// Loads a file and processes its forms against this session.
    ///
    /// The path is resolved against the load path; if it does not name a file
    /// literally, the `.logic` extension is tried.
    ///
    /// # Errors
    ///
    /// Returns a file-access error when neither candidate exists, or the
    /// first error from the file's forms.
    pub fn load(&mut self, path: &str) -> Result<Vec<Response>> {
        let file_path = self.resolve_load_path(path)?;
        let source = fs::read_to_string(&file_path)
            .map_err(|e| Error::file_access(file_path.display().to_string(), e.to_string()))?;
        self.process_source(&source)
    }

    fn resolve_load_path(&self, path: &str) -> Result<PathBuf> {
        let literal = self.load_path.join(path);
        if literal.is_file() {
            return Ok(literal);
        }
        let with_extension = self.load_path.join(format!("{path}.{LOAD_EXTENSION}"));
        if with_extension.is_file() {
            return Ok(with_extension);
        }
        Err(Error::file_access(
            path.to_string(),
            "no such file".to_string(),
        ))
    }
}

/// Renders a `load` operand: symbols by name, text by contents.
fn render_path(path: &Term) -> String {
    match path {
        Term::Text(s) | Term::Symbol(s) => s.to_string(),
        other => format!("{other}"),
    }
}

/// Renders one solution as tab-separated `name: value` pairs with the
/// variable marker stripped.
fn render_solution(variables: &[Arc<str>], env: &Bindings) -> String {
    variables
        .iter()
        .map(|name| {
            let value = resolve_fully(&Term::Symbol(Arc::clone(name)), env);
            let bare = name.trim_start_matches(VARIABLE_MARKER);
            format!("{bare}: {value}")
        })
        .collect::<Vec<_>>()
        .join("\t")
}
