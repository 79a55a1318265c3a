// Preprocessor for #define/#ifdef/#ifndef/#else/#endif/#error/#warning directives.
//
// Works line by line and never changes the number of lines, so every line
// number reported by the lexer or parser points at the unprocessed source.
// Handled directive lines and lines in inactive branches are blanked in place.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreprocessError {
    #[error("malformed #{directive} directive at line {line}")]
    MalformedDirective { directive: String, line: usize },

    #[error("#else without matching #ifdef/#ifndef at line {line}")]
    UnmatchedElse { line: usize },

    #[error("#else after #else at line {line}")]
    DuplicateElse { line: usize },

    #[error("#endif without matching #ifdef/#ifndef at line {line}")]
    UnmatchedEndif { line: usize },

    #[error("conditional opened at line {line} is never closed")]
    UnterminatedConditional { line: usize },

    #[error("#error at line {line}: {message}")]
    ErrorDirective { message: String, line: usize },
}

impl PreprocessError {
    pub fn line(&self) -> usize {
        match self {
            PreprocessError::MalformedDirective { line, .. }
            | PreprocessError::UnmatchedElse { line }
            | PreprocessError::DuplicateElse { line }
            | PreprocessError::UnmatchedEndif { line }
            | PreprocessError::UnterminatedConditional { line }
            | PreprocessError::ErrorDirective { line, .. } => *line,
        }
    }
}

/// Macro names that count as defined in every file, e.g. from `-D` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredefinedMacros {
    names: FxHashSet<String>,
}

impl PredefinedMacros {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PredefinedMacros {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for PredefinedMacros {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

#[derive(Debug, Clone)]
struct CondFrame {
    active: bool,
    in_else: bool,
    opened_at: usize,
}

#[derive(Debug, Default)]
struct ConditionalState {
    stack: Vec<CondFrame>,
}

impl ConditionalState {
    fn clear(&mut self) {
        self.stack.clear();
    }

    fn is_active(&self) -> bool {
        self.stack.iter().all(|frame| frame.active)
    }

    fn push(&mut self, cond: bool, line: usize) {
        self.stack.push(CondFrame {
            active: cond,
            in_else: false,
            opened_at: line,
        });
    }

    fn handle_else(&mut self, line: usize) -> Result<(), PreprocessError> {
        let frame = self
            .stack
            .last_mut()
            .ok_or(PreprocessError::UnmatchedElse { line })?;
        if frame.in_else {
            return Err(PreprocessError::DuplicateElse { line });
        }
        frame.active = !frame.active;
        frame.in_else = true;
        Ok(())
    }

    fn handle_endif(&mut self, line: usize) -> Result<(), PreprocessError> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or(PreprocessError::UnmatchedEndif { line })
    }

    fn unterminated(&self) -> Option<PreprocessError> {
        self.stack
            .last()
            .map(|frame| PreprocessError::UnterminatedConditional {
                line: frame.opened_at,
            })
    }
}

#[derive(Debug, Clone)]
struct MacroDef {
    name: String,
    value: String,
}

/// Text-to-text preprocessing pass over one source file.
#[derive(Debug)]
pub struct Preprocessor<'a> {
    predefined: &'a PredefinedMacros,
    // Definition order matters: expansion applies macros front to back.
    macros: Vec<MacroDef>,
    cond_state: ConditionalState,
}

impl<'a> Preprocessor<'a> {
    pub fn new(predefined: &'a PredefinedMacros) -> Self {
        Self {
            predefined,
            macros: Vec::new(),
            cond_state: ConditionalState::default(),
        }
    }

    /// Whether `name` is defined locally or predefined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.predefined.contains(name) || self.macros.iter().any(|m| m.name == name)
    }

    /// Process a whole file. Local definitions from any earlier call are
    /// discarded first.
    pub fn process(&mut self, source: &str) -> Result<String, PreprocessError> {
        self.macros.clear();
        self.cond_state.clear();

        let mut out = String::with_capacity(source.len());
        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let line_no = index + 1;
            let (text, newline) = match raw.strip_suffix('\n') {
                Some(text) => (text, "\n"),
                None => (raw, ""),
            };

            let processed = self.process_line(text, line_no)?;
            out.push_str(&processed);
            out.push_str(newline);
        }

        if let Some(err) = self.cond_state.unterminated() {
            return Err(err);
        }

        log::debug!(
            "preprocessed {} lines with {} local macros",
            source.lines().count(),
            self.macros.len()
        );
        Ok(out)
    }

    fn process_line(&mut self, text: &str, line: usize) -> Result<String, PreprocessError> {
        let Some(body) = text.trim_start().strip_prefix('#') else {
            if self.cond_state.is_active() {
                return Ok(self.expand(text));
            }
            return Ok(blank(text));
        };

        let directive = Directive::parse(body);
        let active = self.cond_state.is_active();

        match directive.name {
            "" => {
                return Err(PreprocessError::MalformedDirective {
                    directive: String::new(),
                    line,
                })
            }
            "define" => {
                let name = directive.required_word(line)?;
                if active {
                    let value = self.expand(directive.rest_after_word());
                    self.define(name, value);
                }
            }
            "ifdef" | "ifndef" => {
                let name = directive.required_word(line)?;
                let defined = self.is_defined(name);
                let cond = if directive.name == "ifdef" {
                    defined
                } else {
                    !defined
                };
                log::debug!("line {line}: #{} {name} -> {cond}", directive.name);
                self.cond_state.push(cond, line);
            }
            "else" => self.cond_state.handle_else(line)?,
            "endif" => self.cond_state.handle_endif(line)?,
            "error" if active => {
                return Err(PreprocessError::ErrorDirective {
                    message: directive.args.to_string(),
                    line,
                });
            }
            "warning" if active => {
                log::warn!("#warning at line {line}: {}", directive.args);
            }
            "error" | "warning" => {}
            _ if active => {
                log::warn!("line {line}: unknown directive #{}", directive.name);
                return Ok(text.to_string());
            }
            _ => {}
        }

        Ok(blank(text))
    }

    fn define(&mut self, name: &str, value: String) {
        log::debug!("define {name} = {value:?}");
        match self.macros.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.value = value,
            None => self.macros.push(MacroDef {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Plain substring replacement, one macro after another.
    fn expand(&self, text: &str) -> String {
        self.macros
            .iter()
            .fold(text.to_string(), |acc, m| acc.replace(&m.name, &m.value))
    }
}

/// A directive line split after its `#`.
struct Directive<'s> {
    name: &'s str,
    args: &'s str,
}

impl<'s> Directive<'s> {
    fn parse(body: &'s str) -> Self {
        let body = body.trim();
        match body.split_once(char::is_whitespace) {
            Some((name, args)) => Self {
                name,
                args: args.trim(),
            },
            None => Self { name: body, args: "" },
        }
    }

    fn word(&self) -> &'s str {
        self.args.split_whitespace().next().unwrap_or_default()
    }

    fn required_word(&self, line: usize) -> Result<&'s str, PreprocessError> {
        match self.word() {
            "" => Err(PreprocessError::MalformedDirective {
                directive: self.name.to_string(),
                line,
            }),
            word => Ok(word),
        }
    }

    fn rest_after_word(&self) -> &'s str {
        self.args[self.word().len()..].trim()
    }
}

/// Same length, every character replaced by a space.
fn blank(text: &str) -> String {
    " ".repeat(text.chars().count())
}
