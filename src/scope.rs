//! Ambient procedure scope, threaded by value through the line loop.
use crate::types::Reach;

/// Which procedure, if any, the scanner is currently inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    /// Outside every `dcl-proc ... end-proc` pair.
    #[default]
    Global,
    /// Between `dcl-proc NAME` and the next `end-proc`.
    InProcedure(String),
}

impl Scope {
    /// Leave the current procedure. A stray `end-proc` at global scope is ignored.
    #[must_use]
    pub fn close_procedure(self, line: usize) -> Self {
        if self == Self::Global {
            tracing::debug!(line = line.saturating_add(1), "end-proc outside a procedure");
        }
        return Self::Global;
    }

    /// Enter procedure `name`. Procedures cannot nest in free-format RPG, so
    /// an open procedure is implicitly closed first.
    #[must_use]
    pub fn open_procedure(self, name: &str, line: usize) -> Self {
        if let Self::InProcedure(previous) = &self {
            tracing::warn!(
                line = line.saturating_add(1),
                previous = %previous,
                next = %name,
                "dcl-proc inside an open procedure; treating the previous one as closed"
            );
        }
        return Self::InProcedure(name.to_string());
    }

    /// The reach stamped on symbols declared in this scope.
    pub fn reach(&self) -> Reach {
        return match self {
            Self::Global => Reach::Global,
            Self::InProcedure(name) => Reach::Procedure(name.clone()),
        };
    }
}
