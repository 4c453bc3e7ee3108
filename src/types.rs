//! Symbol table types produced by the scanner: positions, reach, symbols, documents.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Zero-based location in a source text. `character` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Column in UTF-16 code units.
    pub character: u32,
    /// Zero-based line index.
    pub line: u32,
}

/// Start/end pair. Scanner ranges never span more than one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Exclusive end of the matched portion.
    pub end: Position,
    /// Always column zero of the owning line.
    pub start: Position,
}

impl Range {
    /// A range covering `length` columns of `line`, starting at column zero.
    pub const fn line_span(line: u32, length: u32) -> Self {
        return Self {
            end: Position { character: length, line },
            start: Position { character: 0, line },
        };
    }
}

/// Lexical visibility of a symbol. Every non-global reach names its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scopeKind", content = "ownerName", rename_all = "camelCase")]
pub enum Reach {
    /// Member of the named data structure.
    DataStructure(String),
    /// Member of the named enumeration.
    Enum(String),
    /// Declared outside every procedure.
    Global,
    /// Declared inside the named procedure.
    Procedure(String),
}

impl Reach {
    /// Name of the owning construct, `None` for global symbols.
    pub fn owner_name(&self) -> Option<&str> {
        return match self {
            Self::DataStructure(owner) | Self::Enum(owner) | Self::Procedure(owner) => {
                Some(owner.as_str())
            },
            Self::Global => None,
        };
    }

    /// The bare scope tag.
    pub const fn scope_kind(&self) -> ScopeKind {
        return match self {
            Self::DataStructure(_) => ScopeKind::DataStructure,
            Self::Enum(_) => ScopeKind::Enum,
            Self::Global => ScopeKind::Global,
            Self::Procedure(_) => ScopeKind::Procedure,
        };
    }
}

impl fmt::Display for Reach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self.owner_name() {
            Some(owner) => write!(f, "{} {owner}", self.scope_kind()),
            None => write!(f, "{}", self.scope_kind()),
        };
    }
}

/// Tag half of a [`Reach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Data-structure member scope.
    DataStructure,
    /// Enumeration member scope.
    Enum,
    /// File-level scope.
    Global,
    /// Procedure-local scope.
    Procedure,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DataStructure => "dataStructure",
            Self::Enum => "enum",
            Self::Global => "global",
            Self::Procedure => "procedure",
        };
        return f.write_str(label);
    }
}

/// Array dimension info taken from a `dim(N)` keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// True when a `dim(...)` keyword was present.
    pub is_tab: bool,
    /// Trimmed text between the `dim` parentheses, empty when absent.
    pub tab_dim: String,
}

/// Kind of device a `dcl-f` declaration binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    /// Physical or logical database file.
    Data,
    /// Workstation display file.
    Display,
    /// Printer file.
    Printer,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Data => "Data file (PF/LF)",
            Self::Display => "Display file (DSPF)",
            Self::Printer => "Printer file (PRTF)",
        };
        return f.write_str(label);
    }
}

/// `dcl-proc NAME [options]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    /// True when the options text contains `export`.
    pub is_export: bool,
    /// Procedure name as written.
    pub name: String,
    /// Line span of the declaration.
    pub range: Range,
    /// Always global.
    pub reach: Reach,
}

/// `begsr NAME`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subroutine {
    /// Subroutine name.
    pub name: String,
    /// Line span of the `begsr` statement.
    pub range: Range,
    /// Procedure or global scope the subroutine lives in.
    pub reach: Reach,
}

/// `dcl-c NAME [VALUE];`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constant {
    /// Constant name.
    pub name: String,
    /// Line span of the declaration.
    pub range: Range,
    /// Enclosing scope.
    pub reach: Reach,
    /// Trimmed value text, empty when omitted.
    pub value: String,
}

/// `dcl-s NAME TYPE;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Lowercased type and keyword text.
    pub dcl_type: String,
    /// Variable name.
    pub name: String,
    /// Line span of the declaration.
    pub range: Range,
    /// Enclosing scope.
    pub reach: Reach,
    /// Array dimension, if any.
    #[serde(flatten)]
    pub tab: Tab,
}

/// `dcl-ds NAME [OPTIONS];` with the members found in its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStructure {
    /// Data structure name.
    pub name: String,
    /// Lowercased keyword text after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Line span of the opening declaration.
    pub range: Range,
    /// Enclosing scope.
    pub reach: Reach,
    /// Array dimension from the options, if any.
    #[serde(flatten)]
    pub tab: Tab,
    /// Subfields in body order.
    pub values: Vec<ItemDs>,
}

/// One subfield of a [`DataStructure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDs {
    /// Type and keyword text as written.
    pub dcl_type: String,
    /// Subfield name.
    pub name: String,
    /// Span of the trimmed member line.
    pub range: Range,
    /// Always `dataStructure` owned by the parent.
    pub reach: Reach,
    /// Array dimension, if any.
    #[serde(flatten)]
    pub tab: Tab,
}

/// `dcl-enum NAME [OPTIONS];` with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    /// Enumeration name.
    pub name: String,
    /// Lowercased keyword text after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Line span of the opening declaration.
    pub range: Range,
    /// Enclosing scope.
    pub reach: Reach,
    /// Members in body order.
    pub values: Vec<ItemEnum>,
}

/// One member of an [`Enum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEnum {
    /// Member name.
    pub name: String,
    /// Span of the trimmed member line.
    pub range: Range,
    /// Always `enum` owned by the parent.
    pub reach: Reach,
    /// Value text as written.
    pub value: String,
}

/// `dcl-f NAME [OPTIONS];`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredFile {
    /// Trimmed keyword text after the name.
    pub file_options: String,
    /// Device kind derived from the options.
    pub file_type: FileType,
    /// File name.
    pub name: String,
    /// Line span of the declaration.
    pub range: Range,
    /// Enclosing scope.
    pub reach: Reach,
}

/// A `to do` marker found in a line comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDo {
    /// Span of the comment text.
    pub range: Range,
    /// Scope active on the comment's line.
    pub reach: Reach,
    /// Trimmed text after the marker.
    pub text: String,
}

/// Every construct the scanner can emit. Matching on it is exhaustive by design
/// of the type: no variant carries fields that belong to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Symbol {
    /// See [`Constant`].
    Constant(Constant),
    /// See [`DataStructure`].
    DataStructure(DataStructure),
    /// See [`DeclaredFile`].
    DeclaredFile(DeclaredFile),
    /// See [`Enum`].
    Enum(Enum),
    /// See [`ItemDs`].
    #[serde(rename = "itemDS")]
    ItemDs(ItemDs),
    /// See [`ItemEnum`].
    ItemEnum(ItemEnum),
    /// See [`Procedure`].
    Procedure(Procedure),
    /// See [`Subroutine`].
    Subroutine(Subroutine),
    /// See [`ToDo`].
    ToDo(ToDo),
    /// See [`Variable`].
    Variable(Variable),
}

impl Symbol {
    /// The variant tag.
    pub const fn kind(&self) -> SymbolKind {
        return match self {
            Self::Constant(_) => SymbolKind::Constant,
            Self::DataStructure(_) => SymbolKind::DataStructure,
            Self::DeclaredFile(_) => SymbolKind::DeclaredFile,
            Self::Enum(_) => SymbolKind::Enum,
            Self::ItemDs(_) => SymbolKind::ItemDs,
            Self::ItemEnum(_) => SymbolKind::ItemEnum,
            Self::Procedure(_) => SymbolKind::Procedure,
            Self::Subroutine(_) => SymbolKind::Subroutine,
            Self::ToDo(_) => SymbolKind::ToDo,
            Self::Variable(_) => SymbolKind::Variable,
        };
    }

    /// Declared name. To-do markers have none.
    pub fn name(&self) -> Option<&str> {
        return match self {
            Self::Constant(s) => Some(&s.name),
            Self::DataStructure(s) => Some(&s.name),
            Self::DeclaredFile(s) => Some(&s.name),
            Self::Enum(s) => Some(&s.name),
            Self::ItemDs(s) => Some(&s.name),
            Self::ItemEnum(s) => Some(&s.name),
            Self::Procedure(s) => Some(&s.name),
            Self::Subroutine(s) => Some(&s.name),
            Self::ToDo(_) => None,
            Self::Variable(s) => Some(&s.name),
        };
    }

    /// Source span of the declaration line.
    pub const fn range(&self) -> &Range {
        return match self {
            Self::Constant(s) => &s.range,
            Self::DataStructure(s) => &s.range,
            Self::DeclaredFile(s) => &s.range,
            Self::Enum(s) => &s.range,
            Self::ItemDs(s) => &s.range,
            Self::ItemEnum(s) => &s.range,
            Self::Procedure(s) => &s.range,
            Self::Subroutine(s) => &s.range,
            Self::ToDo(s) => &s.range,
            Self::Variable(s) => &s.range,
        };
    }

    /// Lexical scope the symbol was stamped with.
    pub const fn reach(&self) -> &Reach {
        return match self {
            Self::Constant(s) => &s.reach,
            Self::DataStructure(s) => &s.reach,
            Self::DeclaredFile(s) => &s.reach,
            Self::Enum(s) => &s.reach,
            Self::ItemDs(s) => &s.reach,
            Self::ItemEnum(s) => &s.reach,
            Self::Procedure(s) => &s.reach,
            Self::Subroutine(s) => &s.reach,
            Self::ToDo(s) => &s.reach,
            Self::Variable(s) => &s.reach,
        };
    }
}

/// Variant tag of a [`Symbol`], used for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    /// `dcl-c`.
    Constant,
    /// `dcl-ds`.
    DataStructure,
    /// `dcl-f`.
    DeclaredFile,
    /// `dcl-enum`.
    Enum,
    /// Data-structure subfield.
    #[serde(rename = "itemDS")]
    ItemDs,
    /// Enumeration member.
    ItemEnum,
    /// `dcl-proc`.
    Procedure,
    /// `begsr`.
    Subroutine,
    /// Comment marker.
    ToDo,
    /// `dcl-s`.
    Variable,
}

impl SymbolKind {
    /// Section heading used by listings and reports.
    pub const fn heading(self) -> &'static str {
        return match self {
            Self::Constant => "Constants",
            Self::DataStructure => "Data structures",
            Self::DeclaredFile => "Declared files",
            Self::Enum => "Enums",
            Self::ItemDs => "Data structure subfields",
            Self::ItemEnum => "Enum members",
            Self::Procedure => "Procedures",
            Self::Subroutine => "Subroutines",
            Self::ToDo => "To-dos",
            Self::Variable => "Variables",
        };
    }

    /// True for the two kinds that only exist inside a composite.
    pub const fn is_member(self) -> bool {
        return matches!(self, Self::ItemDs | Self::ItemEnum);
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Constant => "constant",
            Self::DataStructure => "dataStructure",
            Self::DeclaredFile => "declaredFile",
            Self::Enum => "enum",
            Self::ItemDs => "itemDS",
            Self::ItemEnum => "itemEnum",
            Self::Procedure => "procedure",
            Self::Subroutine => "subroutine",
            Self::ToDo => "toDo",
            Self::Variable => "variable",
        };
        return f.write_str(label);
    }
}

/// Counts reported alongside the symbol list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Lines opening a conditional or loop.
    pub control_blocks: u32,
    /// Number of [`Symbol::ToDo`] entries in the document.
    pub to_dos: u32,
}

/// Result of one scan. Immutable once built; `metrics.to_dos` is derived from
/// the symbol list at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Aggregated counts.
    metrics: Metrics,
    /// Symbols in scan order, members directly after their parent.
    symbols: Vec<Symbol>,
}

impl Document {
    /// Assemble a document, deriving the to-do count from `symbols`.
    pub fn new(symbols: Vec<Symbol>, control_blocks: u32) -> Self {
        let metrics = crate::metrics::aggregate(&symbols, control_blocks);
        return Self { metrics, symbols };
    }

    /// Aggregated counts.
    pub const fn metrics(&self) -> Metrics {
        return self.metrics;
    }

    /// Symbols in scan order.
    pub fn symbols(&self) -> &[Symbol] {
        return &self.symbols;
    }
}
