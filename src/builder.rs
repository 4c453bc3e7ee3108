//! Turns matcher captures into typed [`Symbol`] records.
use crate::block::Block;
use crate::matchers::{self, Declaration, ProcedureOpen, VariableDecl};
use crate::splitter::{split_line, utf16_len};
use crate::types::{
    Constant, DataStructure, DeclaredFile, Enum, FileType, ItemDs, ItemEnum, Procedure, Range,
    Reach, Subroutine, Symbol, Tab, ToDo, Variable,
};

/// Range spanning columns `0..len(text)` of raw line `line`.
pub fn line_range(line: usize, text: &str) -> Range {
    let line = u32::try_from(line).unwrap_or(u32::MAX);
    return Range::line_span(line, utf16_len(text));
}

/// Look for a `dim(N)` keyword in a type or options string.
pub fn extract_tab(text: &str) -> Tab {
    return match matchers::dimension(text) {
        Some(dim) => Tab { is_tab: true, tab_dim: dim.to_string() },
        None => Tab::default(),
    };
}

/// Classify a `dcl-f` by its device keyword.
pub fn file_type(options: &str) -> FileType {
    let lowered = options.to_lowercase();
    if lowered.contains("workstn") {
        return FileType::Display;
    }
    if lowered.contains("printer") {
        return FileType::Printer;
    }
    return FileType::Data;
}

/// Procedures are never nested, so their own reach is always global.
pub fn procedure(open: ProcedureOpen<'_>, range: Range) -> Symbol {
    return Symbol::Procedure(Procedure {
        is_export: open.is_export,
        name: open.name.to_string(),
        range,
        reach: Reach::Global,
    });
}

/// Build a `begsr` symbol.
pub fn subroutine(name: &str, range: Range, reach: Reach) -> Symbol {
    return Symbol::Subroutine(Subroutine { name: name.to_string(), range, reach });
}

/// Build a `dcl-c` symbol. A missing value becomes the empty string.
pub fn constant(decl: Declaration<'_>, range: Range, reach: Reach) -> Symbol {
    return Symbol::Constant(Constant {
        name: decl.name.to_string(),
        range,
        reach,
        value: decl.rest.unwrap_or_default().to_string(),
    });
}

/// Build a `dcl-s` symbol. The type text is lowercased before the dimension lookup.
pub fn variable(decl: VariableDecl<'_>, range: Range, reach: Reach) -> Symbol {
    let dcl_type = decl.dcl_type.to_lowercase();
    let tab = extract_tab(&dcl_type);
    return Symbol::Variable(Variable {
        dcl_type,
        name: decl.name.to_string(),
        range,
        reach,
        tab,
    });
}

/// Build a data structure followed by one `ItemDs` per member line.
pub fn data_structure(decl: Declaration<'_>, body: &Block<'_>, range: Range, reach: Reach) -> Vec<Symbol> {
    let options = decl.rest.map(str::to_lowercase);
    let tab = options.as_deref().map(extract_tab).unwrap_or_default();
    let owner = Reach::DataStructure(decl.name.to_string());

    let values: Vec<ItemDs> = members(body)
        .map(|(member, range)| {
            return ItemDs {
                dcl_type: member.value.to_string(),
                name: member.name.to_string(),
                range,
                reach: owner.clone(),
                tab: extract_tab(member.value),
            };
        })
        .collect();

    let mut symbols = Vec::with_capacity(values.len().saturating_add(1));
    symbols.push(Symbol::DataStructure(DataStructure {
        name: decl.name.to_string(),
        options,
        range,
        reach,
        tab,
        values: values.clone(),
    }));
    symbols.extend(values.into_iter().map(Symbol::ItemDs));
    return symbols;
}

/// Build an enumeration followed by one `ItemEnum` per member line.
pub fn enumeration(decl: Declaration<'_>, body: &Block<'_>, range: Range, reach: Reach) -> Vec<Symbol> {
    let owner = Reach::Enum(decl.name.to_string());

    let values: Vec<ItemEnum> = members(body)
        .map(|(member, range)| {
            return ItemEnum {
                name: member.name.to_string(),
                range,
                reach: owner.clone(),
                value: member.value.to_string(),
            };
        })
        .collect();

    let mut symbols = Vec::with_capacity(values.len().saturating_add(1));
    symbols.push(Symbol::Enum(Enum {
        name: decl.name.to_string(),
        options: decl.rest.map(str::to_lowercase),
        range,
        reach,
        values: values.clone(),
    }));
    symbols.extend(values.into_iter().map(Symbol::ItemEnum));
    return symbols;
}

/// Member lines of a block with their ranges. Trailing comments are ignored
/// when matching; the range covers the whole trimmed line.
fn members<'a>(body: &'a Block<'a>) -> impl Iterator<Item = (matchers::Member<'a>, Range)> + 'a {
    return body.lines.iter().filter_map(|block_line| {
        let member = matchers::member(split_line(block_line.text).code)?;
        return Some((member, line_range(block_line.line, block_line.text)));
    });
}

/// Build a `dcl-f` symbol.
pub fn declared_file(decl: Declaration<'_>, range: Range, reach: Reach) -> Symbol {
    let file_options = decl.rest.unwrap_or_default().to_string();
    return Symbol::DeclaredFile(DeclaredFile {
        file_type: file_type(&file_options),
        file_options,
        name: decl.name.to_string(),
        range,
        reach,
    });
}

/// Build a to-do marker symbol.
pub fn to_do(text: &str, range: Range, reach: Reach) -> Symbol {
    return Symbol::ToDo(ToDo { range, reach, text: text.to_string() });
}
