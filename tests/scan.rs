use pretty_assertions::assert_eq;
use rpgscan::types::{FileType, Reach, SymbolKind};
use rpgscan::{Symbol, scan};

const EXAMPLE: &str = include_str!("fixtures/sample/qrpglesrc/example1.rpgle");

fn outline(source: &str) -> Vec<(SymbolKind, Option<String>, u32, Reach)> {
    scan(source)
        .symbols()
        .iter()
        .map(|s| (s.kind(), s.name().map(str::to_string), s.range().start.line, s.reach().clone()))
        .collect()
}

#[test]
fn every_construct_is_recognized_in_order() {
    let global = || Reach::Global;
    let main = || Reach::Procedure("main".to_string());
    let ds = || Reach::DataStructure("customer".to_string());
    let en = || Reach::Enum("status".to_string());
    let some = |s: &str| Some(s.to_string());

    assert_eq!(
        outline(EXAMPLE),
        vec![
            (SymbolKind::DeclaredFile, some("CUSTPF"), 3, global()),
            (SymbolKind::DeclaredFile, some("ORDDSPF"), 4, global()),
            (SymbolKind::DeclaredFile, some("REPORT"), 5, global()),
            (SymbolKind::Constant, some("MAX_ROWS"), 7, global()),
            (SymbolKind::Variable, some("counter"), 8, global()),
            (SymbolKind::Variable, some("totals"), 9, global()),
            (SymbolKind::DataStructure, some("customer"), 11, global()),
            (SymbolKind::ItemDs, some("id"), 12, ds()),
            (SymbolKind::ItemDs, some("name"), 13, ds()),
            (SymbolKind::ItemDs, some("phones"), 14, ds()),
            (SymbolKind::ToDo, None, 13, global()),
            (SymbolKind::Enum, some("status"), 17, global()),
            (SymbolKind::ItemEnum, some("ACTIVE"), 18, en()),
            (SymbolKind::ItemEnum, some("CLOSED"), 19, en()),
            (SymbolKind::ToDo, None, 22, global()),
            (SymbolKind::Procedure, some("main"), 23, global()),
            (SymbolKind::Variable, some("counter"), 26, main()),
            (SymbolKind::Subroutine, some("reset"), 34, main()),
            (SymbolKind::Procedure, some("helper"), 39, global()),
        ]
    );
}

#[test]
fn metrics_count_blocks_and_to_dos() {
    let doc = scan(EXAMPLE);
    assert_eq!(doc.metrics().control_blocks, 4);
    assert_eq!(doc.metrics().to_dos, 2);
}

#[test]
fn composite_details_survive() {
    let doc = scan(EXAMPLE);

    let Some(Symbol::DataStructure(customer)) = doc.symbols().get(6) else {
        panic!("expected the customer data structure");
    };
    assert_eq!(customer.options.as_deref(), Some("qualified"));
    assert_eq!(customer.values.len(), 3);
    let phones = customer.values.get(2).unwrap();
    assert!(phones.tab.is_tab);
    assert_eq!(phones.tab.tab_dim, "3");

    let files: Vec<FileType> = doc
        .symbols()
        .iter()
        .filter_map(|s| match s {
            Symbol::DeclaredFile(f) => Some(f.file_type),
            _ => None,
        })
        .collect();
    assert_eq!(files, vec![FileType::Data, FileType::Display, FileType::Printer]);

    let Some(Symbol::ToDo(first)) = doc.symbols().get(10) else {
        panic!("expected the to-do inside the data structure");
    };
    assert_eq!(first.text, "widen");
}

#[test]
fn rescanning_is_deterministic() {
    let first = serde_json::to_string(&scan(EXAMPLE)).unwrap();
    let second = serde_json::to_string(&scan(EXAMPLE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn crlf_source_scans_like_lf() {
    let crlf = EXAMPLE.replace('\n', "\r\n");
    assert_eq!(outline(&crlf), outline(EXAMPLE));
}
