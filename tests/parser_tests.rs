use pretty_assertions::assert_eq;
use proflog_studio::parser::{
    parse_csv_table, parse_profile, parse_text_table, CellValue, InputFormat, TextTableParser,
};
use proflog_studio::utils::ParseError;
use std::fs::File;
use std::io::BufReader;

fn fixture(name: &str) -> BufReader<File> {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    BufReader::new(File::open(path).unwrap())
}

#[test]
fn test_minimal_report_with_two_columns() {
    let report = "----- -----\nName  Dur  \n----- -----\nopA   5ms  \n----- -----\n";
    let table = parse_text_table(report.as_bytes()).unwrap();

    assert_eq!(table.columns, vec!["Name", "Dur"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, "Name"), Some(&CellValue::Text("opA".into())));
    // Dur is not a known duration column and keeps its raw text
    assert_eq!(table.cell(0, "Dur"), Some(&CellValue::Text("5ms".into())));
}

#[test]
fn test_minimal_report_with_duration_column() {
    let report = "----- ----------\nName    Self CPU\n----- ----------\nopA          5ms\n----- ----------\n";
    let table = parse_text_table(report.as_bytes()).unwrap();

    assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(5.0)));
}

#[test]
fn test_layout_reproduces_header() {
    let mut parser = TextTableParser::new();
    let header = "                     Name     Self CPU %       Self CPU";
    parser.feed_line("-------------------------  -------------  -------------");
    parser.feed_line(header);

    let layout = parser.layout().unwrap();
    assert_eq!(layout.stops(), &[27, 42, 57]);
    assert_eq!(layout.split(header), vec!["Name", "Self CPU %", "Self CPU"]);
}

#[test]
fn test_parse_profiler_report_fixture() {
    let table = parse_profile(fixture("sample_profile.log"), InputFormat::Text).unwrap();

    assert_eq!(table.columns.len(), 11);
    assert_eq!(
        table.names(),
        vec![Some("aten::addmm"), Some("aten::relu"), Some("cudaLaunchKernel")]
    );

    let relu = table.find_row("aten::relu").unwrap();
    assert_eq!(table.cell(relu, "Self CPU %"), Some(&CellValue::Float(10.0)));
    assert_eq!(table.cell(relu, "CPU time avg"), Some(&CellValue::Float(0.5)));
    assert_eq!(table.cell(relu, "CUDA time avg"), Some(&CellValue::Float(0.25)));
    assert_eq!(table.cell(relu, "# of Calls"), Some(&CellValue::Int(2)));

    let launch = table.find_row("cudaLaunchKernel").unwrap();
    assert_eq!(table.cell(launch, "Self CUDA"), Some(&CellValue::Float(0.0)));
    assert_eq!(table.cell(launch, "Self CUDA %"), Some(&CellValue::Float(0.0)));
}

#[test]
fn test_unknown_duration_unit_is_an_error() {
    let report = "-----  ----------\n Name    Self CPU\n-----  ----------\n  opA       3min\n";
    let err = parse_text_table(report.as_bytes()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { line: 4, .. }));
}

#[test]
fn test_csv_table_container() {
    let csv = "Name,Self CPU %,Self CPU,# of Calls\naten::mm,75.0,3.0,2\naten::relu,25.0,,4\n";
    let table = parse_profile(csv.as_bytes(), InputFormat::Table).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, "Self CPU"), Some(&CellValue::Float(3.0)));
    assert_eq!(table.cell(1, "Self CPU"), None);
    assert_eq!(table.cell(1, "# of Calls"), Some(&CellValue::Int(4)));
}

#[test]
fn test_csv_rejects_fractional_call_count() {
    let csv = "Name,# of Calls\nop,2.5\n";
    assert!(matches!(
        parse_csv_table(csv.as_bytes()),
        Err(ParseError::InvalidValue { line: 2, .. })
    ));
}

#[test]
fn test_input_format_names() {
    assert_eq!("JSON".parse::<InputFormat>().unwrap(), InputFormat::Json);
    assert_eq!("table".parse::<InputFormat>().unwrap(), InputFormat::Table);
    assert!(matches!(
        "xlsx".parse::<InputFormat>(),
        Err(ParseError::UnsupportedFormat(_))
    ));
}
