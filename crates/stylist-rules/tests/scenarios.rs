//! End-to-end scenarios through the engine with the C# parser and every
//! built-in analyzer.

use std::fs;
use std::path::Path;

use stylist_core::{Config, Engine, Profile, Violation};
use stylist_csharp::CSharpParser;
use stylist_rules::{all_analyzers, configured_analyzers};
use tempfile::TempDir;

fn engine(config: Config) -> Engine {
    Engine::builder()
        .root(".")
        .parser(CSharpParser::new())
        .analyzers(configured_analyzers(&config))
        .config(config)
        .build()
        .unwrap()
}

fn check(file: &str, code: &str) -> Vec<Violation> {
    engine(Config::new())
        .check_source(Path::new(file), code)
        .unwrap()
}

fn of_rule<'a>(violations: &'a [Violation], rule: &str) -> Vec<&'a Violation> {
    violations.iter().filter(|v| v.rule == rule).collect()
}

#[test]
fn space_indentation_is_reported_with_tab_fix() {
    let violations = check("Test.cs", "class Test\n{\n\tvoid M()\n\t{\n    Foo();\n\t}\n}\n");
    let indent = of_rule(&violations, "IndentWithTabs");
    assert_eq!(indent.len(), 1);
    assert_eq!(indent[0].location.line, 5);
    assert_eq!(indent[0].location.column, 1);
    assert_eq!(indent[0].location.length, 4);
    assert_eq!(indent[0].code, "Stylist_IndentWithTabs");

    let fix = indent[0]
        .suggestion
        .as_ref()
        .and_then(|s| s.replacement.as_ref())
        .unwrap();
    assert_eq!(fix.new_text, "\t");
}

#[test]
fn uncommented_statements_form_one_segment() {
    let body = |comment: &str| {
        format!("class Test\n{{\n\tvoid M()\n\t{{\n{comment}\t\tint i = 0;\n\t\tint u = 0;\n\t}}\n}}\n")
    };
    let violations = check("Test.cs", &body(""));
    let segments = of_rule(&violations, "CommentedSegments");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].location.line, 5);

    let violations = check("Test.cs", &body("\t\t// Foo\n"));
    assert!(of_rule(&violations, "CommentedSegments").is_empty());
}

#[test]
fn file_name_follows_top_level_type() {
    let violations = check("Bar.cs", "namespace Shapes\n{\n\tclass Foo { }\n}\n");
    let files = of_rule(&violations, "NameFilesAccordingToTypeNames");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].args, vec!["Foo", "Foo.cs"]);

    let violations = check(
        "Foo.cs",
        "namespace Shapes\n{\n\tenum Foo { A }\n\n\tstatic class FooHelper { }\n}\n",
    );
    assert!(of_rule(&violations, "NameFilesAccordingToTypeNames").is_empty());
}

#[test]
fn lower_case_interface_gets_two_violations_at_identifier() {
    let violations = check("bar.cs", "interface bar { }\n");
    let naming: Vec<_> = violations
        .iter()
        .filter(|v| v.rule == "NameTypesWithPascalCasing" || v.rule == "NameInterfacesWithIPrefix")
        .collect();
    assert_eq!(naming.len(), 2);
    for violation in naming {
        assert_eq!((violation.location.line, violation.location.column), (1, 11));
        assert!(violation.args.iter().any(|a| a == "bar"));
    }
}

#[test]
fn parameters_sharing_a_line_name_the_later_one() {
    let violations = check(
        "Test.cs",
        "class Test\n{\n\tvoid Foo( string a, string b )\n\t{\n\t}\n}\n",
    );
    let params = of_rule(&violations, "ParametersOnTheirOwnLines");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].args, vec!["b"]);
}

#[test]
fn lenient_profile_leaves_default_off_rules_silent() {
    let code = "class Test\n{\n\tvoid M()\n\t{\n\t\tint i = 0;\n\t\tint u = 0;\n\t}\n}\n";
    let strict = check("Test.cs", code);
    assert!(!of_rule(&strict, "CommentedSegments").is_empty());
    assert!(!of_rule(&strict, "XmlDocumentEverythingWithSummary").is_empty());

    let lenient = engine(Config {
        profile: Profile::Lenient,
        ..Config::new()
    })
    .check_source(Path::new("Test.cs"), code)
    .unwrap();
    assert!(of_rule(&lenient, "CommentedSegments").is_empty());
    assert!(of_rule(&lenient, "XmlDocumentEverythingWithSummary").is_empty());
}

#[test]
fn allowance_directive_suppresses_rule_on_next_line() {
    let code = "class Test\n{\n\t// stylist: allow(NameFieldsWithCamelCase) reason=\"interop\"\n\tint Raw_Value;\n\tint Other_Value;\n}\n";
    let violations = check("Test.cs", code);
    let fields = of_rule(&violations, "NameFieldsWithCamelCase");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].args, vec!["Other_Value"]);
}

#[test]
fn line_limit_comes_from_rule_section() {
    let config = Config::parse(
        r"
[rules.KeepLinesWithin120Characters]
max_line_length = 30
",
    )
    .unwrap();
    let code = "class Test\n{\n\tint someRatherLongFieldName = 1234567;\n}\n";
    let violations = engine(config)
        .check_source(Path::new("Test.cs"), code)
        .unwrap();
    let long = of_rule(&violations, "KeepLinesWithin120Characters");
    assert_eq!(long.len(), 1);
    assert_eq!(long[0].args, vec!["30"]);
}

#[test]
fn analyzes_project_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Good.cs"),
        "/// <summary>Good.</summary>\r\nclass Good\r\n{\r\n}\r\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("obj")).unwrap();
    fs::write(dir.path().join("obj").join("Generated.cs"), "class generated_code { }\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "not c#\n").unwrap();

    let engine = Engine::builder()
        .root(dir.path())
        .parser(CSharpParser::new())
        .analyzers(all_analyzers())
        .build()
        .unwrap();
    let result = engine.analyze().unwrap();
    assert_eq!(result.files_checked, 1);
    assert!(result.violations.is_empty(), "{:?}", result.violations);
}
