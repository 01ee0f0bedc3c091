//! Java sources through the reference front end

use copyguard::features::diagnostics::ARITY_MESSAGE;
use copyguard::{
    AnalysisReport, AnalyzerConfig, CancellationToken, CopyProcedureAnalyzer, FindingReporter,
    JavaFrontend, Severity,
};
use pretty_assertions::assert_eq;

fn analyze(sources: &[&str]) -> AnalysisReport {
    JavaFrontend::default()
        .analyze(sources, &CopyProcedureAnalyzer::default(), &CancellationToken::new())
        .unwrap()
}

fn messages(report: &AnalysisReport) -> Vec<String> {
    report.diagnostics.iter().map(|d| d.message.clone()).collect()
}

const ORDER: &str = r#"
    import java.util.ArrayList;
    import java.util.List;

    public final class Order {
        public String id;
        public Customer customer;
        public List<Line> lines;
        @DeepCopyIgnore public Object cache;
        private int secret;
        public static int COUNT;

        @DeepCopy
        public static Order copy(Order src) {
            Order out = new Order();
            out.id = src.id;
            out.customer = new Customer(src.customer.name(), null);
            out.lines = new ArrayList<>();
            for (Line line : src.lines) {
                out.lines.add(line.duplicate());
            }
            return out;
        }
    }

    record Customer(String name, Address address) {}

    final class Address {
        public String street;
    }

    final class Line {
        public int qty;

        Line duplicate() {
            Line line = new Line();
            line.qty = qty;
            return line;
        }
    }
"#;

#[test]
fn test_missing_nested_record_member() {
    let report = analyze(&[ORDER]);

    assert_eq!(report.stats.copy_procedures, 1);
    assert_eq!(
        messages(&report),
        vec!["Copy procedure 'Order.copy' does not copy: customer.address.street"]
    );
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn test_open_parameter_type() {
    let source = r#"
        class Shape {
            public int sides;
            @DeepCopy static Shape copy(Shape s) { return null; }
        }
    "#;
    let report = analyze(&[source]);
    assert_eq!(messages(&report), vec!["parameter type 'Shape' must be closed"]);
    assert_eq!(report.diagnostics[0].id, "CPY001");
}

#[test]
fn test_open_member_type() {
    let source = r#"
        interface Shape { int area(); }

        final class Holder {
            public Shape shape;
            @DeepCopy static Holder copy(Holder h) {
                Holder out = new Holder();
                out.shape = h.shape;
                return out;
            }
        }
    "#;
    let report = analyze(&[source]);
    assert_eq!(
        messages(&report),
        vec!["type 'Shape' of member 'shape' must be closed"]
    );
}

#[test]
fn test_arity_and_unresolved_parameters() {
    let source = r#"
        final class Foo {
            public int a;
            @DeepCopy static Foo merge(Foo left, Foo right) { return left; }
            @DeepCopy static Foo fromUnknown(Unknown u) { return null; }
        }
    "#;
    let report = analyze(&[source]);

    assert_eq!(messages(&report), vec![ARITY_MESSAGE.to_string()]);
    assert_eq!(report.diagnostics[0].procedure, "Foo.merge");
    assert_eq!(report.stats.unresolved, 1);
}

#[test]
fn test_anonymous_class_parameter_is_not_the_copy_source() {
    let source = r#"
        import java.util.function.Consumer;

        final class Foo {
            public int a;
            public int b;

            @DeepCopy
            static Foo copy(Foo foo) {
                Consumer<Foo> sink = new Consumer<Foo>() {
                    public void accept(Foo foo) { int x = foo.b; }
                };
                Foo out = new Foo();
                out.a = foo.a;
                return out;
            }
        }
    "#;
    let report = analyze(&[source]);
    assert_eq!(
        messages(&report),
        vec!["Copy procedure 'Foo.copy' does not copy: b"]
    );
}

#[test]
fn test_local_class_reads_of_the_copy_source_count() {
    let source = r#"
        final class Foo {
            public int a;
            public int b;

            @DeepCopy
            static Foo copy(Foo foo) {
                class Helper {
                    int get() { return foo.b; }
                }
                Foo out = new Foo();
                out.a = foo.a;
                out.b = new Helper().get();
                return out;
            }
        }
    "#;
    let report = analyze(&[source]);
    assert!(report.diagnostics.is_empty(), "{:?}", messages(&report));
    assert_eq!(report.stats.copy_procedures, 1);
}

#[test]
fn test_deeply_nested_expression_is_unresolved() {
    let sum = vec!["foo.a"; 20_000].join(" + ");
    let source = format!(
        "final class Foo {{ public int a; public int b; @DeepCopy static Foo copy(Foo foo) {{ int s = {}; return null; }} }}",
        sum
    );
    let report = analyze(&[source.as_str()]);

    assert!(report.diagnostics.is_empty());
    assert_eq!(report.stats.unresolved, 1);
}

#[test]
fn test_qualified_marker_names_honor_imports() {
    let config = AnalyzerConfig::default().with_markers("com.acme.DeepCopy", "com.acme.DeepCopyIgnore");
    let frontend = JavaFrontend::new(&config);
    let source = r#"
        import com.acme.DeepCopy;

        final class Foo {
            public int a;
            @DeepCopy static Foo copy(Foo foo) { return null; }
            @org.other.DeepCopy static Foo other(Foo foo) { return null; }
            @com.acme.DeepCopy static Foo qualified(Foo foo) { return null; }
        }
    "#;
    let report = frontend
        .analyze(&[source], &CopyProcedureAnalyzer::default(), &CancellationToken::new())
        .unwrap();

    assert_eq!(report.stats.copy_procedures, 2);
    let procedures: Vec<&str> = report.diagnostics.iter().map(|d| d.procedure.as_str()).collect();
    assert_eq!(procedures, vec!["Foo.copy", "Foo.qualified"]);
}

#[test]
fn test_generic_instantiation_across_files() {
    let boxed = "public final class Box<T> { public T value; }";
    let item = "public final class Item { public int id; }";
    let copier = r#"
        final class Copier {
            @DeepCopy
            static Box<Item> copy(Box<Item> b) {
                Box<Item> out = new Box<>();
                out.value = new Item();
                return out;
            }
        }
    "#;

    let report = analyze(&[boxed, item, copier]);
    assert_eq!(
        messages(&report),
        vec!["Copy procedure 'Copier.copy' does not copy: value.id"]
    );
}

#[test]
fn test_strict_preset_rejects_iterating_the_parameter_only() {
    let source = r#"
        import java.util.List;

        final class Bag {
            public List<String> items;
            @DeepCopy static Bag copy(Bag bag) {
                for (Object o : bag) { }
                return null;
            }
        }
    "#;
    let cancel = CancellationToken::new();
    let frontend = JavaFrontend::default();

    let permissive = frontend
        .analyze(&[source], &CopyProcedureAnalyzer::default(), &cancel)
        .unwrap();
    assert!(permissive.diagnostics.is_empty());

    let strict = frontend
        .analyze(
            &[source],
            &CopyProcedureAnalyzer::new(AnalyzerConfig::preset(copyguard::Preset::Strict)),
            &cancel,
        )
        .unwrap();
    assert_eq!(
        messages(&strict),
        vec!["Copy procedure 'Bag.copy' does not copy: items"]
    );
}

#[test]
fn test_findings_export_as_json() {
    let report = analyze(&[ORDER]);
    let reporter = FindingReporter::new();

    let json = reporter.to_json(&report.diagnostics).unwrap();
    assert!(json.contains("\"CPY002\""));
    assert_eq!(reporter.from_json(&json).unwrap(), report.diagnostics);
}
