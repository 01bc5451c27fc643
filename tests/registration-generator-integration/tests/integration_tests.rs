//! Centralized integration tests for the registration-generator pipeline

use codegen_common::{
    BuildConfiguration, ComponentDeclaration, DiagnosticSeverity, GenerationUnit,
    InMemoryDiagnosticSink, RegistrationIntent, RegistrationKind, SourceLocation,
    DEFAULT_NAMESPACE_KEY, DUPLICATE_REGISTRATION_CODE, ROOT_NAMESPACE_KEY,
};
use registration_generator::Generator;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("registration_generator=debug")
        .try_init();
}

fn location(line: u32) -> SourceLocation {
    SourceLocation::new("src/app.rs", line, 1)
}

fn generator(configuration: BuildConfiguration) -> (Generator, Arc<InMemoryDiagnosticSink>) {
    let sink = Arc::new(InMemoryDiagnosticSink::new());
    (Generator::new(configuration, sink.clone()), sink)
}

#[tokio::test]
async fn test_transient_intent_with_empty_targets_emits_self_registration() {
    init_tracing();
    let (generator, sink) = generator(BuildConfiguration::new());
    let unit = GenerationUnit::new("app").with_declaration(
        ComponentDeclaration::new("app::Foo").with_intent(RegistrationIntent::new(
            RegistrationKind::Transient,
            location(1),
        )),
    );

    let module = generator.generate_unit(&unit).await.unwrap().unwrap();

    assert_eq!(module.entry_point_name, "register_all");
    assert!(module
        .source_text
        .contains("    resolver.register(|| Box::new(app::Foo::default()), None, None);"));
    assert!(sink.diagnostics().await.is_empty());
}

#[tokio::test]
async fn test_cross_kind_duplicate_suppresses_module_and_reports_both() {
    init_tracing();
    let (generator, sink) = generator(BuildConfiguration::new());
    let unit = GenerationUnit::new("app").with_declaration(
        ComponentDeclaration::new("app::Bar")
            .with_intent(
                RegistrationIntent::new(RegistrationKind::Transient, location(4))
                    .with_target("app::IThing"),
            )
            .with_intent(
                RegistrationIntent::new(RegistrationKind::Constant, location(5))
                    .with_target("app::IThing"),
            ),
    );

    let module = generator.generate_unit(&unit).await.unwrap();

    assert!(module.is_none());
    let diagnostics = sink.diagnostics().await;
    assert_eq!(diagnostics.len(), 2);
    for diagnostic in &diagnostics {
        assert_eq!(diagnostic.code, DUPLICATE_REGISTRATION_CODE);
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
        assert!(diagnostic.message.contains("app::Bar"));
    }
    assert_eq!(diagnostics[0].location.line, 4);
    assert_eq!(diagnostics[1].location.line, 5);
}

#[tokio::test]
async fn test_statements_follow_kind_then_discovery_order() {
    init_tracing();
    let configuration = BuildConfiguration::new().with_value(ROOT_NAMESPACE_KEY, "Acme.App");
    let (generator, _sink) = generator(configuration);

    // 声明顺序与种类顺序交错，验证种类优先的稳定排序
    let unit = GenerationUnit::new("app")
        .with_declaration(
            ComponentDeclaration::new("app::Cache").with_intent(RegistrationIntent::new(
                RegistrationKind::LazySingleton,
                location(1),
            )),
        )
        .with_declaration(
            ComponentDeclaration::new("app::Settings").with_intent(RegistrationIntent::new(
                RegistrationKind::Constant,
                location(2),
            )),
        )
        .with_declaration(
            ComponentDeclaration::new("app::Worker").with_intent(RegistrationIntent::new(
                RegistrationKind::Transient,
                location(3),
            )),
        )
        .with_declaration(
            ComponentDeclaration::new("app::MainView").with_intent(
                RegistrationIntent::new(RegistrationKind::ViewModelBinding, location(4))
                    .with_annotation("BindViewModel<app::MainViewModel>"),
            ),
        );

    let module = generator.generate_unit(&unit).await.unwrap().unwrap();
    let text = &module.source_text;

    let worker = text.find("app::Worker").unwrap();
    let settings = text.find("app::Settings").unwrap();
    let cache = text.find("app::Cache").unwrap();
    let view = text.find("app::MainView").unwrap();
    assert!(worker < settings && settings < cache && cache < view);

    assert!(text.contains("use registration_runtime::ViewFor;"));
    assert!(text.contains(
        "    resolver.register(|| Box::new(app::MainView::default()), \
         Some(ServiceKey::of::<ViewFor<app::MainViewModel>>()), None);"
    ));
}

#[tokio::test]
async fn test_root_namespace_takes_precedence_over_default() {
    init_tracing();
    let configuration = BuildConfiguration::new()
        .with_value(ROOT_NAMESPACE_KEY, "Acme.App")
        .with_value(DEFAULT_NAMESPACE_KEY, "Ignored");
    let (generator, _sink) = generator(configuration);
    let unit = GenerationUnit::new("app");

    let module = generator.generate_unit(&unit).await.unwrap().unwrap();

    assert_eq!(module.entry_point_name, "register_all_acmeapp");
    assert!(module.source_text.contains("`Acme.App`"));
}

#[tokio::test]
async fn test_declaration_graph_decodes_from_json_boundary() {
    init_tracing();
    let json = r#"{
        "name": "app",
        "declarations": [
            {
                "name": "app::Composite",
                "base_type": { "name": "app::Base", "contracts": ["app::IInherited"] },
                "contracts": ["app::IInherited", "app::IOwn"],
                "intents": [
                    {
                        "kind": "Transient",
                        "arguments": ["app::IExplicit", ["app::ISecond"]],
                        "include_base_type": true,
                        "include_interfaces": true,
                        "location": { "file": "src/app.rs", "line": 7, "column": 1 }
                    }
                ]
            }
        ]
    }"#;
    let unit: GenerationUnit = serde_json::from_str(json).unwrap();
    let (generator, _sink) = generator(BuildConfiguration::new());

    let module = generator.generate_unit(&unit).await.unwrap().unwrap();
    let text = &module.source_text;

    // 显式目标 → 基类 → 直接契约的累加顺序
    let explicit = text.find("app::IExplicit").unwrap();
    let second = text.find("app::ISecond").unwrap();
    let base = text.find("ServiceKey::of::<app::Base>").unwrap();
    let own = text.find("app::IOwn").unwrap();
    assert!(explicit < second && second < base && base < own);
    assert!(!text.contains("app::IInherited"));
}

#[tokio::test]
async fn test_unresolvable_view_model_is_dropped_without_diagnostics() {
    init_tracing();
    let (generator, sink) = generator(BuildConfiguration::new());
    let unit = GenerationUnit::new("app")
        .with_declaration(
            ComponentDeclaration::new("app::OrphanView").with_intent(
                RegistrationIntent::new(RegistrationKind::ViewModelBinding, location(1))
                    .with_annotation("BindViewModel"),
            ),
        )
        .with_declaration(
            ComponentDeclaration::new("app::Foo").with_intent(RegistrationIntent::new(
                RegistrationKind::Transient,
                location(2),
            )),
        );

    let module = generator.generate_unit(&unit).await.unwrap().unwrap();

    assert!(!module.source_text.contains("app::OrphanView"));
    assert!(module.source_text.contains("app::Foo"));
    assert!(sink.diagnostics().await.is_empty());
}

#[tokio::test]
async fn test_generate_all_keeps_units_independent() {
    init_tracing();
    let (generator, sink) = generator(BuildConfiguration::new());
    let failing = GenerationUnit::new("failing").with_declaration(
        ComponentDeclaration::new("app::Bar")
            .with_intent(RegistrationIntent::new(
                RegistrationKind::Transient,
                location(1),
            ))
            .with_intent(RegistrationIntent::new(
                RegistrationKind::LazySingleton,
                location(2),
            )),
    );
    let healthy = GenerationUnit::new("healthy").with_declaration(
        ComponentDeclaration::new("app::Foo").with_intent(RegistrationIntent::new(
            RegistrationKind::Transient,
            location(3),
        )),
    );

    let modules = generator.generate_all(&[failing, healthy]).await.unwrap();

    assert_eq!(modules.len(), 1);
    assert!(modules.get("failing").is_none());
    let healthy_module = modules.get("healthy").unwrap();
    assert!(healthy_module.source_text.contains("app::Foo"));
    assert_eq!(sink.diagnostics().await.len(), 2);
}
