//! # Registration Generator
//!
//! 这个 crate 实现了 Lorn RegGen 的描述符提取与发射管线：
//! 扫描携带注册意图的组件声明，解析为具体的注册描述符，
//! 检测冲突绑定，并发射针对可变服务解析器执行注册的源码文本。
//!
//! ## 管线阶段
//!
//! 1. **提取**: 四个种类解析器相互独立，可并发运行
//! 2. **聚合**: 唯一的串行化点，按固定种类顺序合并并检测重复
//! 3. **发射**: 将通过校验的描述符集合渲染为单个生成模块
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use codegen_common::{BuildConfiguration, GenerationUnit, InMemoryDiagnosticSink};
//! use registration_generator::Generator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(InMemoryDiagnosticSink::new());
//!     let generator = Generator::new(BuildConfiguration::new(), sink);
//!
//!     let unit = GenerationUnit::new("app");
//!     if let Some(module) = generator.generate_unit(&unit).await? {
//!         println!("{}", module.source_text);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod emitter;
pub mod extractor;
pub mod generator;
pub mod view_binding;

pub use aggregator::{aggregate, AggregationOutcome};
pub use emitter::{emit_module, GeneratedModule};
pub use extractor::{
    ConstantResolver, KindResolver, LazySingletonResolver, TransientResolver,
};
pub use generator::{DeclarationProvider, Generator, StaticDeclarationProvider};
pub use view_binding::ViewModelBindingResolver;
