//! 生成管线门面
//!
//! 组织一次完整的生成过程：四个种类提取并发运行，
//! 聚合校验串行执行，校验通过才进入发射；
//! 校验失败时向诊断接收器报告并抑制本单元的模块产出

use crate::aggregator::{aggregate, AggregationOutcome};
use crate::emitter::{emit_module, GeneratedModule};
use crate::extractor::{
    ConstantResolver, KindResolver, LazySingletonResolver, TransientResolver,
};
use crate::view_binding::ViewModelBindingResolver;
use async_trait::async_trait;
use codegen_common::{
    BuildConfiguration, DiagnosticSink, GenerationUnit, GeneratorError, GeneratorResult,
};
use dashmap::DashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// 声明提供器 trait
///
/// 由宿主工具链实现，向生成器供给生成单元快照
#[async_trait]
pub trait DeclarationProvider: Send + Sync {
    /// 加载全部生成单元
    async fn load_units(&self) -> GeneratorResult<Vec<GenerationUnit>>;
}

/// 静态声明提供器
///
/// 持有固定的生成单元快照，用于测试和进程内宿主
#[derive(Debug, Clone, Default)]
pub struct StaticDeclarationProvider {
    units: Vec<GenerationUnit>,
}

impl StaticDeclarationProvider {
    /// 以固定单元集合创建提供器
    pub fn new(units: Vec<GenerationUnit>) -> Self {
        Self { units }
    }
}

#[async_trait]
impl DeclarationProvider for StaticDeclarationProvider {
    async fn load_units(&self) -> GeneratorResult<Vec<GenerationUnit>> {
        Ok(self.units.clone())
    }
}

/// 注册代码生成器
///
/// 每次生成过程的全部中间值都是过程内新建的不可变快照，
/// 过程之间不保留任何状态
pub struct Generator {
    configuration: BuildConfiguration,
    sink: Arc<dyn DiagnosticSink>,
    resolvers: Vec<Box<dyn KindResolver>>,
}

impl Generator {
    /// 创建新的生成器
    ///
    /// 解析器按固定种类顺序装配，聚合与发射都依赖该顺序
    pub fn new(configuration: BuildConfiguration, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            configuration,
            sink,
            resolvers: vec![
                Box::new(TransientResolver),
                Box::new(ConstantResolver),
                Box::new(LazySingletonResolver),
                Box::new(ViewModelBindingResolver),
            ],
        }
    }

    /// 校验生成单元的声明快照
    fn validate_unit(unit: &GenerationUnit) -> GeneratorResult<()> {
        if unit.name.trim().is_empty() {
            return Err(GeneratorError::invalid_declaration_graph(
                unit.name.clone(),
                "生成单元名称不能为空",
            ));
        }
        for declaration in &unit.declarations {
            if declaration.name.trim().is_empty() {
                return Err(GeneratorError::invalid_declaration_graph(
                    unit.name.clone(),
                    "组件声明名称不能为空",
                ));
            }
        }
        Ok(())
    }

    /// 处理一个生成单元
    ///
    /// 校验通过返回生成模块；检测到重复注册时向接收器
    /// 报告每一处冲突并返回 `None`，本单元不产出模块
    pub async fn generate_unit(
        &self,
        unit: &GenerationUnit,
    ) -> GeneratorResult<Option<GeneratedModule>> {
        Self::validate_unit(unit)?;
        info!(unit = %unit.name, declarations = unit.declarations.len(), "开始生成过程");

        // 四个种类提取相互独立，并发运行；join 顺序即固定种类顺序
        let passes = self
            .resolvers
            .iter()
            .map(|resolver| async move { resolver.resolve_unit(unit) });
        let collections = futures::future::join_all(passes).await;

        match aggregate(collections) {
            AggregationOutcome::Success(descriptors) => {
                let module = emit_module(self.configuration.resolve_namespace(), &descriptors);
                info!(
                    unit = %unit.name,
                    entry_point = %module.entry_point_name,
                    "生成过程完成"
                );
                Ok(Some(module))
            }
            AggregationOutcome::Failure(diagnostics) => {
                warn!(
                    unit = %unit.name,
                    conflicts = diagnostics.len(),
                    "生成过程失败, 不产出模块"
                );
                for diagnostic in diagnostics {
                    self.sink.report(diagnostic).await?;
                }
                Ok(None)
            }
        }
    }

    /// 并发处理多个生成单元
    ///
    /// 单元之间相互独立：某个单元校验失败不影响其余单元产出；
    /// 返回单元名到生成模块的映射，失败单元不在其中
    pub async fn generate_all(
        &self,
        units: &[GenerationUnit],
    ) -> GeneratorResult<DashMap<String, GeneratedModule>> {
        let mut seen = HashSet::new();
        for unit in units {
            if !seen.insert(unit.name.as_str()) {
                return Err(GeneratorError::DuplicateUnitName {
                    name: unit.name.clone(),
                });
            }
        }

        let modules = DashMap::new();
        let results = futures::future::join_all(units.iter().map(|unit| {
            let modules = &modules;
            async move {
                if let Some(module) = self.generate_unit(unit).await? {
                    modules.insert(unit.name.clone(), module);
                }
                Ok::<(), GeneratorError>(())
            }
        }))
        .await;

        for result in results {
            result?;
        }

        Ok(modules)
    }

    /// 从声明提供器加载单元并执行生成
    pub async fn generate_from(
        &self,
        provider: &dyn DeclarationProvider,
    ) -> GeneratorResult<DashMap<String, GeneratedModule>> {
        let units = provider.load_units().await?;
        self.generate_all(&units).await
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("configuration", &self.configuration)
            .field("resolvers", &self.resolvers.len())
            .field("sink", &"<dyn DiagnosticSink>")
            .finish()
    }
}
