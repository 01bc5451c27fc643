//! 描述符提取
//!
//! 将一条注册意图解析为零个或多个注册描述符；
//! 提取是 (意图, 声明) 的纯函数，无共享可变状态，可按声明独立运行

use codegen_common::{
    is_universal_root, ComponentDeclaration, GenerationUnit, RegistrationDescriptor,
    RegistrationIntent, RegistrationKind,
};
use tracing::debug;

/// 种类解析器 trait
///
/// 四个注册种类各有一个解析器实现，产出带有自身种类标记的描述符
pub trait KindResolver: Send + Sync {
    /// 解析器处理的注册种类
    fn kind(&self) -> RegistrationKind;

    /// 将一条意图解析为描述符集合
    fn resolve(
        &self,
        declaration: &ComponentDeclaration,
        intent: &RegistrationIntent,
    ) -> Vec<RegistrationDescriptor>;

    /// 按发现顺序解析整个生成单元中本种类的全部意图
    fn resolve_unit(&self, unit: &GenerationUnit) -> Vec<RegistrationDescriptor> {
        let mut descriptors = Vec::new();
        for declaration in &unit.declarations {
            for intent in &declaration.intents {
                if intent.kind == self.kind() {
                    descriptors.extend(self.resolve(declaration, intent));
                }
            }
        }
        debug!(
            kind = %self.kind(),
            unit = %unit.name,
            count = descriptors.len(),
            "种类提取完成"
        );
        descriptors
    }
}

/// 通用路径的目标类型计算
///
/// 依次累加：显式目标列表、直接基类（存在且非根类型时）、
/// 直接实现的契约；同一意图内的重复目标保留
fn collect_service_targets(
    declaration: &ComponentDeclaration,
    intent: &RegistrationIntent,
) -> Vec<String> {
    let mut targets = intent.service_types.clone();

    if intent.include_base_type {
        if let Some(base) = &declaration.base_type {
            if !is_universal_root(&base.name) {
                targets.push(base.name.clone());
            }
        }
    }

    if intent.include_interfaces {
        targets.extend(
            declaration
                .direct_contracts()
                .into_iter()
                .map(str::to_string),
        );
    }

    targets
}

/// 通用提取路径
///
/// 目标列表为空时产出一条服务类型缺省的自注册描述符，
/// 否则每个目标名产出一条描述符，共享实现类型、契约与源位置
fn resolve_generic(
    declaration: &ComponentDeclaration,
    intent: &RegistrationIntent,
    kind: RegistrationKind,
) -> Vec<RegistrationDescriptor> {
    let targets = collect_service_targets(declaration, intent);

    if targets.is_empty() {
        return vec![RegistrationDescriptor::new(
            declaration.name.clone(),
            kind,
            intent.location.clone(),
        )
        .with_contract(intent.contract.clone())];
    }

    targets
        .into_iter()
        .map(|target| {
            RegistrationDescriptor::new(declaration.name.clone(), kind, intent.location.clone())
                .with_service_type(target)
                .with_contract(intent.contract.clone())
        })
        .collect()
}

/// 瞬态注册解析器
#[derive(Debug, Default)]
pub struct TransientResolver;

impl KindResolver for TransientResolver {
    fn kind(&self) -> RegistrationKind {
        RegistrationKind::Transient
    }

    fn resolve(
        &self,
        declaration: &ComponentDeclaration,
        intent: &RegistrationIntent,
    ) -> Vec<RegistrationDescriptor> {
        resolve_generic(declaration, intent, RegistrationKind::Transient)
    }
}

/// 常量注册解析器
#[derive(Debug, Default)]
pub struct ConstantResolver;

impl KindResolver for ConstantResolver {
    fn kind(&self) -> RegistrationKind {
        RegistrationKind::Constant
    }

    fn resolve(
        &self,
        declaration: &ComponentDeclaration,
        intent: &RegistrationIntent,
    ) -> Vec<RegistrationDescriptor> {
        resolve_generic(declaration, intent, RegistrationKind::Constant)
    }
}

/// 延迟单例注册解析器
#[derive(Debug, Default)]
pub struct LazySingletonResolver;

impl KindResolver for LazySingletonResolver {
    fn kind(&self) -> RegistrationKind {
        RegistrationKind::LazySingleton
    }

    fn resolve(
        &self,
        declaration: &ComponentDeclaration,
        intent: &RegistrationIntent,
    ) -> Vec<RegistrationDescriptor> {
        resolve_generic(declaration, intent, RegistrationKind::LazySingleton)
    }
}
