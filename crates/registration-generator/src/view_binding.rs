//! 视图模型绑定解析
//!
//! ViewModelBinding 种类使用独立的解析算法：
//! 从注解的泛型实参或首个构造参数确定绑定的视图模型类型，
//! 解析不出可用类型名时静默产出零个描述符，不报告诊断

use crate::extractor::KindResolver;
use codegen_common::{
    ComponentDeclaration, RegistrationDescriptor, RegistrationIntent, RegistrationKind,
};
use tracing::debug;

/// 解析类型显示名中的泛型实参文本
///
/// 实参文本是第一个 `<` 与最后一个 `>` 之间的子串；
/// 没有 `<` 或没有处于其后的 `>` 时视为不存在泛型实参，
/// `Foo<>` 解析为空字符串
pub fn generic_type_argument(type_name: &str) -> Option<&str> {
    let start = type_name.find('<')? + 1;
    let end = type_name.rfind('>')?;
    if end < start {
        return None;
    }
    Some(&type_name[start..end])
}

/// 构造视图模型对应的合成服务契约名
pub fn view_contract_name(view_model: &str) -> String {
    format!("ViewFor<{view_model}>")
}

/// 视图模型绑定解析器
#[derive(Debug, Default)]
pub struct ViewModelBindingResolver;

impl ViewModelBindingResolver {
    /// 确定意图绑定的视图模型类型名
    ///
    /// 优先取注解泛型实参，为空时回退到首个构造参数值
    fn resolve_view_model(intent: &RegistrationIntent) -> Option<&str> {
        intent
            .annotation
            .as_deref()
            .and_then(generic_type_argument)
            .filter(|argument| !argument.trim().is_empty())
            .or_else(|| intent.service_types.first().map(String::as_str))
            .filter(|view_model| !view_model.trim().is_empty())
    }
}

impl KindResolver for ViewModelBindingResolver {
    fn kind(&self) -> RegistrationKind {
        RegistrationKind::ViewModelBinding
    }

    fn resolve(
        &self,
        declaration: &ComponentDeclaration,
        intent: &RegistrationIntent,
    ) -> Vec<RegistrationDescriptor> {
        let Some(view_model) = Self::resolve_view_model(intent) else {
            // 解析不出视图模型时静默丢弃，与通用路径的硬失败不对称
            debug!(declaration = %declaration.name, "视图模型类型不可解析, 丢弃意图");
            return Vec::new();
        };

        // 视图模型绑定忽略契约判别串，强制置空
        vec![RegistrationDescriptor::new(
            declaration.name.clone(),
            RegistrationKind::ViewModelBinding,
            intent.location.clone(),
        )
        .with_service_type(view_contract_name(view_model))
        .with_contract(None)]
    }
}
