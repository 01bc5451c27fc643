//! 注册意图定义
//!
//! 注册意图是附加在组件声明上的一条注解实例，
//! 在声明图边界解码为强类型形式后不再变更

use crate::diagnostics::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 注册种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationKind {
    /// 瞬态注册，每次解析构造新实例
    Transient,
    /// 常量注册，注册预构建的单一实例
    Constant,
    /// 延迟单例注册，首次解析时构造并缓存
    LazySingleton,
    /// 视图模型绑定注册
    ViewModelBinding,
}

impl RegistrationKind {
    /// 固定的种类处理顺序
    ///
    /// 聚合与发射都按此顺序消费各种类的描述符集合
    pub const ORDERED: [Self; 4] = [
        Self::Transient,
        Self::Constant,
        Self::LazySingleton,
        Self::ViewModelBinding,
    ];
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transient => "Transient",
            Self::Constant => "Constant",
            Self::LazySingleton => "LazySingleton",
            Self::ViewModelBinding => "ViewModelBinding",
        };
        write!(f, "{name}")
    }
}

/// 注解构造参数的原始形状
///
/// 宿主注解同时支持标量与数组两种构造形式，
/// 解码一次后下游逻辑不再接触原始形状
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetArgument {
    /// 单个目标类型名
    Type(String),
    /// 嵌套的目标类型名数组
    TypeList(Vec<String>),
}

/// 原始注册意图
///
/// 声明图边界上的传输形式，经 [`From`] 转换展平为 [`RegistrationIntent`]
#[derive(Debug, Clone, Deserialize)]
pub struct RawRegistrationIntent {
    /// 注册种类
    pub kind: RegistrationKind,
    /// 原始目标参数，可能嵌套；兼容已展平的序列化形式
    #[serde(default, alias = "service_types")]
    pub arguments: Vec<TargetArgument>,
    /// 可选的契约判别串
    #[serde(default)]
    pub contract: Option<String>,
    /// 是否包含直接基类
    #[serde(default)]
    pub include_base_type: bool,
    /// 是否包含直接实现的接口
    #[serde(default)]
    pub include_interfaces: bool,
    /// 注解的显示类型名，泛型形式时携带泛型实参
    #[serde(default)]
    pub annotation: Option<String>,
    /// 意图的源位置
    pub location: SourceLocation,
}

/// 注册意图
///
/// 每次生成过程从声明图创建一次，不再变更；
/// 目标列表已展平，空白项已丢弃，同一意图内的重复项保留
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawRegistrationIntent")]
pub struct RegistrationIntent {
    /// 注册种类
    pub kind: RegistrationKind,
    /// 展平后的显式目标类型名列表，空表示自注册推断
    pub service_types: Vec<String>,
    /// 可选的契约判别串
    pub contract: Option<String>,
    /// 是否包含直接基类（对 ViewModelBinding 无意义）
    pub include_base_type: bool,
    /// 是否包含直接实现的接口（对 ViewModelBinding 无意义）
    pub include_interfaces: bool,
    /// 注解的显示类型名
    pub annotation: Option<String>,
    /// 意图的源位置
    pub location: SourceLocation,
}

impl RegistrationIntent {
    /// 创建新的注册意图
    pub fn new(kind: RegistrationKind, location: SourceLocation) -> Self {
        Self {
            kind,
            service_types: Vec::new(),
            contract: None,
            include_base_type: false,
            include_interfaces: false,
            annotation: None,
            location,
        }
    }

    /// 添加显式目标类型
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.service_types.push(target.into());
        self
    }

    /// 设置原始目标参数，展平嵌套形式
    pub fn with_arguments(mut self, arguments: Vec<TargetArgument>) -> Self {
        self.service_types = flatten_arguments(arguments);
        self
    }

    /// 设置契约判别串
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    /// 设置是否包含直接基类
    pub fn with_include_base_type(mut self, include: bool) -> Self {
        self.include_base_type = include;
        self
    }

    /// 设置是否包含直接实现的接口
    pub fn with_include_interfaces(mut self, include: bool) -> Self {
        self.include_interfaces = include;
        self
    }

    /// 设置注解显示类型名
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

impl From<RawRegistrationIntent> for RegistrationIntent {
    fn from(raw: RawRegistrationIntent) -> Self {
        Self {
            kind: raw.kind,
            service_types: flatten_arguments(raw.arguments),
            contract: raw.contract,
            include_base_type: raw.include_base_type,
            include_interfaces: raw.include_interfaces,
            annotation: raw.annotation,
            location: raw.location,
        }
    }
}

/// 展平原始目标参数
///
/// 嵌套数组展开为有序平铺序列，空白项丢弃，重复项保留
fn flatten_arguments(arguments: Vec<TargetArgument>) -> Vec<String> {
    let mut targets = Vec::new();
    for argument in arguments {
        match argument {
            TargetArgument::Type(name) => {
                if !name.trim().is_empty() {
                    targets.push(name);
                }
            }
            TargetArgument::TypeList(names) => {
                targets.extend(names.into_iter().filter(|name| !name.trim().is_empty()));
            }
        }
    }
    targets
}
