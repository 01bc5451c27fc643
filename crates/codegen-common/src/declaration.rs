//! 组件声明定义
//!
//! 声明图由宿主工具链提供，核心只消费不拥有；
//! 每次生成过程拿到的都是不可变快照

use crate::intent::RegistrationIntent;
use serde::{Deserialize, Serialize};

/// 直接基类引用
///
/// 携带基类自身实现的契约集合，用于计算派生声明的直接契约
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTypeRef {
    /// 基类的完全限定名
    pub name: String,
    /// 基类实现的契约名集合
    #[serde(default)]
    pub contracts: Vec<String>,
}

impl BaseTypeRef {
    /// 创建新的基类引用
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contracts: Vec::new(),
        }
    }

    /// 添加基类实现的契约
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contracts.push(contract.into());
        self
    }
}

/// 组件声明
///
/// 声明图中一个参与注册的命名类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDeclaration {
    /// 完全限定名
    pub name: String,
    /// 直接基类引用，根类型或无基类时为空
    #[serde(default)]
    pub base_type: Option<BaseTypeRef>,
    /// 声明列出的契约名集合，可能含从基类继承的项
    #[serde(default)]
    pub contracts: Vec<String>,
    /// 附加在声明上的注册意图
    #[serde(default)]
    pub intents: Vec<RegistrationIntent>,
}

impl ComponentDeclaration {
    /// 创建新的组件声明
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            contracts: Vec::new(),
            intents: Vec::new(),
        }
    }

    /// 设置直接基类
    pub fn with_base_type(mut self, base_type: BaseTypeRef) -> Self {
        self.base_type = Some(base_type);
        self
    }

    /// 添加实现的契约
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contracts.push(contract.into());
        self
    }

    /// 添加注册意图
    pub fn with_intent(mut self, intent: RegistrationIntent) -> Self {
        self.intents.push(intent);
        self
    }

    /// 计算直接实现的契约
    ///
    /// 契约为直接实现当且仅当它不在基类的契约集合内；
    /// 无基类时声明列出的契约全部视为直接实现
    pub fn direct_contracts(&self) -> Vec<&str> {
        match &self.base_type {
            None => self.contracts.iter().map(String::as_str).collect(),
            Some(base) => self
                .contracts
                .iter()
                .filter(|contract| !base.contracts.contains(contract))
                .map(String::as_str)
                .collect(),
        }
    }
}

/// 生成单元
///
/// 一次生成过程的输入快照：单元名加有序的组件声明集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationUnit {
    /// 生成单元名称
    pub name: String,
    /// 有序的组件声明集合
    #[serde(default)]
    pub declarations: Vec<ComponentDeclaration>,
}

impl GenerationUnit {
    /// 创建新的生成单元
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// 添加组件声明
    pub fn with_declaration(mut self, declaration: ComponentDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }
}

/// 判断类型名是否为宿主对象模型的统一根类型
///
/// 按名称的末段判断，兼容完全限定形式
pub fn is_universal_root(type_name: &str) -> bool {
    let last_segment = type_name
        .rsplit("::")
        .next()
        .unwrap_or(type_name)
        .rsplit('.')
        .next()
        .unwrap_or(type_name);
    last_segment.eq_ignore_ascii_case("object")
}
