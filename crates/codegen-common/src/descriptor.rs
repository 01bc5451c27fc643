//! 注册描述符定义
//!
//! 描述符是完全解析后的注册工作单元，
//! 由注册意图按提取规则确定性派生

use crate::diagnostics::SourceLocation;
use crate::intent::RegistrationKind;
use serde::{Deserialize, Serialize};

/// 注册描述符
///
/// 一条 (实现类型, 服务类型, 契约) 绑定单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDescriptor {
    /// 实现类型的完全限定名
    pub implementation_type: String,
    /// 目标服务类型名，缺省表示自注册
    pub service_type: Option<String>,
    /// 契约判别串
    pub contract: Option<String>,
    /// 注册种类
    pub kind: RegistrationKind,
    /// 产生此描述符的意图源位置
    pub location: SourceLocation,
}

impl RegistrationDescriptor {
    /// 创建新的注册描述符
    pub fn new(
        implementation_type: impl Into<String>,
        kind: RegistrationKind,
        location: SourceLocation,
    ) -> Self {
        Self {
            implementation_type: implementation_type.into(),
            service_type: None,
            contract: None,
            kind,
            location,
        }
    }

    /// 设置目标服务类型
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// 设置契约判别串
    pub fn with_contract(mut self, contract: Option<String>) -> Self {
        self.contract = contract;
        self
    }

    /// 计算用于冲突检测的重复键
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            implementation_type: self.implementation_type.clone(),
            service_type: self.service_type.clone(),
            contract: self.contract.clone(),
        }
    }
}

/// 重复键
///
/// 两个描述符冲突当且仅当三元组完全相等，种类不参与比较
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    /// 实现类型名
    pub implementation_type: String,
    /// 服务类型名
    pub service_type: Option<String>,
    /// 契约判别串
    pub contract: Option<String>,
}
