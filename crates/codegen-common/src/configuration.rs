//! 构建配置查找
//!
//! 宿主构建系统以键值形式提供命名空间等配置值

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 构建作用域根命名空间的配置键
pub const ROOT_NAMESPACE_KEY: &str = "RootNamespace";

/// 默认命名空间的配置键
pub const DEFAULT_NAMESPACE_KEY: &str = "DefaultNamespace";

/// 两个命名空间键都缺失时使用的固定回退命名空间
///
/// 即生成代码所引用的运行时解析器 crate 的命名空间
pub const FALLBACK_NAMESPACE: &str = "registration_runtime";

/// 构建配置
///
/// 每次生成过程传入一份快照，生成期间不再变更
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfiguration {
    /// 配置键值数据
    #[serde(default)]
    values: HashMap<String, String>,
}

impl BuildConfiguration {
    /// 创建空的构建配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入配置项
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 插入配置项并返回自身
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// 获取配置项，空白值视为缺失
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// 解析生成模块使用的命名空间
    ///
    /// 优先取 `RootNamespace`，其次 `DefaultNamespace`，
    /// 两者都缺失时返回空，由发射器套用固定回退命名空间
    pub fn resolve_namespace(&self) -> Option<&str> {
        self.get(ROOT_NAMESPACE_KEY)
            .or_else(|| self.get(DEFAULT_NAMESPACE_KEY))
    }
}
